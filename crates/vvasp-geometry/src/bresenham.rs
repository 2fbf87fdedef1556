// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
3D Bresenham line rasterization.

The driving axis is the one with the largest absolute delta. Ties resolve to
the first of x, y, z so that the same endpoints always produce the same path.
*/

use crate::types::Voxel;

/// Ordered voxel path from `start` to `end`, both inclusive.
///
/// `start == end` yields a single voxel. Along the driving axis consecutive
/// voxels differ by exactly one step; the two secondary axes step whenever
/// their accumulated error becomes non-negative.
pub fn bresenham3d(start: Voxel, end: Voxel) -> Vec<Voxel> {
    let delta = [
        (end.x - start.x).abs(),
        (end.y - start.y).abs(),
        (end.z - start.z).abs(),
    ];
    let step = [
        (end.x - start.x).signum(),
        (end.y - start.y).signum(),
        (end.z - start.z).signum(),
    ];

    let (driving, first, second) = if delta[0] >= delta[1] && delta[0] >= delta[2] {
        (0, 1, 2)
    } else if delta[1] >= delta[0] && delta[1] >= delta[2] {
        (1, 0, 2)
    } else {
        (2, 1, 0)
    };

    let mut path = Vec::with_capacity(delta[driving] as usize + 1);
    let mut current = start;
    path.push(current);

    let mut err_first = 2 * delta[first] - delta[driving];
    let mut err_second = 2 * delta[second] - delta[driving];
    while current[driving] != end[driving] {
        current[driving] += step[driving];
        if err_first >= 0 {
            current[first] += step[first];
            err_first -= 2 * delta[driving];
        }
        if err_second >= 0 {
            current[second] += step[second];
            err_second -= 2 * delta[driving];
        }
        err_first += 2 * delta[first];
        err_second += 2 * delta[second];
        path.push(current);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_point() {
        let p = Voxel::new(3, -2, 7);
        assert_eq!(bresenham3d(p, p), vec![p]);
    }

    #[test]
    fn test_straight_z_line() {
        let path = bresenham3d(Voxel::new(1, 1, 0), Voxel::new(1, 1, 7));
        assert_eq!(path.len(), 8);
        for (i, v) in path.iter().enumerate() {
            assert_eq!(*v, Voxel::new(1, 1, i as i64));
        }
    }

    #[test]
    fn test_known_diagonal() {
        // Reference path for (-1,1,1) -> (5,3,-1)
        let path = bresenham3d(Voxel::new(-1, 1, 1), Voxel::new(5, 3, -1));
        let expected: Vec<Voxel> = [
            (-1, 1, 1),
            (0, 1, 1),
            (1, 2, 0),
            (2, 2, 0),
            (3, 2, 0),
            (4, 3, -1),
            (5, 3, -1),
        ]
        .iter()
        .map(|&(x, y, z)| Voxel::new(x, y, z))
        .collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn test_tie_prefers_x_then_y() {
        // |dx| == |dy| == |dz|: x drives, every step is a full diagonal
        let path = bresenham3d(Voxel::new(0, 0, 0), Voxel::new(3, -3, 3));
        assert_eq!(path.len(), 4);
        assert_eq!(path[1], Voxel::new(1, -1, 1));

        // |dy| == |dz| > |dx|: y drives
        let path = bresenham3d(Voxel::new(0, 0, 0), Voxel::new(1, 4, 4));
        let ys: Vec<i64> = path.iter().map(|v| v.y).collect();
        assert_eq!(ys, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_reversed_endpoints() {
        let path = bresenham3d(Voxel::new(5, 3, -1), Voxel::new(-1, 1, 1));
        assert_eq!(path.first(), Some(&Voxel::new(5, 3, -1)));
        assert_eq!(path.last(), Some(&Voxel::new(-1, 1, 1)));
        assert_eq!(path.len(), 7);
    }
}
