// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

//! Movement input resolved against the `[movement]` configuration.

use std::collections::BTreeMap;

use crate::config::{Keybind, MovementConfig, VvaspConfig};
use crate::probe::{ProbeResult, VizObject};
use crate::structures::UnknownDirectionPolicy;

/// Direction names and key chords, interpreted with the configured
/// unknown-direction policy and key bindings.
#[derive(Debug, Clone)]
pub struct MovementControls {
    policy: UnknownDirectionPolicy,
    keybinds: BTreeMap<String, Keybind>,
}

impl MovementControls {
    pub fn from_config(config: &VvaspConfig) -> Self {
        Self::from_movement(&config.movement)
    }

    pub fn from_movement(movement: &MovementConfig) -> Self {
        Self {
            policy: movement.unknown_direction,
            keybinds: movement.keybinds.clone(),
        }
    }

    pub fn policy(&self) -> UnknownDirectionPolicy {
        self.policy
    }

    pub fn keybind(&self, chord: &str) -> Option<Keybind> {
        self.keybinds.get(chord).copied()
    }

    /// Move by a direction name such as `"tilt up"`.
    pub fn move_by_name<O: VizObject + ?Sized>(
        &self,
        object: &mut O,
        direction: &str,
        magnitude: f64,
    ) -> ProbeResult<()> {
        object.move_by_name(direction, magnitude, self.policy)
    }

    /// Apply the movement bound to `chord`; `false` if nothing is bound to it.
    pub fn press<O: VizObject + ?Sized>(&self, object: &mut O, chord: &str) -> bool {
        match self.keybind(chord) {
            Some(Keybind(command, magnitude)) => {
                object.move_by(command, magnitude);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn test_configured_policy_decides_unknown_names() {
        let mut config = VvaspConfig::default();
        let mut probe = Probe::new("NP1", &ProbeCatalogue::builtin()).unwrap();
        probe.set_location(Vector3::zeros(), Vector3::new(90.0, 0.0, 0.0));

        let lenient = MovementControls::from_config(&config);
        assert!(lenient.move_by_name(&mut probe, "sideways", 100.0).is_ok());
        assert_eq!(probe.origin(), Vector3::zeros());

        config.movement.unknown_direction = UnknownDirectionPolicy::Reject;
        let strict = MovementControls::from_config(&config);
        let err = strict.move_by_name(&mut probe, "sideways", 100.0).unwrap_err();
        assert!(matches!(err, crate::probe::ProbeError::UnknownDirection(ref d) if d == "sideways"));

        strict.move_by_name(&mut probe, "right", 100.0).unwrap();
        assert_eq!(probe.origin(), Vector3::new(100.0, 0.0, 0.0));
    }

    #[test]
    fn test_press_uses_bound_movement() {
        let controls = MovementControls::from_config(&VvaspConfig::default());
        let mut probe = Probe::new("NP1", &ProbeCatalogue::builtin()).unwrap();

        assert!(controls.press(&mut probe, "d"));
        assert_eq!(probe.origin(), Vector3::new(100.0, 0.0, 0.0));
        assert!(controls.press(&mut probe, "Ctrl+a"));
        assert_eq!(probe.origin(), Vector3::new(90.0, 0.0, 0.0));
        assert!(!controls.press(&mut probe, "Alt+z"));
        assert_eq!(probe.origin(), Vector3::new(90.0, 0.0, 0.0));
    }
}
