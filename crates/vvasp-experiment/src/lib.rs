// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
# VVASP Experiment

Saved stereotaxic plans: which atlas, how it was placed, and where every
probe sits.

```text
{
  "atlas":  { "name", "mapping", "min_tree_depth", "max_tree_depth",
              "visible_regions", "bregma_location", "rotation_angles", "scaling" },
  "probes": [ { "probetype", "info", "active", "tip": {ML, AP, DV},
                "angles": {elevation, spin, azimuth}, "entrypoint",
                "depth_along_probe_axis" } ]
}
```
*/

pub mod document;
pub mod io;
pub mod types;

pub use document::{ExperimentDocument, RestoreContext, RestoredScene};
pub use io::{export_experiment, list_experiments, load_experiment_file, render_export, save_experiment};
pub use types::{ExperimentError, ExperimentResult};
