// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

//! # vvasp-observability
//!
//! Logging setup shared by the VVASP tools, with per-crate debug flags.
//!
//! ## Features
//! - `file-logging`: per-run directories of rolling JSON log files

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// VVASP crate names, which are also their tracing targets
pub const KNOWN_CRATES: &[&str] = &[
    "vvasp-structures",
    "vvasp-geometry",
    "vvasp-atlas",
    "vvasp-probe",
    "vvasp-experiment",
    "vvasp-config",
    "vvasp-observability",
];
