// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-vvasp-probe` and `--debug-all`.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

pub const DEBUG_ENV: &str = "VVASP_DEBUG";

/// Crates with debug logging switched on
///
/// # Example
/// ```rust
/// use vvasp_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(["--debug-vvasp-probe".to_string()]);
/// assert!(flags.is_enabled("vvasp-probe"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse `--debug-{crate-name}` and `--debug-all` from arguments.
    /// Anything else is skipped.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enabled_crates.insert(crate_name.to_string());
            }
        }
        flags
    }

    pub fn enable_all(&mut self) {
        self.enabled_crates
            .extend(KNOWN_CRATES.iter().map(|name| name.to_string()));
    }

    /// Add crates from a `VVASP_DEBUG` style value: `all` or a comma list.
    pub fn extend_from_list(&mut self, value: &str) {
        if value.trim() == "all" {
            self.enable_all();
            return;
        }
        for crate_name in value.split(',').map(str::trim) {
            if !crate_name.is_empty() {
                self.enabled_crates.insert(crate_name.to_string());
            }
        }
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `DEBUG` for enabled crates, `INFO` otherwise.
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// `EnvFilter` directive with an `info` default, e.g.
    /// `vvasp-probe=debug,info`.
    pub fn to_filter_string(&self) -> String {
        self.to_filter_string_with_default("info")
    }

    /// Same as [`Self::to_filter_string`] with a custom default level.
    pub fn to_filter_string_with_default(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name))
            .collect();
        filters.push(default_level.to_lowercase());
        filters.join(",")
    }
}

/// Debug flags from the process arguments and `VVASP_DEBUG`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());
    if let Ok(value) = env::var(DEBUG_ENV) {
        flags.extend_from_list(&value);
    }
    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  VVASP_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  VVASP_DEBUG=all                               Enable debug for all crates

Examples:
  --debug-vvasp-probe
  --debug-vvasp-probe --debug-vvasp-atlas
  VVASP_DEBUG=vvasp-probe,vvasp-atlas
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-vvasp-probe".to_string()]);
        assert!(flags.is_enabled("vvasp-probe"));
        assert!(!flags.is_enabled("vvasp-atlas"));
        assert!(flags.any_enabled());
    }

    #[test]
    fn test_other_args_ignored() {
        let flags = CrateDebugFlags::from_args(vec![
            "experiment_report".to_string(),
            "--config".to_string(),
            "plan.json".to_string(),
        ]);
        assert!(!flags.any_enabled());
        assert_eq!(flags.to_filter_string(), "info");
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_env_style_list() {
        let mut flags = CrateDebugFlags::default();
        flags.extend_from_list(" vvasp-atlas , ,vvasp-geometry");
        assert!(flags.is_enabled("vvasp-atlas"));
        assert!(flags.is_enabled("vvasp-geometry"));
        assert_eq!(flags.enabled_crates.len(), 2);

        flags.extend_from_list("all");
        assert_eq!(flags.enabled_crates.len(), KNOWN_CRATES.len());
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_args(vec![
            "--debug-vvasp-probe".to_string(),
            "--debug-vvasp-atlas".to_string(),
        ]);
        assert_eq!(
            flags.to_filter_string_with_default("WARN"),
            "vvasp-atlas=debug,vvasp-probe=debug,warn"
        );
        assert_eq!(flags.log_level("vvasp-probe"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("vvasp-config"), tracing::Level::INFO);
    }
}
