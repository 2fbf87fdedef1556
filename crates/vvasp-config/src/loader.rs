// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Three tiers, later ones winning:
//! 1. TOML file
//! 2. Environment variables
//! 3. CLI arguments (dotted keys such as `atlas.default_atlas`)

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use vvasp_structures::UnknownDirectionPolicy;

use crate::{validate_config, ConfigError, ConfigResult, VvaspConfig};

pub const CONFIG_FILE_NAME: &str = "vvasp_configuration.toml";
pub const CONFIG_PATH_ENV: &str = "VVASP_CONFIG_PATH";

/// Find the VVASP configuration file
///
/// Search order:
/// 1. `VVASP_CONFIG_PATH` environment variable
/// 2. `./vvasp_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by {} not found: {}",
            CONFIG_PATH_ENV,
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(found) = search_paths.iter().find(|p| p.exists()) {
        return Ok(found.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "VVASP configuration file '{}' not found in any of these locations:\n{}\n\nSet {} to specify a custom location.",
        CONFIG_FILE_NAME, search_list, CONFIG_PATH_ENV
    )))
}

/// Load configuration from a TOML file, apply overrides and validate.
///
/// With `config_path == None` the file is searched for with [`find_config_file`].
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<VvaspConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };
    info!(target: "vvasp-config", path = %config_file.display(), "Loading configuration");

    let content = fs::read_to_string(&config_file)?;
    let mut config: VvaspConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    validate_config(&config)?;
    Ok(config)
}

fn parse_policy(value: &str) -> Option<UnknownDirectionPolicy> {
    match value.to_lowercase().as_str() {
        "ignore" => Some(UnknownDirectionPolicy::Ignore),
        "reject" => Some(UnknownDirectionPolicy::Reject),
        _ => None,
    }
}

fn parse_bool(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower == "true" || lower == "1" || lower == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `VVASP_DEFAULT_ATLAS` -> `atlas.default_atlas`
/// - `VVASP_LOG_LEVEL` -> `system.log_level`
/// - `VVASP_EXPERIMENT_DIR` -> `paths.experiment_dir`
/// - `VVASP_EXPORT_DIR` -> `paths.export_dir`
/// - `VVASP_ATLAS_DIR` -> `paths.atlas_dir`
/// - `VVASP_UNKNOWN_DIRECTION` -> `movement.unknown_direction`
pub fn apply_environment_overrides(config: &mut VvaspConfig) {
    if let Ok(value) = env::var("VVASP_DEFAULT_ATLAS") {
        debug!(target: "vvasp-config", %value, "VVASP_DEFAULT_ATLAS override");
        config.atlas.default_atlas = value;
    }
    if let Ok(value) = env::var("VVASP_LOG_LEVEL") {
        debug!(target: "vvasp-config", %value, "VVASP_LOG_LEVEL override");
        config.system.log_level = value;
    }
    if let Ok(value) = env::var("VVASP_EXPERIMENT_DIR") {
        config.paths.experiment_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("VVASP_EXPORT_DIR") {
        config.paths.export_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("VVASP_ATLAS_DIR") {
        config.paths.atlas_dir = PathBuf::from(value);
    }
    if let Ok(value) = env::var("VVASP_UNKNOWN_DIRECTION") {
        match parse_policy(&value) {
            Some(policy) => config.movement.unknown_direction = policy,
            None => warn!(
                target: "vvasp-config",
                %value,
                "Ignoring VVASP_UNKNOWN_DIRECTION; expected 'ignore' or 'reject'"
            ),
        }
    }
}

/// Apply CLI argument overrides to configuration
///
/// Keys are dotted section paths, e.g. `{"atlas.default_atlas": "whs_sd_rat_39um"}`.
/// Unknown keys and unparsable values are rejected.
pub fn apply_cli_overrides(
    config: &mut VvaspConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    for (key, value) in cli_args {
        debug!(target: "vvasp-config", %key, %value, "CLI override");
        match key.as_str() {
            "system.log_level" => config.system.log_level = value.clone(),
            "system.debug" => config.system.debug = parse_bool(value),
            "paths.experiment_dir" => config.paths.experiment_dir = PathBuf::from(value),
            "paths.export_dir" => config.paths.export_dir = PathBuf::from(value),
            "paths.atlas_dir" => config.paths.atlas_dir = PathBuf::from(value),
            "paths.user_mesh_dir" => config.paths.user_mesh_dir = PathBuf::from(value),
            "atlas.default_atlas" => config.atlas.default_atlas = value.clone(),
            "atlas.default_mapping" => {
                config.atlas.default_mapping = Some(value.clone()).filter(|v| !v.is_empty())
            }
            "movement.unknown_direction" => {
                config.movement.unknown_direction = parse_policy(value).ok_or_else(|| {
                    ConfigError::InvalidValue(format!("{}: {}", key, value))
                })?
            }
            "movement.advance_truncates" => config.movement.advance_truncates = parse_bool(value),
            "logging.file_logging" => config.logging.file_logging = parse_bool(value),
            "logging.log_dir" => config.logging.log_dir = PathBuf::from(value),
            _ => {
                return Err(ConfigError::InvalidValue(format!(
                    "unknown configuration key '{}'",
                    key
                )))
            }
        }
    }
    Ok(())
}
