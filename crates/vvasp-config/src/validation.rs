// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! All problems are collected and reported together.

use crate::{ConfigError, ConfigResult, VvaspConfig};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingTransformation { atlas: String },
    InvalidScaling { atlas: String, scaling: [f64; 3] },
    InvalidProbe { probetype: String, reason: String },
    UnknownMapping { mapping: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTransformation { atlas } => {
                write!(f, "Default atlas {} has no [atlas.transformations] entry", atlas)
            }
            Self::InvalidScaling { atlas, scaling } => {
                write!(
                    f,
                    "Scaling {:?} for atlas {} must be finite and non-zero",
                    scaling, atlas
                )
            }
            Self::InvalidProbe { probetype, reason } => {
                write!(f, "Probe type {}: {}", probetype, reason)
            }
            Self::UnknownMapping { mapping } => {
                write!(f, "Default mapping {} is not defined in [atlas.mappings]", mapping)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &VvaspConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_atlas(config, &mut errors);
    validate_probes(config, &mut errors);
    validate_values(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_atlas(config: &VvaspConfig, errors: &mut Vec<ConfigValidationError>) {
    let atlas = &config.atlas;
    if !atlas.transformations.contains_key(&atlas.default_atlas) {
        errors.push(ConfigValidationError::MissingTransformation {
            atlas: atlas.default_atlas.clone(),
        });
    }
    for (name, transformation) in &atlas.transformations {
        if transformation
            .scaling
            .iter()
            .any(|s| !s.is_finite() || *s == 0.0)
        {
            errors.push(ConfigValidationError::InvalidScaling {
                atlas: name.clone(),
                scaling: transformation.scaling,
            });
        }
    }
    if let Some(mapping) = &atlas.default_mapping {
        if !atlas.mappings.contains_key(mapping) {
            errors.push(ConfigValidationError::UnknownMapping {
                mapping: mapping.clone(),
            });
        }
    }
}

fn validate_probes(config: &VvaspConfig, errors: &mut Vec<ConfigValidationError>) {
    for probetype in config.probes.probe_types() {
        // probe_types only yields present keys
        let Ok(geometry) = config.probes.get(probetype) else {
            continue;
        };
        if let Err(e) = geometry.validate() {
            errors.push(ConfigValidationError::InvalidProbe {
                probetype: probetype.to_string(),
                reason: e.to_string(),
            });
        }
    }
}

fn validate_values(config: &VvaspConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.system.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "system.log_level".to_string(),
            reason: format!("'{}' is not one of {}", config.system.log_level, LOG_LEVELS.join(", ")),
        });
    }
    for (key, bind) in &config.movement.keybinds {
        if !bind.1.is_finite() {
            errors.push(ConfigValidationError::InvalidValue {
                field: format!("movement.keybinds.{}", key),
                reason: "magnitude must be finite".to_string(),
            });
        }
    }
}
