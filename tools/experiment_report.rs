// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

/*!
Experiment report tool

Restores the probes of a saved experiment and prints their placement as JSON.

Usage:
  cargo run --bin experiment_report -- <experiment.json | experiment name> [--export plan.txt]
  cargo run --bin experiment_report -- mouse1 --surface root_um.json --move "advance=250" --key Shift+c
  cargo run --bin experiment_report -- --list

Entry points and depths are only reported when a brain surface is given with
`--surface` (JSON triangle mesh in bregma-relative µm). `--move` and `--key`
nudge the active probe before reporting, using the configured key bindings
and unknown-direction policy.

Experiment names without a path are looked up in the configured experiment
directory. Per-crate debug logging: `--debug-vvasp-probe`, `--debug-all`, or
`VVASP_DEBUG`.
*/

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::info;

use vvasp::config::{apply_environment_overrides, find_config_file, load_config, LogFormat, VvaspConfig};
use vvasp::controls::MovementControls;
use vvasp::experiment::{export_experiment, list_experiments, load_experiment_file, RestoreContext};
use vvasp::observability::{debug_flags_help, CrateDebugFlags, DEBUG_ENV};
use vvasp::probe::{Probe, TriangleMesh, VizObject};

#[derive(Parser, Debug)]
#[command(name = "experiment_report", version, about = "Report the probe placements of a VVASP experiment")]
#[command(after_help = debug_flags_help())]
struct Cli {
    /// Experiment file, or the name of an experiment in the experiment directory
    experiment: Option<String>,

    /// Configuration file (default: search for vvasp_configuration.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Configuration override, e.g. `--set movement.advance_truncates=false`
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,

    /// List the experiments in the experiment directory and exit
    #[arg(long)]
    list: bool,

    /// Also write the plain-text plan to this file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Brain surface as a JSON triangle mesh, used for entry points and depths
    #[arg(long)]
    surface: Option<PathBuf>,

    /// Move the active probe, e.g. `--move "tilt up=5"` (repeatable, applied in order)
    #[arg(long = "move", value_name = "DIRECTION=MAGNITUDE")]
    moves: Vec<String>,

    /// Press a configured key binding on the active probe, e.g. `--key Shift+c`
    #[arg(long = "key", value_name = "CHORD")]
    keys: Vec<String>,
}

fn parse_overrides(overrides: &[String]) -> Result<HashMap<String, String>> {
    overrides
        .iter()
        .map(|item| {
            item.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .ok_or_else(|| anyhow!("override '{}' is not KEY=VALUE", item))
        })
        .collect()
}

fn load_configuration(cli: &Cli) -> Result<VvaspConfig> {
    let overrides = parse_overrides(&cli.overrides)?;
    let overrides = Some(&overrides).filter(|o| !o.is_empty());
    if let Some(path) = &cli.config {
        return Ok(load_config(Some(path), overrides)?);
    }
    match find_config_file() {
        Ok(_) => Ok(load_config(None, overrides)?),
        Err(_) => {
            let mut config = VvaspConfig::default();
            apply_environment_overrides(&mut config);
            if let Some(overrides) = overrides {
                vvasp::config::apply_cli_overrides(&mut config, overrides)?;
            }
            vvasp::config::validate_config(&config)?;
            Ok(config)
        }
    }
}

fn load_surface(path: &Path) -> Result<TriangleMesh> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read surface mesh {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid surface mesh {}", path.display()))
}

fn apply_movements(cli: &Cli, controls: &MovementControls, probe: &mut Probe) -> Result<()> {
    for step in &cli.moves {
        let (direction, magnitude) = step
            .rsplit_once('=')
            .ok_or_else(|| anyhow!("move '{}' is not DIRECTION=MAGNITUDE", step))?;
        let magnitude: f64 = magnitude
            .trim()
            .parse()
            .with_context(|| format!("move '{}' has a non-numeric magnitude", step))?;
        controls.move_by_name(probe, direction.trim(), magnitude)?;
    }
    for chord in &cli.keys {
        if !controls.press(probe, chord) {
            bail!("no key binding for '{}'", chord);
        }
    }
    Ok(())
}

fn resolve_experiment(name: &str, experiment_dir: &Path) -> PathBuf {
    let direct = PathBuf::from(name);
    if direct.exists() || direct.components().count() > 1 {
        return direct;
    }
    experiment_dir.join(format!("{}.json", name))
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let mut debug_flags = CrateDebugFlags::from_args(args.iter().cloned());
    if let Ok(value) = env::var(DEBUG_ENV) {
        debug_flags.extend_from_list(&value);
    }
    let cli = Cli::parse_from(args.iter().filter(|a| !a.starts_with("--debug-")));

    let config = load_configuration(&cli)?;
    let level = if config.system.debug { "debug" } else { config.system.log_level.as_str() };

    #[cfg(feature = "file-logging")]
    let _log_guard = if config.logging.file_logging {
        Some(vvasp::observability::init_logging(
            &debug_flags,
            level,
            config.logging.format == LogFormat::Json,
            Some(config.logging.log_dir.clone()),
            Some(config.logging.retention_days),
            Some(config.logging.retention_runs),
        )?)
    } else {
        vvasp::observability::init_console_logging(
            &debug_flags,
            level,
            config.logging.format == LogFormat::Json,
        )?;
        None
    };
    #[cfg(not(feature = "file-logging"))]
    vvasp::observability::init_console_logging(
        &debug_flags,
        level,
        config.logging.format == LogFormat::Json,
    )?;

    if cli.list {
        for name in list_experiments(&config.paths.experiment_dir)? {
            println!("{}", name);
        }
        return Ok(());
    }

    let Some(name) = cli.experiment.as_deref() else {
        bail!("no experiment given (use --list to see the available ones)");
    };
    let path = resolve_experiment(name, &config.paths.experiment_dir);
    let mut document = load_experiment_file(&path)
        .with_context(|| format!("Failed to load experiment {}", path.display()))?;

    let mut context = RestoreContext::new(config.probe_catalogue())
        .with_axis_move_truncation(config.movement.advance_truncates);
    if let Some(surface_path) = &cli.surface {
        context = context.with_surface(Arc::new(load_surface(surface_path)?));
    }
    let mut scene = document.restore_probes(&context)?;
    info!(probes = scene.probes.len(), "Experiment restored");

    if !cli.moves.is_empty() || !cli.keys.is_empty() {
        let index = scene
            .active_index
            .ok_or_else(|| anyhow!("the experiment has no active probe to move"))?;
        let controls = MovementControls::from_config(&config);
        apply_movements(&cli, &controls, &mut scene.probes[index])?;
        document.probes = scene.probes.iter().map(Probe::probe_properties).collect();
    }

    let mut probes = Vec::with_capacity(scene.probes.len());
    for probe in &scene.probes {
        let mut properties = serde_json::to_value(probe.probe_properties())?;
        if cli.surface.is_none() {
            if let Some(fields) = properties.as_object_mut() {
                fields.remove("entrypoint");
                fields.remove("depth_along_probe_axis");
            }
        }
        let shank_origins: Vec<[f64; 3]> = probe
            .shank_origins()
            .unwrap_or_default()
            .iter()
            .map(|o| [o.x, o.y, o.z])
            .collect();
        probes.push(json!({
            "properties": properties,
            "shank_origins": shank_origins,
        }));
    }
    let report = json!({
        "experiment": path.display().to_string(),
        "atlas": document.atlas,
        "active_index": scene.active_index,
        "probes": probes,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(export_path) = &cli.export {
        export_experiment(export_path, &document)?;
    }
    Ok(())
}
