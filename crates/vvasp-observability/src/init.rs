// Copyright 2025 VVASP developers
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the VVASP tools
//!
//! Console logging is always available. With `file-logging`, each run also
//! writes rolling JSON files into its own timestamped directory and old runs
//! are removed by age and by count.

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

#[cfg(feature = "file-logging")]
pub use file::{init_logging, init_logging_default, LoggingGuard};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn console_layer(filter: EnvFilter, json: bool) -> BoxedLayer {
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false);
    if json {
        layer.json().with_filter(filter).boxed()
    } else {
        layer.with_filter(filter).boxed()
    }
}

/// Install a console-only subscriber writing to stderr.
///
/// `default_level` applies to every crate not named in `debug_flags`.
/// Fails if a global subscriber is already installed.
pub fn init_console_logging(
    debug_flags: &CrateDebugFlags,
    default_level: &str,
    json: bool,
) -> Result<()> {
    let filter = EnvFilter::try_new(debug_flags.to_filter_string_with_default(default_level))?;
    Registry::default()
        .with(console_layer(filter, json))
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

#[cfg(feature = "file-logging")]
mod file {
    use std::path::{Path, PathBuf};

    use anyhow::{anyhow, Context, Result};
    use chrono::{NaiveDateTime, Utc};
    use tracing_appender::rolling;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, Layer, Registry};

    use super::{console_layer, BoxedLayer};
    use crate::cli::CrateDebugFlags;

    const RUN_PREFIX: &str = "run_";
    const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

    /// Keeps the non-blocking writers alive; logs are flushed on drop.
    pub struct LoggingGuard {
        _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
        log_dir: PathBuf,
    }

    impl LoggingGuard {
        /// Directory of the current run
        pub fn log_dir(&self) -> &Path {
            &self.log_dir
        }
    }

    /// Initialize console output plus per-crate and combined JSON log files
    ///
    /// ```text
    /// ./logs/
    ///   └── run_20250101_120000/
    ///       ├── vvasp-probe.log
    ///       ├── vvasp-atlas.log
    ///       └── vvasp.log (combined)
    /// ```
    pub fn init_logging(
        debug_flags: &CrateDebugFlags,
        default_level: &str,
        json_console: bool,
        log_dir: Option<PathBuf>,
        retention_days: Option<u64>,
        retention_runs: Option<usize>,
    ) -> Result<LoggingGuard> {
        let base_log_dir = log_dir.unwrap_or_else(|| PathBuf::from("./logs"));
        let timestamp = Utc::now().format(RUN_TIMESTAMP_FORMAT);
        let run_folder = base_log_dir.join(format!("{}{}", RUN_PREFIX, timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        cleanup_old_logs(
            &base_log_dir,
            retention_days.unwrap_or(30),
            retention_runs.unwrap_or(10),
        )?;

        let filter_string = debug_flags.to_filter_string_with_default(default_level);
        let mut layers: Vec<BoxedLayer> = vec![console_layer(
            EnvFilter::try_new(&filter_string)?,
            json_console,
        )];
        let mut file_guards = Vec::new();

        for crate_name in crate::KNOWN_CRATES {
            let appender = rolling::daily(&run_folder, format!("{}.log", crate_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            file_guards.push(guard);
            layers.push(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json()
                    .with_filter(EnvFilter::try_new(format!("{}=debug,off", crate_name))?)
                    .boxed(),
            );
        }

        let combined = rolling::daily(&run_folder, "vvasp.log");
        let (writer, guard) = tracing_appender::non_blocking(combined);
        file_guards.push(guard);
        layers.push(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .json()
                .with_filter(EnvFilter::try_new(&filter_string)?)
                .boxed(),
        );

        Registry::default()
            .with(layers)
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

        Ok(LoggingGuard {
            _file_guards: file_guards,
            log_dir: run_folder,
        })
    }

    /// File logging under `./logs` with `info` default and text console.
    pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
        init_logging(debug_flags, "info", false, None, None, None)
    }

    /// Remove run directories older than `retention_days`, then all but the
    /// newest `retention_runs`.
    pub(crate) fn cleanup_old_logs(
        base_log_dir: &Path,
        retention_days: u64,
        retention_runs: usize,
    ) -> Result<()> {
        if !base_log_dir.exists() {
            return Ok(());
        }
        let cutoff = Utc::now().naive_utc() - chrono::Duration::days(retention_days as i64);

        let mut runs: Vec<(PathBuf, NaiveDateTime)> = Vec::new();
        for entry in std::fs::read_dir(base_log_dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let started = path
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(RUN_PREFIX))
                .and_then(|ts| NaiveDateTime::parse_from_str(ts, RUN_TIMESTAMP_FORMAT).ok());
            if let Some(started) = started {
                runs.push((path, started));
            }
        }
        // newest first
        runs.sort_by(|a, b| b.1.cmp(&a.1));

        for (index, (path, started)) in runs.iter().enumerate() {
            if *started < cutoff || index >= retention_runs {
                if let Err(e) = std::fs::remove_dir_all(path) {
                    tracing::warn!(
                        target: "vvasp-observability",
                        path = %path.display(),
                        error = %e,
                        "Failed to remove old log directory"
                    );
                }
            }
        }
        Ok(())
    }

}
