//! Per-run diagnostics.
//!
//! Each run logs to `<log_dir>/<command>.log` and to stderr at the same time,
//! and keeps a copy of the raw stdin body as `<log_dir>/body.json`, so a failed
//! pipeline step can be inspected after the fact.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;

use crate::errors::SlackError;
use crate::resource::Command;

pub const BODY_SNAPSHOT_FILE: &str = "body.json";

/// Path of the log file for `command`.
#[must_use]
pub fn log_file_path(log_dir: &Path, command: Command) -> PathBuf {
    log_dir.join(format!("{}.log", command.name()))
}

/// Logger for one run, writing to the log file and stderr.
///
/// The subscriber is the default only while this value is alive.
pub struct Diagnostics {
    log_dir: PathBuf,
    log_path: PathBuf,
    _guard: DefaultGuard,
}

impl Diagnostics {
    /// Creates (truncating) the log file for `command` and installs the two
    /// sinks for the current thread.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the log file cannot be created.
    pub fn install(command: Command, log_dir: &Path) -> Result<Self, SlackError> {
        let log_path = log_file_path(log_dir, command);
        let file = File::create(&log_path).map_err(|e| SlackError::io(&log_path, &e))?;

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false);
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(false);

        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::INFO)
            .with(file_layer)
            .with(stderr_layer);

        Ok(Self {
            log_dir: log_dir.to_path_buf(),
            log_path,
            _guard: tracing::subscriber::set_default(subscriber),
        })
    }

    #[must_use]
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Stores the raw request body for post-mortem inspection.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the snapshot cannot be written.
    pub fn snapshot_body(&self, body: &str) -> Result<PathBuf, SlackError> {
        let path = self.log_dir.join(BODY_SNAPSHOT_FILE);
        fs::write(&path, body).map_err(|e| SlackError::io(&path, &e))?;
        Ok(path)
    }
}
