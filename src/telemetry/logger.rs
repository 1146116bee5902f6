//! # Telemetry Record Logger
//!
//! Appends displayed telemetry updates to rotating JSONL files.
//!
//! One JSON object per line, one line per update shown on the instrument.
//! A new timestamped file is started after `max_records_per_file` records and
//! only the newest `max_files_to_keep` files are retained.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::Result;
use crate::telemetry::sample::TelemetrySample;

/// File name prefix of every record file in the log directory
const FILE_PREFIX: &str = "telemetry-";

/// File name suffix of every record file in the log directory
const FILE_SUFFIX: &str = ".jsonl";

/// One logged update: the shown sample and its convergence companion.
#[derive(Debug, Serialize)]
pub struct TelemetryRecord<'a> {
    /// Wall-clock time the update was displayed
    pub timestamp: DateTime<Utc>,
    /// Sample shown on the instrument
    pub telemetry: &'a TelemetrySample,
    /// Convergence sample delivered with it
    pub convergence: &'a TelemetrySample,
}

/// Rotating JSONL writer for telemetry records.
pub struct TelemetryLogger {
    log_dir: PathBuf,
    max_records_per_file: usize,
    max_files_to_keep: usize,
    file: Option<File>,
    records_in_file: usize,
    file_sequence: u64,
}

impl std::fmt::Debug for TelemetryLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryLogger")
            .field("log_dir", &self.log_dir)
            .field("records_in_file", &self.records_in_file)
            .finish_non_exhaustive()
    }
}

impl TelemetryLogger {
    /// Creates a logger writing into `log_dir`, creating the directory if
    /// needed. The first file is opened lazily on the first append.
    ///
    /// # Errors
    ///
    /// Returns error if the log directory cannot be created.
    pub fn new<P: AsRef<Path>>(
        log_dir: P,
        max_records_per_file: usize,
        max_files_to_keep: usize,
    ) -> Result<Self> {
        fs::create_dir_all(&log_dir)?;
        Ok(Self {
            log_dir: log_dir.as_ref().to_path_buf(),
            max_records_per_file,
            max_files_to_keep,
            file: None,
            records_in_file: 0,
            file_sequence: 0,
        })
    }

    /// Appends one record, rotating to a fresh file when the current one is
    /// full.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the file write fails.
    pub fn append(
        &mut self,
        telemetry: &TelemetrySample,
        convergence: &TelemetrySample,
    ) -> Result<()> {
        if self.file.is_none() || self.records_in_file >= self.max_records_per_file {
            self.rotate()?;
        }

        let record = TelemetryRecord {
            timestamp: Utc::now(),
            telemetry,
            convergence,
        };
        let line = serde_json::to_string(&record)?;

        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{}", line)?;
            self.records_in_file += 1;
        }

        Ok(())
    }

    /// Starts a new record file and prunes old ones past the retention limit.
    fn rotate(&mut self) -> Result<()> {
        self.file_sequence += 1;
        let name = format!(
            "{}{}-{:04}{}",
            FILE_PREFIX,
            Utc::now().format("%Y%m%d-%H%M%S"),
            self.file_sequence,
            FILE_SUFFIX
        );
        let path = self.log_dir.join(name);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        info!("Telemetry record log rotated to {}", path.display());

        self.file = Some(file);
        self.records_in_file = 0;
        self.prune();
        Ok(())
    }

    /// Deletes the oldest record files beyond `max_files_to_keep`.
    ///
    /// Pruning failures are logged, never surfaced; losing an old log file
    /// must not break the display path.
    fn prune(&self) {
        let entries = match fs::read_dir(&self.log_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot scan telemetry log dir for pruning: {}", e);
                return;
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(|name| name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX))
                    .unwrap_or(false)
            })
            .collect();

        // Names embed timestamp + sequence, so lexical order is age order.
        files.sort();

        let keep_from = files.len().saturating_sub(self.max_files_to_keep);
        for path in &files[..keep_from] {
            match fs::remove_file(path) {
                Ok(()) => info!("Pruned old telemetry record log {}", path.display()),
                Err(e) => warn!("Failed to prune {}: {}", path.display(), e),
            }
        }
    }
}
