//! Data loader module for discovering and parsing call-log JSONL files
//!
//! Call logs are newline-delimited JSON, one record per line, in either
//! wire shape accepted by [`RawCall`](crate::types::RawCall). The loader
//! discovers log files, streams records, normalizes UTC-shaped records
//! through the configured zone pair, and validates every record. Malformed
//! lines and records that fail validation are logged and skipped so one
//! bad row never poisons the batch; IO errors propagate.
//!
//! Discovery order: an explicit path (file or directory), else the
//! `CALLGRID_DATA_PATH` environment variable (handled by the CLI), else
//! `<platform data dir>/callgrid` and `~/.callgrid`.

use crate::error::{CallgridError, Result};
use crate::timezone::TimezonePair;
use crate::types::{CallRecord, RawCall};
use futures::StreamExt;
use futures::stream::Stream;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Data loader for discovering and streaming call-log files
pub struct DataLoader {
    log_paths: Vec<PathBuf>,
}

impl DataLoader {
    /// Create a new DataLoader.
    ///
    /// With an explicit path, only that file or directory is used. Without
    /// one, platform default directories are searched.
    ///
    /// # Errors
    ///
    /// Returns [`CallgridError::NoCallLogs`] when nothing usable is found.
    pub async fn new(explicit: Option<PathBuf>) -> Result<Self> {
        let paths = match explicit {
            Some(path) if path.exists() => vec![path],
            Some(path) => {
                return Err(CallgridError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("call log path does not exist: {}", path.display()),
                )));
            }
            None => Self::discover_default_paths(),
        };

        if paths.is_empty() {
            return Err(CallgridError::NoCallLogs);
        }

        debug!("Using {} call log location(s)", paths.len());
        Ok(Self { log_paths: paths })
    }

    /// Platform default call-log locations that exist on this system
    fn discover_default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(data_dir) = dirs::data_dir() {
            let path = data_dir.join("callgrid");
            if path.exists() {
                paths.push(path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".callgrid");
            if path.exists() {
                paths.push(path);
            }
        }

        paths
    }

    /// Find all JSONL files in the configured locations.
    ///
    /// A location that is itself a `.jsonl` file is used directly;
    /// directories are searched one level deep.
    pub async fn find_jsonl_files(&self) -> Result<Vec<PathBuf>> {
        let mut jsonl_files = Vec::new();

        for base_path in &self.log_paths {
            if base_path.is_file() {
                jsonl_files.push(base_path.clone());
                continue;
            }

            if let Ok(mut entries) = tokio::fs::read_dir(base_path).await {
                while let Some(entry) = entries.next_entry().await? {
                    let path = entry.path();
                    if path.extension().and_then(|s| s.to_str()) == Some("jsonl") {
                        jsonl_files.push(path);
                    }
                }
            }
        }

        jsonl_files.sort();
        debug!("Found {} JSONL files", jsonl_files.len());
        Ok(jsonl_files)
    }

    /// Load call records as an async stream.
    ///
    /// UTC-shaped records are projected into `zones`; every record is
    /// validated. Lines that fail to parse and records that fail
    /// validation are warned about and skipped.
    pub fn load_calls(&self, zones: TimezonePair) -> impl Stream<Item = Result<CallRecord>> + '_ {
        async_stream::stream! {
            let files = match self.find_jsonl_files().await {
                Ok(files) => files,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            if files.is_empty() {
                yield Err(CallgridError::NoCallLogs);
                return;
            }

            for file_path in files {
                let records = Self::parse_jsonl_stream(file_path, zones);
                tokio::pin!(records);
                while let Some(result) = records.next().await {
                    yield result;
                }
            }
        }
    }

    /// Parse a single JSONL file as a stream of validated records
    fn parse_jsonl_stream(
        path: PathBuf,
        zones: TimezonePair,
    ) -> impl Stream<Item = Result<CallRecord>> {
        async_stream::stream! {
            let file = match tokio::fs::File::open(&path).await {
                Ok(f) => f,
                Err(e) => {
                    yield Err(e.into());
                    return;
                }
            };

            let reader = BufReader::new(file);
            let mut lines = reader.lines();
            let mut line_number = 0;

            while let Ok(Some(line)) = lines.next_line().await {
                line_number += 1;

                if line.trim().is_empty() {
                    continue;
                }

                let raw = match serde_json::from_str::<RawCall>(&line) {
                    Ok(raw) => raw,
                    Err(e) => {
                        warn!(
                            "Failed to parse line {} in {}: {}",
                            line_number,
                            path.display(),
                            e
                        );
                        continue;
                    }
                };

                match raw.into_record(&zones) {
                    Ok(record) => yield Ok(record),
                    Err(e) => {
                        warn!(
                            "Rejected record at line {} in {}: {}",
                            line_number,
                            path.display(),
                            e
                        );
                    }
                }
            }
        }
    }

    /// The configured call-log locations
    pub fn paths(&self) -> &[PathBuf] {
        &self.log_paths
    }
}
