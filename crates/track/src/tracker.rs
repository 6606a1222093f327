use std::path::{Path, PathBuf};
use std::time::Duration;

use prizehunt_kernel::Tracker;
use serde::{Deserialize, Serialize};

/// Current schema version of the times file.
const TIMES_SCHEMA_VERSION: u32 = 1;

/// Errors from tracking persistence.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("schema version mismatch: file has v{file_version}, expected v{expected_version}")]
    SchemaMismatch {
        file_version: u32,
        expected_version: u32,
    },
    #[error("timer was never stopped")]
    NotStopped,
}

/// One completed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub elapsed_ms: u64,
}

/// On-disk layout of the times file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimesFile {
    pub schema_version: u32,
    pub records: Vec<TimeRecord>,
}

impl Default for TimesFile {
    fn default() -> Self {
        Self {
            schema_version: TIMES_SCHEMA_VERSION,
            records: Vec::new(),
        }
    }
}

/// Tracks one session from world construction to win.
#[derive(Debug, Default)]
pub struct SessionTracker {
    path: Option<PathBuf>,
    times: TimesFile,
    stopped_at: Option<Duration>,
    cancel_visible: bool,
    modal_visible: bool,
    last_error: Option<String>,
}

impl SessionTracker {
    /// Tracker that keeps times in memory only.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Tracker backed by a times file. A missing file starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let path = path.as_ref().to_path_buf();
        let times = if path.exists() {
            let times: TimesFile = serde_json::from_reader(std::fs::File::open(&path)?)?;
            if times.schema_version != TIMES_SCHEMA_VERSION {
                return Err(TrackError::SchemaMismatch {
                    file_version: times.schema_version,
                    expected_version: TIMES_SCHEMA_VERSION,
                });
            }
            times
        } else {
            TimesFile::default()
        };
        Ok(Self {
            path: Some(path),
            times,
            ..Self::default()
        })
    }

    pub fn stopped_at(&self) -> Option<Duration> {
        self.stopped_at
    }

    pub fn cancel_button_visible(&self) -> bool {
        self.cancel_visible
    }

    pub fn end_game_modal_visible(&self) -> bool {
        self.modal_visible
    }

    pub fn records(&self) -> &[TimeRecord] {
        &self.times.records
    }

    /// Fastest recorded session.
    pub fn best_time(&self) -> Option<Duration> {
        self.times
            .records
            .iter()
            .map(|r| r.elapsed_ms)
            .min()
            .map(Duration::from_millis)
    }

    /// Message of the last failed save, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Record the stopped time and rewrite the times file.
    ///
    /// The in-memory records only change once the file write succeeded.
    pub fn try_save_time(&mut self) -> Result<TimeRecord, TrackError> {
        let elapsed = self.stopped_at.ok_or(TrackError::NotStopped)?;
        let record = TimeRecord {
            elapsed_ms: elapsed.as_millis() as u64,
        };
        if let Some(path) = &self.path {
            let mut next = self.times.clone();
            next.records.push(record);
            serde_json::to_writer_pretty(std::fs::File::create(path)?, &next)?;
            self.times = next;
        } else {
            self.times.records.push(record);
        }
        Ok(record)
    }
}

impl Tracker for SessionTracker {
    fn show_cancel_button(&mut self) {
        self.cancel_visible = true;
    }

    fn stop(&mut self, at: Duration) {
        if self.stopped_at.is_none() {
            self.stopped_at = Some(at);
            tracing::info!(elapsed_ms = at.as_millis() as u64, "session timer stopped");
        }
    }

    fn save_time(&mut self) {
        match self.try_save_time() {
            Ok(record) => {
                tracing::info!(elapsed_ms = record.elapsed_ms, "session time saved");
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not save session time");
                self.last_error = Some(e.to_string());
            }
        }
    }

    fn show_end_game_modal(&mut self) {
        self.cancel_visible = false;
        self.modal_visible = true;
    }
}
