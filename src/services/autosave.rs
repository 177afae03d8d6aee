//! Timer-driven autosave.
//!
//! The autosaver is a cooperative task: the event loop offers it a tick on
//! every iteration and it writes a snapshot when the period has elapsed.
//! It never runs concurrently with other session operations and never
//! propagates a failure to its caller.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::constants::{AUTOSAVE_FILENAME, AUTOSAVE_INTERVAL};
use crate::session::Session;

/// A failed autosave write. Reported, never raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveFailure {
    /// Target file
    pub path: PathBuf,
    /// Human-readable cause
    pub message: String,
}

impl std::fmt::Display for AutosaveFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "autosave to {} failed: {}", self.path.display(), self.message)
    }
}

/// Outcome of a tick that was due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutosaveOutcome {
    /// Snapshot written
    Saved(DateTime<Local>),
    /// Write failed; the session is unchanged
    Failed(AutosaveFailure),
}

/// Periodic snapshot writer bound to one file.
#[derive(Debug)]
pub struct Autosaver {
    path: PathBuf,
    interval: Duration,
    last_attempt: Option<Instant>,
    last_saved: Option<DateTime<Local>>,
    enabled: bool,
}

impl Autosaver {
    /// Autosaver writing [`AUTOSAVE_FILENAME`] inside `dir` every second.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(AUTOSAVE_FILENAME), AUTOSAVE_INTERVAL)
    }

    /// Autosaver with an explicit target and period.
    pub fn new(path: PathBuf, interval: Duration) -> Self {
        Self {
            path,
            interval,
            last_attempt: None,
            last_saved: None,
            enabled: true,
        }
    }

    /// A disabled autosaver ignores ticks and the shutdown flush.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Target file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Time of the last successful write.
    pub const fn last_saved(&self) -> Option<DateTime<Local>> {
        self.last_saved
    }

    /// True when the period has elapsed since the last attempt (or none was made).
    pub fn is_due(&self, now: Instant) -> bool {
        self.enabled
            && self
                .last_attempt
                .map_or(true, |last| now.duration_since(last) >= self.interval)
    }

    /// Writes a snapshot if the period has elapsed. Returns `None` when not due.
    pub fn tick(&mut self, session: &Session, now: Instant) -> Option<AutosaveOutcome> {
        if !self.is_due(now) {
            return None;
        }
        self.last_attempt = Some(now);
        Some(self.write(session))
    }

    /// Final best-effort write on shutdown, regardless of the period.
    pub fn flush(&mut self, session: &Session) -> Option<AutosaveOutcome> {
        if !self.enabled {
            return None;
        }
        self.last_attempt = Some(Instant::now());
        Some(self.write(session))
    }

    fn write(&mut self, session: &Session) -> AutosaveOutcome {
        match session.write_snapshot(&self.path) {
            Ok(()) => {
                let saved_at = Local::now();
                self.last_saved = Some(saved_at);
                debug!(path = %self.path.display(), "autosaved");
                AutosaveOutcome::Saved(saved_at)
            }
            Err(e) => {
                let failure = AutosaveFailure {
                    path: self.path.clone(),
                    message: e.to_string(),
                };
                warn!("{failure}");
                AutosaveOutcome::Failed(failure)
            }
        }
    }
}
