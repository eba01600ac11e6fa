use anyhow::Context;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::event_source::RawEvent;

// Captured once so every log created by this process shares one name.
static PROCESS_START: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Append-only diagnostic trail of every event the dispatch loop observed.
///
/// One line per event, `<unix_ts>;<type>;<code>;<value>`, flushed after every
/// write so the trail survives a crash immediately after the last event.
pub struct EventLog {
    file: File,
    path: PathBuf,
}

impl EventLog {
    /// Create the log inside `dir`, named after the process start time.
    pub fn create(dir: &Path) -> anyhow::Result<Self> {
        let name = format!("key-mon-log-{}", PROCESS_START.format("%Y%m%d-%H%M%S"));
        let path = dir.join(name);
        let file = File::create(&path)
            .with_context(|| format!("cannot create event log at {}", path.display()))?;
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write and flush one event record.
    pub fn record(&mut self, event: &RawEvent) -> io::Result<()> {
        let timestamp = unix_seconds(event.time);
        writeln!(
            self.file,
            "{:.5};{};{};{}",
            timestamp, event.kind, event.code, event.value
        )?;
        self.file.flush()
    }

    /// Flush and close the log. Consumes the log so nothing can write to a
    /// closed trail.
    pub fn close(mut self) -> io::Result<()> {
        self.file.flush()?;
        self.file.sync_all()
    }
}

/// Unix timestamp helper shared with tests.
pub fn unix_seconds(time: SystemTime) -> f64 {
    time.duration_since(UNIX_EPOCH).unwrap_or_default().as_secs_f64()
}
