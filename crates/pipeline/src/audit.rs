//! Audit channels: two independent, append-only streams describing what
//! happened to every record.
//!
//! The sinks are explicit, injectable dependencies rather than global
//! loggers, so tests can assert on captured lines deterministically.
//! Entries are write-once; the pipeline never removes anything from
//! either stream.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// An append-only destination for audit lines.
pub trait AuditSink: Send {
    fn append(&mut self, line: &str) -> io::Result<()>;
}

// ---------------------------------------------------------------------------
// AuditTrail
// ---------------------------------------------------------------------------

/// The two audit channels of a migration run: "migrated" and "errored".
///
/// Duplicate skips are informational and go through `tracing`, never
/// through either sink.
pub struct AuditTrail {
    migrated: Box<dyn AuditSink>,
    errored: Box<dyn AuditSink>,
}

impl AuditTrail {
    pub fn new(migrated: Box<dyn AuditSink>, errored: Box<dyn AuditSink>) -> Self {
        Self { migrated, errored }
    }

    /// Append a success entry: `ITEM: <barcode> OK`.
    pub fn ok(&mut self, barcode: &str) {
        let line = format!("ITEM: {barcode} OK");
        if let Err(err) = self.migrated.append(&line) {
            tracing::warn!(%err, barcode, "migrated audit sink write failed");
        }
    }

    /// Append a failure entry: `ITEM: <barcode> ERROR: <reason>`.
    pub fn error(&mut self, barcode: &str, reason: &str) {
        let line = format!("ITEM: {barcode} ERROR: {reason}");
        if let Err(err) = self.errored.append(&line) {
            tracing::warn!(%err, barcode, "errored audit sink write failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Sinks
// ---------------------------------------------------------------------------

/// Production sink: one line per entry, appended to a file.
pub struct FileSink {
    file: File,
}

impl FileSink {
    /// Open (or create) the log file in append mode.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }
}

impl AuditSink for FileSink {
    fn append(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{line}")
    }
}

/// Test sink: captures lines in memory. Cloning yields a handle onto the
/// same buffer, so a clone kept outside the [`AuditTrail`] can inspect
/// what the pipeline wrote.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything appended so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("audit sink lock poisoned").clone()
    }
}

impl AuditSink for MemorySink {
    fn append(&mut self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .expect("audit sink lock poisoned")
            .push(line.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn trail_with_sinks() -> (AuditTrail, MemorySink, MemorySink) {
        let migrated = MemorySink::new();
        let errored = MemorySink::new();
        let trail = AuditTrail::new(Box::new(migrated.clone()), Box::new(errored.clone()));
        (trail, migrated, errored)
    }

    #[test]
    fn ok_writes_exact_migrated_line() {
        let (mut trail, migrated, errored) = trail_with_sinks();
        trail.ok("B1");

        assert_eq!(migrated.lines(), vec!["ITEM: B1 OK"]);
        assert!(errored.lines().is_empty());
    }

    #[test]
    fn error_writes_exact_errored_line() {
        let (mut trail, migrated, errored) = trail_with_sinks();
        trail.error("B1", "Document 10 not found");

        assert_eq!(errored.lines(), vec!["ITEM: B1 ERROR: Document 10 not found"]);
        assert!(migrated.lines().is_empty());
    }

    #[test]
    fn channels_are_independent_and_append_only() {
        let (mut trail, migrated, errored) = trail_with_sinks();
        trail.ok("B1");
        trail.error("B2", "missing barcode");
        trail.ok("B3");

        assert_eq!(migrated.lines(), vec!["ITEM: B1 OK", "ITEM: B3 OK"]);
        assert_eq!(errored.lines(), vec!["ITEM: B2 ERROR: missing barcode"]);
    }

    struct FailingSink;

    impl AuditSink for FailingSink {
        fn append(&mut self, _line: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn sink_write_failure_is_swallowed() {
        let errored = MemorySink::new();
        let mut trail = AuditTrail::new(Box::new(FailingSink), Box::new(errored.clone()));

        // The migrated sink fails; no panic, and the other channel
        // keeps working.
        trail.ok("B1");
        trail.error("B2", "missing barcode");

        assert_eq!(errored.lines(), vec!["ITEM: B2 ERROR: missing barcode"]);
    }

    #[test]
    fn file_sink_appends_across_opens() {
        let dir = std::env::temp_dir().join(format!("ils-audit-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("migrated.log");

        {
            let mut sink = FileSink::open(&path).unwrap();
            sink.append("ITEM: B1 OK").unwrap();
        }
        {
            let mut sink = FileSink::open(&path).unwrap();
            sink.append("ITEM: B2 OK").unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "ITEM: B1 OK\nITEM: B2 OK\n");
        std::fs::remove_dir_all(&dir).ok();
    }
}
