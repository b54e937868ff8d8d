//! JSON-lines event log.
//!
//! One object per line, each carrying `type` and `ts` (milliseconds since the
//! session started). Logging is best effort: the first failed write disables
//! the log and the game carries on. The error is kept for the host to report
//! once the terminal is back to normal.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::{LockEvent, Phase};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum LogRecord {
    #[serde(rename = "session_start")]
    SessionStart { seed: u32, width: u8, height: u8 },
    #[serde(rename = "lock")]
    Lock {
        lines_cleared: u32,
        score_delta: u32,
        score: u32,
        level: u32,
        level_up: bool,
        game_over: bool,
    },
    #[serde(rename = "phase")]
    Phase { phase: &'static str },
    #[serde(rename = "reset")]
    Reset,
}

impl LogRecord {
    pub fn lock(event: &LockEvent, score: u32) -> Self {
        Self::Lock {
            lines_cleared: event.lines_cleared,
            score_delta: event.score_delta,
            score,
            level: event.level,
            level_up: event.level_up,
            game_over: event.game_over,
        }
    }

    pub fn phase(phase: Phase) -> Self {
        Self::Phase {
            phase: phase.as_str(),
        }
    }
}

#[derive(Serialize)]
struct Line<'a> {
    ts: u64,
    #[serde(flatten)]
    record: &'a LogRecord,
}

pub struct EventLog<W: Write = BufWriter<File>> {
    out: Option<W>,
    buf: Vec<u8>,
    write_error: Option<io::Error>,
}

impl EventLog<BufWriter<File>> {
    /// Append to `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::with_writer(BufWriter::new(file)))
    }

    /// A log that drops every record.
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
            write_error: None,
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
            write_error: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, ts: u64, record: &LogRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, &Line { ts, record }).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if let Err(e) = out.write_all(&self.buf).and_then(|_| out.flush()) {
            self.write_error = Some(e);
            self.out = None;
        }
    }

    /// The write failure that disabled the log, if any.
    pub fn write_error(&self) -> Option<&io::Error> {
        self.write_error.as_ref()
    }

    /// Hand back the writer (tests inspect what was written).
    pub fn into_inner(self) -> Option<W> {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(log: EventLog<Vec<u8>>) -> Vec<serde_json::Value> {
        let bytes = log.into_inner().unwrap();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_records_are_json_lines() {
        let mut log = EventLog::with_writer(Vec::new());
        log.record(
            0,
            &LogRecord::SessionStart {
                seed: 7,
                width: 10,
                height: 20,
            },
        );
        log.record(1500, &LogRecord::phase(Phase::Paused));
        log.record(2000, &LogRecord::Reset);

        let v = lines(log);
        assert_eq!(v.len(), 3);
        assert_eq!(v[0]["type"], "session_start");
        assert_eq!(v[0]["seed"], 7);
        assert_eq!(v[0]["ts"], 0);
        assert_eq!(v[1]["type"], "phase");
        assert_eq!(v[1]["phase"], "paused");
        assert_eq!(v[2]["type"], "reset");
        assert_eq!(v[2]["ts"], 2000);
    }

    #[test]
    fn test_lock_record_fields() {
        let event = LockEvent {
            lines_cleared: 2,
            score_delta: 400,
            level: 2,
            level_up: true,
            game_over: false,
        };
        let mut log = EventLog::with_writer(Vec::new());
        log.record(10, &LogRecord::lock(&event, 1400));

        let v = lines(log);
        assert_eq!(v[0]["type"], "lock");
        assert_eq!(v[0]["lines_cleared"], 2);
        assert_eq!(v[0]["score_delta"], 400);
        assert_eq!(v[0]["score"], 1400);
        assert_eq!(v[0]["level_up"], true);
        assert_eq!(v[0]["game_over"], false);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_disables_log() {
        let mut log = EventLog::with_writer(BrokenPipe);
        assert!(log.is_enabled());
        log.record(0, &LogRecord::Reset);
        assert!(!log.is_enabled());
        assert_eq!(
            log.write_error().map(|e| e.kind()),
            Some(io::ErrorKind::BrokenPipe)
        );
        // Further records are dropped silently.
        log.record(1, &LogRecord::Reset);
    }

    #[test]
    fn test_disabled_log_drops_records() {
        let mut log = EventLog::disabled();
        log.record(0, &LogRecord::Reset);
        assert!(!log.is_enabled());
        assert!(log.write_error().is_none());
    }
}
