//! JSON-lines event log.
//!
//! One `serde_json` object per line, appended as events happen. A write
//! failure after opening disables the log and leaves one warning for the
//! caller to show once the terminal is back; gameplay never stops because
//! of it.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::GameEvent;

/// A single log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LogRecord {
    #[serde(rename_all = "camelCase")]
    Spawned { tick: u64, kind: String, next: String },
    #[serde(rename_all = "camelCase")]
    Locked { tick: u64, kind: String, volume: u8 },
    #[serde(rename_all = "camelCase")]
    LinesCleared {
        tick: u64,
        count: u32,
        score_delta: u32,
        quad_streak: bool,
    },
    #[serde(rename_all = "camelCase")]
    RowsSettled { tick: u64, volume: u8 },
    #[serde(rename_all = "camelCase")]
    GameOver { tick: u64, score: u32 },
    #[serde(rename_all = "camelCase")]
    ScoreSubmitted { name: String, score: u32, rank: usize },
}

impl LogRecord {
    pub fn from_event(tick: u64, event: &GameEvent) -> Self {
        match *event {
            GameEvent::Spawned { kind, next } => LogRecord::Spawned {
                tick,
                kind: kind.as_str().to_string(),
                next: next.as_str().to_string(),
            },
            GameEvent::Locked { kind, volume } => LogRecord::Locked {
                tick,
                kind: kind.as_str().to_string(),
                volume,
            },
            GameEvent::LinesCleared {
                count,
                score_delta,
                quad_streak,
            } => LogRecord::LinesCleared {
                tick,
                count,
                score_delta,
                quad_streak,
            },
            GameEvent::RowsSettled { volume } => LogRecord::RowsSettled { tick, volume },
            GameEvent::GameOver { score } => LogRecord::GameOver { tick, score },
        }
    }
}

/// Appends records to a writer; disabled logs swallow everything.
pub struct EventLog {
    out: Option<Box<dyn Write>>,
    buf: Vec<u8>,
    warning: Option<String>,
}

impl EventLog {
    pub fn disabled() -> Self {
        Self {
            out: None,
            buf: Vec::new(),
            warning: None,
        }
    }

    /// Append to `path`, creating it when missing.
    pub fn open(path: &Path) -> Result<Self> {
        let file: File = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open event log {}", path.display()))?;
        Ok(Self::to_writer(BufWriter::new(file)))
    }

    pub fn to_writer(out: impl Write + 'static) -> Self {
        Self {
            out: Some(Box::new(out)),
            buf: Vec::with_capacity(256),
            warning: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record_event(&mut self, tick: u64, event: &GameEvent) {
        if self.out.is_some() {
            self.record(&LogRecord::from_event(tick, event));
        }
    }

    pub fn record(&mut self, record: &LogRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, record).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if let Err(e) = out.write_all(&self.buf) {
            self.warning = Some(format!("[EventLog] write failed, disabling: {}", e));
            self.out = None;
        }
    }

    /// The write failure that disabled the log, reported once.
    pub fn take_warning(&mut self) -> Option<String> {
        self.warning.take()
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(out) = self.out.as_mut() {
            out.flush().context("Failed to flush event log")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _data: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_failure_disables_and_warns_once() {
        let mut log = EventLog::to_writer(Broken);
        assert!(log.take_warning().is_none());

        log.record(&LogRecord::GameOver { tick: 1, score: 0 });
        assert!(!log.is_enabled());
        log.record(&LogRecord::GameOver { tick: 2, score: 0 });

        let warning = log.take_warning().unwrap();
        assert!(warning.starts_with("[EventLog] write failed"));
        assert!(warning.contains("disk full"));
        assert!(log.take_warning().is_none());
    }

    #[test]
    fn records_are_json_lines() {
        let sink = Shared::default();
        let mut log = EventLog::to_writer(sink.clone());

        log.record_event(
            3,
            &GameEvent::LinesCleared {
                count: 4,
                score_delta: 80,
                quad_streak: false,
            },
        );
        log.record_event(
            4,
            &GameEvent::Locked {
                kind: PieceKind::T,
                volume: 255,
            },
        );

        let text = String::from_utf8(sink.0.borrow().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "linesCleared");
        assert_eq!(first["scoreDelta"], 80);
        assert_eq!(first["quadStreak"], false);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["type"], "locked");
        assert_eq!(second["kind"], "T");
    }

    #[test]
    fn disabled_log_is_silent() {
        let mut log = EventLog::disabled();
        assert!(!log.is_enabled());
        log.record(&LogRecord::GameOver { tick: 1, score: 0 });
        log.flush().unwrap();
    }

    #[test]
    fn record_type_matches_event_name() {
        let event = GameEvent::RowsSettled { volume: 160 };
        let value = serde_json::to_value(LogRecord::from_event(0, &event)).unwrap();
        assert_eq!(value["type"], event.as_str());
    }
}
