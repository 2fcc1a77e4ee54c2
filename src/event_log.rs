//! Optional JSON-lines event log.
//!
//! Enabled with `BLOCKFALL_LOG_PATH`. One JSON object per line, tagged by
//! `type`. The first write error closes the log for the rest of the session.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::engine::LockEvent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogRecord {
    SessionStart {
        seed: u32,
        rows: u16,
        cols: u16,
        frame_ms: u32,
    },
    Lock {
        frame: u64,
        rows_cleared: u32,
        game_over: bool,
    },
    GameOver {
        frame: u64,
        occupied: usize,
    },
    Reset {
        frame: u64,
    },
}

impl From<LockEvent> for LogRecord {
    fn from(ev: LockEvent) -> Self {
        LogRecord::Lock {
            frame: ev.frame,
            rows_cleared: ev.rows_cleared,
            game_over: ev.game_over,
        }
    }
}

pub struct EventLog {
    out: Option<Box<dyn Write>>,
    buf: Vec<u8>,
}

impl EventLog {
    pub fn new(out: impl Write + 'static) -> Self {
        Self {
            out: Some(Box::new(out)),
            buf: Vec::with_capacity(256),
        }
    }

    /// Open `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn write(&mut self, record: &LogRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, record).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if out.write_all(&self.buf).is_err() {
            self.out = None;
        }
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Shared(Rc<RefCell<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn records_are_tagged_json_lines() {
        let shared = Shared::default();
        let mut log = EventLog::new(shared.clone());
        log.write(&LogRecord::Reset { frame: 3 });
        log.write(&LogRecord::from(LockEvent {
            frame: 9,
            rows_cleared: 2,
            game_over: false,
        }));

        let text = String::from_utf8(shared.0.borrow().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["type"], "reset");
        assert_eq!(first["frame"], 3);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["type"], "lock");
        assert_eq!(second["rows_cleared"], 2);
    }

    #[test]
    fn write_error_disables_the_log() {
        let mut log = EventLog::new(Broken);
        assert!(log.is_enabled());
        log.write(&LogRecord::Reset { frame: 0 });
        assert!(!log.is_enabled());
        log.write(&LogRecord::Reset { frame: 1 });
    }
}
