//! JSON-lines trace of presenter notifications.
//!
//! Each notification becomes one line:
//!
//! ```text
//! {"seq":1,"type":"turn_banner","text":"Current Turn: Player X"}
//! {"seq":2,"type":"cell","index":4,"content":"X","flags":{"taken":true,"selected":false,"win":false}}
//! {"seq":3,"type":"timer","player":"O","time":"2:59"}
//! ```
//!
//! Write failures never interrupt the game: the first error is kept and
//! reported through [`TraceWriter::take_error`], later events are dropped.

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

use crate::core::GameSnapshot;
use crate::presenter::{PresentationEvent, Presenter};
use crate::types::{Cell, CellFlags, Player};

#[derive(Serialize)]
struct EventRecord<'a> {
    seq: u64,
    #[serde(flatten)]
    event: &'a PresentationEvent,
}

#[derive(Serialize)]
struct SnapshotRecord<'a> {
    seq: u64,
    #[serde(rename = "type")]
    kind: &'static str,
    snapshot: &'a GameSnapshot,
}

/// Presenter that appends every notification to a writer as JSON.
pub struct TraceWriter<W: Write> {
    out: W,
    seq: u64,
    buf: Vec<u8>,
    error: Option<io::Error>,
}

impl TraceWriter<BufWriter<std::fs::File>> {
    /// Append to the file at `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open trace file {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            buf: Vec::with_capacity(256),
            error: None,
        }
    }

    /// Number of records written so far
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, event: &PresentationEvent) {
        let seq = self.seq + 1;
        self.write_record(&EventRecord { seq, event });
    }

    /// Append a full snapshot line (`"type":"snapshot"`).
    pub fn record_snapshot(&mut self, snapshot: &GameSnapshot) {
        let seq = self.seq + 1;
        self.write_record(&SnapshotRecord {
            seq,
            kind: "snapshot",
            snapshot,
        });
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_record<T: Serialize>(&mut self, record: &T) {
        if self.error.is_some() {
            return;
        }
        self.buf.clear();
        if let Err(e) = serde_json::to_writer(&mut self.buf, record) {
            warn!(error = %e, "trace record could not be encoded");
            return;
        }
        self.buf.push(b'\n');
        match self.out.write_all(&self.buf) {
            Ok(()) => self.seq += 1,
            Err(e) => {
                warn!(error = %e, "trace write failed, tracing disabled");
                self.error = Some(e);
            }
        }
    }
}

impl<W: Write> Presenter for TraceWriter<W> {
    fn render_cell(&mut self, index: u8, content: Cell, flags: CellFlags) {
        self.record(&PresentationEvent::Cell {
            index,
            content,
            flags,
        });
    }

    fn render_turn_banner(&mut self, text: &str) {
        self.record(&PresentationEvent::TurnBanner {
            text: text.to_string(),
        });
    }

    fn render_timer(&mut self, player: Player, formatted: &str) {
        self.record(&PresentationEvent::Timer {
            player,
            time: formatted.to_string(),
        });
    }

    fn show_end_popup(&mut self, message: &str) {
        self.record(&PresentationEvent::ShowPopup {
            message: message.to_string(),
        });
    }

    fn hide_end_popup(&mut self) {
        self.record(&PresentationEvent::HidePopup);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_json_object_per_line() {
        let mut w = TraceWriter::new(Vec::new());
        w.render_turn_banner("Current Turn: Player X");
        w.render_timer(Player::O, "0:09");
        w.hide_end_popup();
        assert_eq!(w.seq(), 3);

        let out = String::from_utf8(w.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"seq":1,"type":"turn_banner","text":"Current Turn: Player X"}"#,
                r#"{"seq":2,"type":"timer","player":"O","time":"0:09"}"#,
                r#"{"seq":3,"type":"hide_popup"}"#,
            ]
        );
    }

    #[test]
    fn cell_record_carries_flags() {
        let mut w = TraceWriter::new(Vec::new());
        w.render_cell(
            4,
            Some(Player::X),
            CellFlags {
                taken: true,
                selected: false,
                win: true,
            },
        );
        let out = String::from_utf8(w.into_inner()).unwrap();
        assert_eq!(
            out.trim_end(),
            r#"{"seq":1,"type":"cell","index":4,"content":"X","flags":{"taken":true,"selected":false,"win":true}}"#
        );
    }

    #[test]
    fn snapshot_record_is_tagged() {
        let mut w = TraceWriter::new(Vec::new());
        w.record_snapshot(&GameSnapshot::default());
        let out = String::from_utf8(w.into_inner()).unwrap();
        assert!(out.starts_with(r#"{"seq":1,"type":"snapshot","snapshot":{"#));
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept_and_writing_stops() {
        let mut w = TraceWriter::new(Broken);
        w.hide_end_popup();
        w.hide_end_popup();
        assert_eq!(w.seq(), 0);
        assert!(w.take_error().is_some());
    }
}
