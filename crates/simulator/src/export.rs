//! JSON-lines snapshot export.

use selfstab_simulation::{RoundSnapshot, SnapshotSink};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// Writes one `{"round": r, "colors": [..]}` object per line.
///
/// [`SnapshotSink::on_round`] cannot fail, so the first write error is held
/// and returned by [`finish`](Self::finish); later rounds are dropped.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: u64,
    error: Option<io::Error>,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Create (or truncate) `path` and write snapshots to it.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> JsonLinesSink<W> {
    /// Write snapshots to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            written: 0,
            error: None,
        }
    }

    /// Snapshots written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and hand back the writer, or the first error hit.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_line(&mut self, snapshot: &RoundSnapshot) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, snapshot)?;
        self.writer.write_all(b"\n")
    }
}

impl<W: Write> SnapshotSink for JsonLinesSink<W> {
    fn on_round(&mut self, snapshot: &RoundSnapshot) {
        if self.error.is_some() {
            return;
        }
        match self.write_line(snapshot) {
            Ok(()) => self.written += 1,
            Err(err) => {
                warn!(round = snapshot.round, error = %err, "Snapshot export failed");
                self.error = Some(err);
            }
        }
    }
}
