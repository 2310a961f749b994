//! Output sinks.
//!
//! Every destination receives the exact same line sequence:
//! - [`WriterSink`] over stdout (console)
//! - [`WriterSink`] over a buffered file
//! - [`MemorySink`] feeding the interactive viewer
//!
//! [`emit`] drains a walk into any of them.

use std::fs::File;
use std::io::{self, BufWriter, StdoutLock, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::scan::walker::{LineKind, RecordWalker};
use crate::scan::{ScanError, ScanResult};

/// A destination for output lines.
pub trait LineSink {
    /// Writes one line.
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Finishes the output. Called once after the last line.
    fn close(&mut self) -> io::Result<()>;
}

/// Sink writing newline-terminated lines to any writer.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<StdoutLock<'static>> {
    /// Console sink.
    pub fn stdout() -> Self {
        Self::new(io::stdout().lock())
    }
}

impl WriterSink<BufWriter<File>> {
    /// File sink, truncating any existing file.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)
    }

    fn close(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Sink keeping lines in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    lines: Vec<String>,
    closed: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl LineSink for MemorySink {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.to_string());
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Counts gathered while emitting a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Records (headers) emitted
    pub records: usize,
    /// ORFs emitted
    pub orfs: usize,
    /// Lines written, separators included
    pub lines: usize,
    /// Non-fatal problems met during the walk
    pub diagnostics: Vec<String>,
}

/// Writes every line of `walk` to `sink`, then closes it.
///
/// Non-fatal scan errors are logged and kept in the summary; the first
/// fatal one aborts without closing the sink.
pub fn emit<S: LineSink + ?Sized>(walk: RecordWalker<'_>, sink: &mut S) -> ScanResult<WalkSummary> {
    let mut summary = WalkSummary::default();

    for item in walk {
        let line = match item {
            Ok(line) => line,
            Err(e) if !e.is_fatal() => {
                warn!("{}", e);
                summary.diagnostics.push(e.to_string());
                continue;
            }
            Err(e) => return Err(e),
        };

        match LineKind::of(line) {
            LineKind::Header => {
                summary.records += 1;
                debug!("Record {}: {}", summary.records, line);
            }
            LineKind::Orf => summary.orfs += 1,
            LineKind::Separator => {}
        }

        sink.write_line(line).map_err(ScanError::Sink)?;
        summary.lines += 1;
    }

    sink.close().map_err(ScanError::Sink)?;
    Ok(summary)
}

/// Writes already collected lines to `sink`, then closes it.
pub fn replay<S: LineSink + ?Sized>(lines: &[String], sink: &mut S) -> io::Result<()> {
    for line in lines {
        sink.write_line(line)?;
    }
    sink.close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{prepare, walk, SeqBuffer};

    const CORPUS: &str = ">SEQ2004\nATGAAATAA\n>SEQ2005\nATGTGA\n";

    #[test]
    fn test_memory_sink() {
        let mut buffer = SeqBuffer::from_text(CORPUS);
        let layout = prepare(&mut buffer, "2004").unwrap();
        let mut sink = MemorySink::new();
        let summary = emit(walk(&buffer, &layout), &mut sink).unwrap();

        assert!(sink.is_closed());
        assert_eq!(
            sink.lines(),
            [">SEQ2004", "ATGAAATAA", "", ">SEQ2005", "ATGTGA", ""]
        );
        assert_eq!(summary.records, 2);
        assert_eq!(summary.orfs, 2);
        assert_eq!(summary.lines, 6);
        assert!(summary.diagnostics.is_empty());
    }

    #[test]
    fn test_writer_sink_matches_memory_sink() {
        let mut buffer = SeqBuffer::from_text(CORPUS);
        let layout = prepare(&mut buffer, "2004").unwrap();

        let mut memory = MemorySink::new();
        emit(walk(&buffer, &layout), &mut memory).unwrap();

        let mut writer = WriterSink::new(Vec::new());
        emit(walk(&buffer, &layout), &mut writer).unwrap();
        let written = String::from_utf8(writer.into_inner()).unwrap();

        let mut expected = memory.lines().join("\n");
        expected.push('\n');
        assert_eq!(written, expected);
    }

    #[test]
    fn test_file_sink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orfs.txt");

        let mut buffer = SeqBuffer::from_text(CORPUS);
        let layout = prepare(&mut buffer, "2004").unwrap();
        let mut sink = WriterSink::create(&path).unwrap();
        emit(walk(&buffer, &layout), &mut sink).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, ">SEQ2004\nATGAAATAA\n\n>SEQ2005\nATGTGA\n\n");
    }

    #[test]
    fn test_fatal_error_aborts() {
        let mut buffer = SeqBuffer::from_text(">SEQ2004ATGTAA>S");
        let layout = prepare(&mut buffer, "2004").unwrap();
        let mut sink = MemorySink::new();
        let result = emit(walk(&buffer, &layout), &mut sink);

        assert!(matches!(result, Err(ScanError::InvalidRange { .. })));
        assert_eq!(sink.lines().len(), 3);
        assert!(!sink.is_closed());
    }

    #[test]
    fn test_replay() {
        let lines = vec![">S1".to_string(), "ATGTAA".to_string(), String::new()];
        let mut sink = WriterSink::new(Vec::new());
        replay(&lines, &mut sink).unwrap();
        assert_eq!(sink.into_inner(), b">S1\nATGTAA\n\n");
    }

    #[test]
    fn test_dyn_sink() {
        let mut buffer = SeqBuffer::from_text(CORPUS);
        let layout = prepare(&mut buffer, "2004").unwrap();
        let mut sinks: Vec<Box<dyn LineSink>> = vec![
            Box::new(MemorySink::new()),
            Box::new(WriterSink::new(Vec::new())),
        ];
        for sink in sinks.iter_mut() {
            let summary = emit(walk(&buffer, &layout), sink.as_mut()).unwrap();
            assert_eq!(summary.orfs, 2);
        }
    }
}
