//! The in-memory sequence buffer.
//!
//! Input lines are concatenated without separators, so a corpus such as
//!
//! ```text
//! >SEQ2004
//! ATGAAA
//! TAA
//! ```
//!
//! becomes the single buffer `>SEQ2004ATGAAATAA`. Every scanner works on
//! offsets into this buffer.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Range;
use std::path::Path;

use super::{ScanError, ScanResult};

/// Owned, mutable sequence text.
///
/// The buffer is never resized after loading; only the sanitizer rewrites
/// bytes in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SeqBuffer {
    data: Vec<u8>,
}

impl SeqBuffer {
    /// Builds a buffer from text, dropping line terminators.
    pub fn from_text(text: &str) -> Self {
        let mut data = Vec::with_capacity(text.len());
        for line in text.lines() {
            data.extend_from_slice(line.as_bytes());
        }
        Self { data }
    }

    /// Reads every line from `reader`, in order, into one buffer.
    pub fn from_reader<R: BufRead>(reader: R) -> ScanResult<Self> {
        let mut data = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(ScanError::SourceUnavailable)?;
            data.extend_from_slice(line.as_bytes());
        }
        Ok(Self { data })
    }

    /// Loads a whole sequence file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use orfscan::scan::SeqBuffer;
    ///
    /// let buffer = SeqBuffer::open("sequences.txt").unwrap();
    /// println!("Loaded {} characters", buffer.len());
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> ScanResult<Self> {
        let file = File::open(path).map_err(ScanError::SourceUnavailable)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Byte at `offset`, if any.
    pub fn char_at(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns `[start, end)` as text.
    ///
    /// Fails when `end > len` or `start > end`. Hot loops check bounds
    /// themselves before calling.
    pub fn text(&self, start: usize, end: usize) -> ScanResult<&str> {
        let bytes = self.span(start..end)?;
        std::str::from_utf8(bytes).map_err(|_| ScanError::NotText { start, end })
    }

    pub(crate) fn span(&self, range: Range<usize>) -> ScanResult<&[u8]> {
        self.check_range(&range)?;
        Ok(&self.data[range])
    }

    pub(crate) fn span_mut(&mut self, range: Range<usize>) -> ScanResult<&mut [u8]> {
        self.check_range(&range)?;
        Ok(&mut self.data[range])
    }

    fn check_range(&self, range: &Range<usize>) -> ScanResult<()> {
        if range.end > self.data.len() || range.start > range.end {
            return Err(ScanError::InvalidRange {
                start: range.start,
                end: range.end,
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lines_concatenated() {
        let buffer = SeqBuffer::from_text(">SEQ2004\nATGAAA\r\nTAA\n");
        assert_eq!(buffer.as_bytes(), b">SEQ2004ATGAAATAA");
        assert_eq!(buffer.len(), 17);
    }

    #[test]
    fn test_char_at() {
        let buffer = SeqBuffer::from_text(">AC");
        assert_eq!(buffer.char_at(0), Some(b'>'));
        assert_eq!(buffer.char_at(2), Some(b'C'));
        assert_eq!(buffer.char_at(3), None);
    }

    #[test]
    fn test_text_ranges() {
        let buffer = SeqBuffer::from_text(">SEQ1ACGT");
        assert_eq!(buffer.text(0, 5).unwrap(), ">SEQ1");
        assert_eq!(buffer.text(9, 9).unwrap(), "");
        assert!(matches!(
            buffer.text(5, 10),
            Err(ScanError::InvalidRange { start: 5, end: 10, len: 9 })
        ));
        assert!(matches!(buffer.text(6, 5), Err(ScanError::InvalidRange { .. })));
    }

    #[test]
    fn test_text_splitting_multibyte_char() {
        let buffer = SeqBuffer::from_text(">é");
        assert!(matches!(buffer.text(0, 2), Err(ScanError::NotText { .. })));
        assert_eq!(buffer.text(0, 3).unwrap(), ">é");
    }

    #[test]
    fn test_open_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">SEQ2004\nATG\nTAA\n").unwrap();
        let buffer = SeqBuffer::open(file.path()).unwrap();
        assert_eq!(buffer.as_bytes(), b">SEQ2004ATGTAA");
    }

    #[test]
    fn test_open_missing_file() {
        let result = SeqBuffer::open("/nonexistent/sequences.txt");
        assert!(matches!(result, Err(ScanError::SourceUnavailable(_))));
    }
}
