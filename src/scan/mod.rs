//! Sequence scanning and ORF extraction.
//!
//! The scanner works on one in-memory buffer holding the whole corpus:
//!
//! ```text
//! >SEQ2004ATGAAATAACC>SEQ2005GGATGTGA
//! |------|           |------|
//!  header   body      header   body
//! ```
//!
//! Pipeline:
//! 1. [`header::locate_first_header_end`] measures the first header
//! 2. [`sanitize::normalize_records`] rewrites every body to {A,T,C,G}
//! 3. [`walker::walk`] lazily yields headers, ORFs and record separators
//!
//! [`walker::prepare`] runs steps 1 and 2.

pub mod buffer;
pub mod header;
pub mod orf;
pub mod sanitize;
pub mod walker;

use std::io;

use thiserror::Error;

pub use buffer::SeqBuffer;
pub use header::{HeaderLayout, RecordSpan};
pub use orf::{OrfSearch, OrfSpan};
pub use walker::{prepare, walk, RecordWalker};

/// Character opening every header.
pub const DELIMITER: u8 = b'>';

/// Errors raised while loading or scanning a sequence buffer.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot read sequence source: {0}")]
    SourceUnavailable(#[source] io::Error),

    #[error("No header delimiter '>' in input")]
    NoHeader,

    #[error("Header marker must not be empty")]
    EmptyMarker,

    #[error("Header marker {marker:?} not found after the first '>'")]
    HeaderNotFound { marker: String },

    #[error("Scan offset {offset} out of range (buffer length {len})")]
    OutOfRange { offset: usize, len: usize },

    #[error("Invalid range {start}..{end} (buffer length {len})")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("Span {start}..{end} does not hold valid UTF-8 text")]
    NotText { start: usize, end: usize },

    #[error("Failed to write output: {0}")]
    Sink(#[source] io::Error),
}

impl ScanError {
    /// Whether the error must stop the whole walk.
    ///
    /// An out-of-range scan only aborts the record being scanned.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ScanError::OutOfRange { .. })
    }
}

/// Result type for scanning operations.
pub type ScanResult<T> = Result<T, ScanError>;
