//! Record walking.
//!
//! [`walk`] turns a prepared buffer into the output line sequence:
//!
//! ```text
//! >SEQ2004        header, verbatim
//! ATGAAATAA       one line per ORF
//!                 blank separator closing the record
//! >SEQ2005
//! ATGTGA
//!
//! ```
//!
//! Lines borrow from the buffer, and walking only reads it, so the same
//! buffer can be walked again with identical results.

use tracing::debug;

use super::header::{locate_first_header_end, next_header, HeaderLayout};
use super::orf::{find_next_orf, OrfSearch};
use super::sanitize::normalize_records;
use super::{SeqBuffer, ScanError, ScanResult};

/// Measures headers and sanitizes every record body.
///
/// Must run before [`walk`].
pub fn prepare(buffer: &mut SeqBuffer, marker: &str) -> ScanResult<HeaderLayout> {
    let layout = locate_first_header_end(buffer, marker)?;
    debug!(
        "First header at {} ({} characters)",
        layout.first, layout.length
    );
    let replaced = normalize_records(buffer, &layout)?;
    debug!("Sanitized record bodies, {} character(s) replaced", replaced);
    Ok(layout)
}

/// Starts a walk over a prepared buffer.
pub fn walk<'a>(buffer: &'a SeqBuffer, layout: &HeaderLayout) -> RecordWalker<'a> {
    RecordWalker {
        buffer,
        header_length: layout.length,
        state: WalkState::FindHeader { from: layout.first },
    }
}

/// What a line produced by the walk stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Orf,
    Separator,
}

impl LineKind {
    /// Classifies an emitted line.
    pub fn of(line: &str) -> Self {
        if line.is_empty() {
            LineKind::Separator
        } else if line.starts_with('>') {
            LineKind::Header
        } else {
            LineKind::Orf
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalkState {
    /// Look for the next header from this offset
    FindHeader { from: usize },
    /// Emit the header starting here
    AtHeader { head: usize },
    /// Look for the next ORF from this offset
    Scanning { cursor: usize },
    /// Emit the blank line closing the record
    Separator { cursor: usize },
    Done,
}

/// Lazy iterator over the output lines of a walk.
///
/// Fatal errors are yielded once and end the walk. An out-of-range ORF
/// search only ends the current record.
#[derive(Debug, Clone)]
pub struct RecordWalker<'a> {
    buffer: &'a SeqBuffer,
    header_length: usize,
    state: WalkState,
}

impl<'a> RecordWalker<'a> {
    fn step(&mut self) -> Option<ScanResult<&'a str>> {
        let len = self.buffer.len();
        loop {
            match self.state {
                WalkState::Done => return None,

                WalkState::FindHeader { from } => {
                    if from >= len {
                        self.state = WalkState::Done;
                        return None;
                    }
                    match next_header(self.buffer, from) {
                        Ok(Some(head)) => self.state = WalkState::AtHeader { head },
                        Ok(None) => {
                            self.state = WalkState::Done;
                            return None;
                        }
                        Err(e) => return Some(self.fail(e)),
                    }
                }

                WalkState::AtHeader { head } => {
                    let end = head + self.header_length;
                    return match self.buffer.text(head, end) {
                        Ok(header) => {
                            self.state = WalkState::Scanning { cursor: end };
                            Some(Ok(header))
                        }
                        Err(e) => Some(self.fail(e)),
                    };
                }

                WalkState::Scanning { cursor } => match find_next_orf(self.buffer, cursor) {
                    Ok(OrfSearch::Found(span)) => {
                        self.state = WalkState::Scanning {
                            cursor: span.resume(),
                        };
                        return Some(self.buffer.text(span.start, span.end));
                    }
                    Ok(OrfSearch::EndOfRecord { .. }) => {
                        self.state = WalkState::Separator { cursor };
                    }
                    Err(e) if !e.is_fatal() => {
                        self.state = WalkState::Separator { cursor };
                        return Some(Err(e));
                    }
                    Err(e) => return Some(self.fail(e)),
                },

                WalkState::Separator { cursor } => {
                    self.state = WalkState::FindHeader { from: cursor };
                    return Some(Ok(""));
                }
            }
        }
    }

    fn fail(&mut self, error: ScanError) -> ScanResult<&'a str> {
        self.state = WalkState::Done;
        Err(error)
    }
}

impl<'a> Iterator for RecordWalker<'a> {
    type Item = ScanResult<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}
