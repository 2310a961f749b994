//! Open reading frame search.
//!
//! Codons are read in non-overlapping triplets from a start codon until the
//! first in-frame stop codon:
//!
//! ```text
//! CC ATG AAA TTT TAA GG
//!    |-----------------|   one ORF, resume right after TAA
//! ```
//!
//! A search never crosses a header delimiter, so an ORF always lies inside
//! a single record. Unterminated frames are dropped.

use super::{SeqBuffer, ScanError, ScanResult, DELIMITER};

/// Codon opening a reading frame.
pub const START_CODON: &[u8; 3] = b"ATG";

/// Codons closing a reading frame.
pub const STOP_CODONS: [&[u8; 3]; 3] = [b"TAA", b"TGA", b"TAG"];

const CODON_LEN: usize = 3;

/// An ORF as `[start, end)`, stop codon included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrfSpan {
    pub start: usize,
    pub end: usize,
}

impl OrfSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Number of codons, start and stop included.
    pub fn codon_count(&self) -> usize {
        self.len() / CODON_LEN
    }

    /// Offset from which the next search in the same record resumes.
    pub fn resume(&self) -> usize {
        self.end
    }
}

/// Outcome of one ORF search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrfSearch {
    /// A complete ORF was found
    Found(OrfSpan),
    /// No further ORF in this record; `resume` is where scanning stopped
    EndOfRecord { resume: usize },
}

/// Whether `codon` is the start codon.
#[inline]
pub fn is_start_codon(codon: &[u8]) -> bool {
    codon == START_CODON
}

/// Whether `codon` is one of the stop codons.
#[inline]
pub fn is_stop_codon(codon: &[u8]) -> bool {
    STOP_CODONS.iter().any(|stop| codon == *stop)
}

/// Finds the leftmost ORF starting at or after `start`.
///
/// Offsets with fewer than three bytes left, `start == len` included, end
/// the record. Offsets past the end of the buffer are a caller error.
pub fn find_next_orf(buffer: &SeqBuffer, start: usize) -> ScanResult<OrfSearch> {
    let bytes = buffer.as_bytes();
    let len = bytes.len();
    if start > len {
        return Err(ScanError::OutOfRange { offset: start, len });
    }

    // Leftmost start codon that still leaves room for one more triplet.
    let mut first = start;
    loop {
        if first + 2 * CODON_LEN > len || bytes[first..first + CODON_LEN + 1].contains(&DELIMITER) {
            return Ok(OrfSearch::EndOfRecord { resume: first });
        }
        if is_start_codon(&bytes[first..first + CODON_LEN]) {
            break;
        }
        first += 1;
    }

    let mut last = first + CODON_LEN;
    while last + CODON_LEN <= len {
        let codon = &bytes[last..last + CODON_LEN];
        if codon.contains(&DELIMITER) {
            break;
        }
        if is_stop_codon(codon) {
            return Ok(OrfSearch::Found(OrfSpan {
                start: first,
                end: last + CODON_LEN,
            }));
        }
        last += CODON_LEN;
    }

    Ok(OrfSearch::EndOfRecord { resume: last })
}
