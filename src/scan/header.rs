//! Header discovery.
//!
//! Headers start at `>` and all share the length of the first header. That
//! length is measured once from a caller-supplied marker, usually the last
//! four characters of the first header.
//!
//! Precondition: every header in the buffer has the same length. It is not
//! re-checked per record; a longer header leaks its tail into the body that
//! follows, a shorter one swallows the first bases of its body.

use std::ops::Range;

use super::{SeqBuffer, ScanError, ScanResult, DELIMITER};

/// Where the first header sits and how long every header is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Offset of the first `>`
    pub first: usize,
    /// Length of every header, delimiter included
    pub length: usize,
}

/// One header and the body that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSpan {
    pub header: Range<usize>,
    pub body: Range<usize>,
}

/// Finds the first header and measures it.
///
/// The header ends right after the first occurrence of `marker` at or after
/// the first delimiter. The search never runs past the buffer.
pub fn locate_first_header_end(buffer: &SeqBuffer, marker: &str) -> ScanResult<HeaderLayout> {
    if marker.is_empty() {
        return Err(ScanError::EmptyMarker);
    }

    let bytes = buffer.as_bytes();
    let first = bytes
        .iter()
        .position(|&b| b == DELIMITER)
        .ok_or(ScanError::NoHeader)?;

    let needle = marker.as_bytes();
    let window_start = bytes[first..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| first + pos)
        .ok_or_else(|| ScanError::HeaderNotFound {
            marker: marker.to_string(),
        })?;

    let length = window_start + needle.len() - first;
    Ok(HeaderLayout { first, length })
}

/// Returns the first delimiter at or after `from`, `None` when no header is
/// left.
///
/// `from` must point inside the buffer.
pub fn next_header(buffer: &SeqBuffer, from: usize) -> ScanResult<Option<usize>> {
    if from >= buffer.len() {
        return Err(ScanError::OutOfRange {
            offset: from,
            len: buffer.len(),
        });
    }

    Ok(buffer.as_bytes()[from..]
        .iter()
        .position(|&b| b == DELIMITER)
        .map(|pos| from + pos))
}

/// Lists every record, header spans clamped to the buffer end.
pub fn record_spans(buffer: &SeqBuffer, layout: &HeaderLayout) -> ScanResult<Vec<RecordSpan>> {
    let len = buffer.len();
    let mut spans = Vec::new();
    let mut head = match next_header(buffer, layout.first)? {
        Some(head) => head,
        None => return Ok(spans),
    };

    loop {
        let body_start = (head + layout.length).min(len);
        let next = if body_start < len {
            next_header(buffer, body_start)?
        } else {
            None
        };
        let body_end = next.unwrap_or(len);

        spans.push(RecordSpan {
            header: head..body_start,
            body: body_start..body_end,
        });

        match next {
            Some(offset) => head = offset,
            None => break,
        }
    }

    Ok(spans)
}
