//! Record body normalization.
//!
//! Every byte of a record body outside {A,T,C,G} becomes `A`. Headers are
//! never touched. Running the sanitizer twice changes nothing.

use std::ops::Range;

use tracing::debug;

use super::header::{record_spans, HeaderLayout};
use super::{SeqBuffer, ScanResult};

/// Replacement for any out-of-alphabet byte.
pub const FILL_BASE: u8 = b'A';

/// Whether `b` is one of the four canonical bases (uppercase only).
#[inline]
pub fn is_canonical_base(b: u8) -> bool {
    matches!(b, b'A' | b'T' | b'C' | b'G')
}

/// Normalizes `[start, end)` in place, returning how many bytes changed.
pub fn normalize_record(buffer: &mut SeqBuffer, range: Range<usize>) -> ScanResult<usize> {
    let mut replaced = 0;
    for b in buffer.span_mut(range)? {
        if !is_canonical_base(*b) {
            *b = FILL_BASE;
            replaced += 1;
        }
    }
    Ok(replaced)
}

/// Normalizes every record body of the buffer.
pub fn normalize_records(buffer: &mut SeqBuffer, layout: &HeaderLayout) -> ScanResult<usize> {
    let mut total = 0;
    for span in record_spans(buffer, layout)? {
        let replaced = normalize_record(buffer, span.body.clone())?;
        if replaced > 0 {
            debug!(
                "Record at {}: replaced {} character(s) in body {}..{}",
                span.header.start, replaced, span.body.start, span.body.end
            );
        }
        total += replaced;
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::header::locate_first_header_end;
    use crate::scan::ScanError;

    #[test]
    fn test_normalize_record() {
        let mut buffer = SeqBuffer::from_text(">S1ACNGTx-");
        let replaced = normalize_record(&mut buffer, 3..10).unwrap();
        assert_eq!(replaced, 3);
        assert_eq!(buffer.as_bytes(), b">S1ACAGTAA");
    }

    #[test]
    fn test_lowercase_is_replaced() {
        let mut buffer = SeqBuffer::from_text("acgt");
        normalize_record(&mut buffer, 0..4).unwrap();
        assert_eq!(buffer.as_bytes(), b"AAAA");
    }

    #[test]
    fn test_invalid_range() {
        let mut buffer = SeqBuffer::from_text("ACGT");
        assert!(matches!(
            normalize_record(&mut buffer, 2..5),
            Err(ScanError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_headers_untouched() {
        let mut buffer = SeqBuffer::from_text(">seq_1ACNNT\n>seq_2ryGG");
        let layout = locate_first_header_end(&buffer, "eq_1").unwrap();
        let replaced = normalize_records(&mut buffer, &layout).unwrap();
        assert_eq!(replaced, 4);
        assert_eq!(buffer.as_bytes(), b">seq_1ACAAT>seq_2AAGG");
    }

    #[test]
    fn test_idempotent() {
        let mut buffer = SeqBuffer::from_text(">S1NNACGU>S2xyz");
        let layout = locate_first_header_end(&buffer, "S1").unwrap();
        normalize_records(&mut buffer, &layout).unwrap();
        let once = buffer.clone();
        assert_eq!(normalize_records(&mut buffer, &layout).unwrap(), 0);
        assert_eq!(buffer, once);
    }

    #[test]
    fn test_bodies_only_canonical() {
        let mut buffer = SeqBuffer::from_text(">H01 N-ry.ACGT*\n>H02 acgtTGCA\n>H03 ");
        let layout = locate_first_header_end(&buffer, "H01 ").unwrap();
        normalize_records(&mut buffer, &layout).unwrap();
        for span in record_spans(&buffer, &layout).unwrap() {
            let body = &buffer.as_bytes()[span.body];
            assert!(body.iter().all(|&b| is_canonical_base(b)));
            assert_eq!(buffer.char_at(span.header.start), Some(b'>'));
        }
    }
}
