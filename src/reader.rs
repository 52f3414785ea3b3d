//! Forward-only byte cursor over the binary.

use std::io::{self, Read};

use crate::error::{Error, Result};
use crate::section::{AddressSpan, SectionName};

/// Reads byte ranges from a source in ascending offset order without seeking.
pub struct ByteCursor<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Discards up to `n` bytes, returning how many were actually skipped.
    pub fn skip(&mut self, n: u64) -> io::Result<u64> {
        let skipped = io::copy(&mut (&mut self.inner).take(n), &mut io::sink())?;
        self.position += skipped;
        Ok(skipped)
    }

    /// Reads up to `n` bytes. The result is shorter than `n` only at end of input.
    pub fn read_exact(&mut self, n: u64) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner).take(n).read_to_end(&mut buf)?;
        self.position += buf.len() as u64;
        Ok(buf)
    }

    /// Returns exactly the bytes of `span` on behalf of `section`.
    pub fn read_span(&mut self, section: SectionName, span: AddressSpan) -> Result<Vec<u8>> {
        let truncated = |available: u64| Error::TruncatedRead {
            section,
            offset: span.start,
            wanted: span.length,
            available,
        };

        let Some(gap) = span.start.checked_sub(self.position) else {
            return Err(Error::layout(
                section,
                format!(
                    "file offset {:#x} overlaps the previous section ending at {:#x}",
                    span.start, self.position
                ),
            ));
        };

        if self.skip(gap).map_err(|e| io_error(section, e))? < gap {
            return Err(truncated(0));
        }

        let bytes = self.read_exact(span.length).map_err(|e| io_error(section, e))?;
        if (bytes.len() as u64) < span.length {
            return Err(truncated(bytes.len() as u64));
        }
        Ok(bytes)
    }
}

fn io_error(section: SectionName, source: io::Error) -> Error {
    Error::Read { section, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINARY: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

    #[test]
    fn reads_spans_in_order() {
        let mut cursor = ByteCursor::new(&BINARY[..]);
        assert_eq!(
            cursor.read_span(SectionName::Text, AddressSpan::new(2, 3)).unwrap(),
            vec![2, 3, 4]
        );
        assert_eq!(cursor.position, 5);
        assert_eq!(
            cursor.read_span(SectionName::Data, AddressSpan::new(8, 4)).unwrap(),
            vec![8, 9, 10, 11]
        );
        assert_eq!(cursor.position, 12);
    }

    #[test]
    fn adjacent_spans_need_no_skip() {
        let mut cursor = ByteCursor::new(&BINARY[..]);
        cursor.read_span(SectionName::Text, AddressSpan::new(0, 4)).unwrap();
        assert_eq!(
            cursor.read_span(SectionName::Data, AddressSpan::new(4, 2)).unwrap(),
            vec![4, 5]
        );
    }

    #[test]
    fn short_source_is_truncated_read() {
        let mut cursor = ByteCursor::new(&BINARY[..]);
        match cursor.read_span(SectionName::Data, AddressSpan::new(10, 4)).unwrap_err() {
            Error::TruncatedRead { section, offset, wanted, available } => {
                assert_eq!(section, SectionName::Data);
                assert_eq!((offset, wanted, available), (10, 4, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn skipping_past_the_end_is_truncated_read() {
        let mut cursor = ByteCursor::new(&BINARY[..]);
        assert!(matches!(
            cursor.read_span(SectionName::GlobalOffsetTable, AddressSpan::new(20, 1)),
            Err(Error::TruncatedRead { available: 0, .. })
        ));
    }

    #[test]
    fn backward_request_is_invalid_layout() {
        let mut cursor = ByteCursor::new(&BINARY[..]);
        cursor.read_span(SectionName::Text, AddressSpan::new(0, 8)).unwrap();
        assert!(matches!(
            cursor.read_span(SectionName::Data, AddressSpan::new(4, 4)),
            Err(Error::InvalidLayout { section: SectionName::Data, .. })
        ));
    }
}
