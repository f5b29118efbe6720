//! DXF code/value pair stream reader

use crate::error::{ImportError, Result};
use crate::types::Point3D;
use encoding_rs::Encoding;
use std::io::{BufReader, Read};

/// A DXF group code / value pair
///
/// The value is kept as the raw trimmed text of the line following the code;
/// typed accessors parse on demand.
#[derive(Debug, Clone)]
pub struct DxfCodePair {
    /// The DXF group code; -1 when the code line was malformed
    pub code: i32,
    /// Raw trimmed value text
    pub value: String,
}

impl DxfCodePair {
    /// Create a new code/value pair
    pub fn new(code: i32, value: impl Into<String>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }

    /// Get the value as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Parse the value as a double
    pub fn as_f64(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }

    /// Parse the value as an i16
    pub fn as_i16(&self) -> Option<i16> {
        self.value.trim().parse::<i16>().ok()
    }

    /// Parse the value as an i32
    pub fn as_i32(&self) -> Option<i32> {
        self.value.trim().parse::<i32>().ok()
    }

    /// Is this the section/entity marker code 0?
    pub fn is_marker(&self, value: &str) -> bool {
        self.code == 0 && self.value == value
    }
}

/// Reads (group code, value) pairs from an ASCII DXF stream
///
/// Each pair occupies two consecutive lines. A malformed group code becomes
/// -1 so callers can skip the pair without aborting the whole read.
pub struct DxfStreamReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    peeked_pair: Option<DxfCodePair>,
    /// Non-UTF8 fallback encoding. `None` means Latin-1 (byte-to-char).
    encoding: Option<&'static Encoding>,
}

impl<R: Read> DxfStreamReader<R> {
    /// Create a new stream reader
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            peeked_pair: None,
            encoding: None,
        }
    }

    /// Set the fallback encoding for non-UTF8 bytes
    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = Some(encoding);
    }

    /// Current 1-based line number (for diagnostics)
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Read a single line, handling non-UTF8 bytes gracefully.
    /// Uses the configured encoding for fallback, or Latin-1 if none set.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();

        loop {
            let mut byte = [0u8; 1];
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    if bytes.is_empty() {
                        return Ok(None);
                    }
                    break;
                }
                Ok(_) => {
                    if byte[0] == b'\n' {
                        break;
                    }
                    bytes.push(byte[0]);
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.line_number += 1;

        // Try UTF-8 first, then the configured encoding, then Latin-1
        let line = match String::from_utf8(bytes.clone()) {
            Ok(s) => s,
            Err(_) => {
                if let Some(enc) = self.encoding {
                    let (decoded, _, _) = enc.decode(&bytes);
                    decoded.into_owned()
                } else {
                    // Latin-1 is a 1:1 mapping of bytes 0-255 to code points
                    bytes.iter().map(|&b| b as char).collect()
                }
            }
        };

        Ok(Some(line.trim().to_string()))
    }

    fn read_pair_internal(&mut self) -> Result<Option<DxfCodePair>> {
        let code_line = match self.read_line()? {
            Some(line) => line,
            None => return Ok(None),
        };

        // A malformed group code becomes -1; the caller skips it
        let code = code_line.trim().parse::<i32>().unwrap_or(-1);

        let value_line = match self.read_line()? {
            Some(line) => line,
            None => {
                return Err(ImportError::Parse(format!(
                    "Unexpected EOF after code {} at line {}",
                    code, self.line_number
                )))
            }
        };

        Ok(Some(DxfCodePair::new(code, value_line)))
    }

    /// Read the next code/value pair, skipping malformed group codes
    pub fn read_pair(&mut self) -> Result<Option<DxfCodePair>> {
        if let Some(pair) = self.peeked_pair.take() {
            return Ok(Some(pair));
        }

        while let Some(pair) = self.read_pair_internal()? {
            if pair.code >= 0 {
                return Ok(Some(pair));
            }
            log::debug!(
                "skipping malformed group code near line {}",
                self.line_number
            );
        }
        Ok(None)
    }

    /// Push a pair back to be returned by the next `read_pair` call
    pub fn push_back(&mut self, pair: DxfCodePair) {
        self.peeked_pair = Some(pair);
    }

    /// Skip forward until the next code-0 marker, which is pushed back
    pub fn skip_to_marker(&mut self) -> Result<()> {
        while let Some(pair) = self.read_pair()? {
            if pair.code == 0 {
                self.push_back(pair);
                break;
            }
        }
        Ok(())
    }
}

/// Accumulates X/Y/Z components arriving as separate code pairs
///
/// A point materializes once any component has been seen; missing components
/// default to zero rather than leaving the point null.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointAccumulator {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

impl PointAccumulator {
    /// Create a new empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one component: axis 0 = X, 1 = Y, 2 = Z
    pub fn set(&mut self, axis: u8, value: f64) {
        match axis {
            0 => self.x = Some(value),
            1 => self.y = Some(value),
            _ => self.z = Some(value),
        }
    }

    /// Has any component been seen?
    pub fn is_set(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.z.is_some()
    }

    /// Materialize the point; `None` when no component was ever seen
    pub fn point(&self) -> Option<Point3D> {
        if self.is_set() {
            Some(Point3D::new(
                self.x.unwrap_or(0.0),
                self.y.unwrap_or(0.0),
                self.z.unwrap_or(0.0),
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn reader(data: &str) -> DxfStreamReader<Cursor<Vec<u8>>> {
        DxfStreamReader::new(Cursor::new(data.as_bytes().to_vec()))
    }

    #[test]
    fn test_read_simple_pair() {
        let mut r = reader("0\nSECTION\n");
        let pair = r.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 0);
        assert_eq!(pair.value, "SECTION");
    }

    #[test]
    fn test_read_typed_values() {
        let mut r = reader("70\n42\n10\n123.456\n");
        let flags = r.read_pair().unwrap().unwrap();
        assert_eq!(flags.as_i16(), Some(42));
        let coord = r.read_pair().unwrap().unwrap();
        assert_eq!(coord.as_f64(), Some(123.456));
    }

    #[test]
    fn test_malformed_code_is_skipped() {
        let mut r = reader("abc\nJUNK\n0\nLINE\n");
        let pair = r.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 0);
        assert_eq!(pair.value, "LINE");
    }

    #[test]
    fn test_crlf_and_padding_trimmed() {
        let mut r = reader("  0\r\nSECTION\r\n");
        let pair = r.read_pair().unwrap().unwrap();
        assert_eq!(pair.code, 0);
        assert_eq!(pair.value, "SECTION");
    }

    #[test]
    fn test_push_back() {
        let mut r = reader("0\nSECTION\n2\nHEADER\n");
        let pair = r.read_pair().unwrap().unwrap();
        r.push_back(pair);
        let again = r.read_pair().unwrap().unwrap();
        assert_eq!(again.value, "SECTION");
        let next = r.read_pair().unwrap().unwrap();
        assert_eq!(next.code, 2);
    }

    #[test]
    fn test_eof_mid_pair_errors() {
        let mut r = reader("0\n");
        assert!(r.read_pair().is_err());
    }

    #[test]
    fn test_non_utf8_falls_back_to_latin1() {
        let mut bytes = b"1\n".to_vec();
        bytes.extend_from_slice(&[0xC4u8, 0xD6u8]); // "ÄÖ" in Latin-1
        bytes.push(b'\n');
        let mut r = DxfStreamReader::new(Cursor::new(bytes));
        let pair = r.read_pair().unwrap().unwrap();
        assert_eq!(pair.value, "\u{c4}\u{d6}");
    }

    #[test]
    fn test_point_accumulator() {
        let mut acc = PointAccumulator::new();
        assert!(acc.point().is_none());

        acc.set(0, 5.0);
        // Unset components default to zero
        assert_eq!(acc.point(), Some(Point3D::new(5.0, 0.0, 0.0)));

        acc.set(1, 3.0);
        acc.set(2, 1.0);
        assert_eq!(acc.point(), Some(Point3D::new(5.0, 3.0, 1.0)));
    }
}
