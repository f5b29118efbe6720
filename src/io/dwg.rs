//! DWG (binary) reading
//!
//! Only the file-header version tag is interpreted. The binary object data
//! is not parsed; a recognized file yields an empty model with the version
//! recorded so callers can report what they were given.

use crate::document::CadModel;
use crate::error::{ImportError, Result};
use byteorder::{ByteOrder, LittleEndian};

/// DWG version tags this reader recognizes
///
/// The tag dictates the section-locator format of the rest of the header;
/// none of those formats are parsed here.
const KNOWN_VERSIONS: &[&str] = &[
    "AC1014", // R14
    "AC1015", // 2000
    "AC1018", // 2004
    "AC1021", // 2007
    "AC1024", // 2010
    "AC1027", // 2013
    "AC1032", // 2018
];

/// DWG file reader (version sniffing only)
pub struct DwgParser;

impl DwgParser {
    /// Read the version tag and produce an empty model carrying it
    pub fn parse(bytes: &[u8]) -> Result<CadModel> {
        let version = Self::read_version(bytes)?;

        // Pre-2004 headers carry a section locator count at offset 0x15;
        // logged for diagnostics, the sections themselves are not read.
        if matches!(version.as_str(), "AC1014" | "AC1015") && bytes.len() >= 0x19 {
            let locator_count = LittleEndian::read_u32(&bytes[0x15..0x19]);
            log::debug!("DWG {}: {} section locator records", version, locator_count);
        }

        let mut model = CadModel::new();
        model.header.acad_version = version;
        Ok(model)
    }

    /// Extract and validate the 6-byte ASCII version tag
    fn read_version(bytes: &[u8]) -> Result<String> {
        if bytes.len() < 6 {
            return Err(ImportError::InvalidFormat(
                "DWG file too short for a version tag".to_string(),
            ));
        }
        let tag = std::str::from_utf8(&bytes[..6])
            .map_err(|_| ImportError::InvalidFormat("DWG version tag is not ASCII".to_string()))?;

        if !KNOWN_VERSIONS.contains(&tag) {
            return Err(ImportError::UnsupportedVersion(tag.to_string()));
        }
        Ok(tag.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_version_yields_empty_model() {
        let mut bytes = b"AC1027".to_vec();
        bytes.resize(64, 0);
        let model = DwgParser::parse(&bytes).unwrap();
        assert_eq!(model.header.acad_version, "AC1027");
        assert_eq!(model.entity_count(), 0);
        assert_eq!(model.layer_count(), 0);
    }

    #[test]
    fn test_unknown_version_rejected() {
        let bytes = b"AC1009rest-of-file".to_vec();
        let err = DwgParser::parse(&bytes).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedVersion(v) if v == "AC1009"));
    }

    #[test]
    fn test_truncated_file_rejected() {
        assert!(DwgParser::parse(b"AC1").is_err());
    }

    #[test]
    fn test_non_ascii_tag_rejected() {
        let bytes = vec![0xff, 0xfe, 0x00, 0x01, 0x02, 0x03];
        assert!(DwgParser::parse(&bytes).is_err());
    }
}
