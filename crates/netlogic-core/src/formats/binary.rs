//! Compact binary encoding.
//!
//! Format: Header (5 bytes) + postcard-serialized blueprint.
//! - 4 bytes: Magic ("NLBP")
//! - 1 byte: Version
//!
//! Size and header are validated before the payload is decoded.

use super::check_boundary;
use crate::primitives::{self, MAX_DOCUMENT_BYTES};
use crate::{Blueprint, NetlogicError};

const HEADER_LEN: usize = 5;

/// The header that precedes every compact blueprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryHeader {
    pub magic: [u8; 4],
    pub version: u8,
}

impl BinaryHeader {
    /// Create a header with the current format version.
    #[must_use]
    pub fn new() -> Self {
        Self {
            magic: *primitives::MAGIC_BYTES,
            version: primitives::FORMAT_VERSION,
        }
    }

    /// Validate magic and version.
    pub fn validate(&self) -> Result<(), NetlogicError> {
        if &self.magic != primitives::MAGIC_BYTES {
            return Err(NetlogicError::DeserializationError(
                "Invalid magic bytes".to_string(),
            ));
        }
        if self.version != primitives::FORMAT_VERSION {
            return Err(NetlogicError::DeserializationError(format!(
                "Unsupported version: {} (expected {})",
                self.version,
                primitives::FORMAT_VERSION
            )));
        }
        Ok(())
    }

    /// Write header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.version;
        bytes
    }

    /// Read header from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, NetlogicError> {
        if bytes.len() < HEADER_LEN {
            return Err(NetlogicError::DeserializationError(
                "Header too short".to_string(),
            ));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&bytes[0..4]);
        Ok(Self {
            magic,
            version: bytes[4],
        })
    }
}

impl Default for BinaryHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a blueprint (header + payload).
pub fn blueprint_to_bytes(blueprint: &Blueprint) -> Result<Vec<u8>, NetlogicError> {
    let payload = postcard::to_stdvec(blueprint)
        .map_err(|e| NetlogicError::SerializationError(e.to_string()))?;

    let mut result = Vec::with_capacity(HEADER_LEN + payload.len());
    result.extend_from_slice(&BinaryHeader::new().to_bytes());
    result.extend_from_slice(&payload);
    Ok(result)
}

/// Decode a blueprint.
pub fn blueprint_from_bytes(bytes: &[u8]) -> Result<Blueprint, NetlogicError> {
    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(NetlogicError::LimitExceeded {
            what: "document size",
            actual: bytes.len(),
            max: MAX_DOCUMENT_BYTES,
        });
    }

    let header = BinaryHeader::from_bytes(bytes)?;
    header.validate()?;

    let blueprint: Blueprint = postcard::from_bytes(&bytes[HEADER_LEN..]).map_err(|e| {
        NetlogicError::DeserializationError(format!("Failed to decode blueprint: {}", e))
    })?;
    check_boundary(&blueprint)?;
    Ok(blueprint)
}

/// BLAKE3 fingerprint (hex) of the compact encoding.
///
/// Two blueprints share a fingerprint exactly when they are field-for-field equal.
#[cfg(feature = "crypto-hash")]
pub fn fingerprint(blueprint: &Blueprint) -> Result<String, NetlogicError> {
    let bytes = blueprint_to_bytes(blueprint)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}
