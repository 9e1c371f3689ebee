//! # Engine Primitives
//!
//! Hardcoded constants for the Netlogic engine.
//! These are compiled into the binary and are immutable at runtime.

/// Magic bytes for the compact blueprint format header.
///
/// - File Header = Magic Bytes ("NLBP") + Version (u8) before payload.
pub const MAGIC_BYTES: &[u8; 4] = b"NLBP";

/// Current compact format version.
///
/// Increment this when making breaking changes to the encoding.
pub const FORMAT_VERSION: u8 = 1;

/// Every node has exactly one output port.
pub const NODE_OUTPUTS: usize = 1;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum size of a serialized blueprint document (16 MiB).
///
/// Documents larger than this are rejected before parsing.
pub const MAX_DOCUMENT_BYTES: usize = 16 * 1024 * 1024;

/// Maximum number of external input slots, and separately of output slots.
///
/// Boundary counts are plain integers in a document, so they are bounded
/// here rather than by document size.
pub const MAX_BOUNDARY_PORTS: usize = 65_536;

/// Maximum number of inputs for exhaustive truth table generation.
///
/// A table has `2^n` rows; 20 inputs is roughly a million rows.
pub const MAX_TRUTH_TABLE_INPUTS: usize = 20;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magic_bytes_correct() {
        assert_eq!(MAGIC_BYTES, b"NLBP");
    }

    #[test]
    fn nodes_have_single_output() {
        assert_eq!(NODE_OUTPUTS, 1);
    }
}
