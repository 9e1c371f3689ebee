//! # Blueprint Formats
//!
//! Pure byte-level encodings of a [`Blueprint`]. File I/O lives in the app layer.
//!
//! - `json`: the interchange document (`node_list`, `connections`, ...)
//! - `binary`: compact header + postcard payload

mod binary;
mod json;

pub use binary::*;
pub use json::*;

use crate::{Blueprint, NetlogicError, primitives};
use primitives::MAX_BOUNDARY_PORTS;

/// Decode either format, recognising the compact one by its magic bytes.
pub fn blueprint_from_any(bytes: &[u8]) -> Result<Blueprint, NetlogicError> {
    if bytes.starts_with(primitives::MAGIC_BYTES) {
        blueprint_from_bytes(bytes)
    } else {
        blueprint_from_json(bytes)
    }
}

/// Reject declared boundary counts above `MAX_BOUNDARY_PORTS`.
///
/// Checked on every decode, before anything sized by the counts is built.
fn check_boundary(blueprint: &Blueprint) -> Result<(), NetlogicError> {
    for (what, actual) in [
        ("input slot count", blueprint.num_inputs),
        ("output slot count", blueprint.num_outputs),
    ] {
        if actual > MAX_BOUNDARY_PORTS {
            return Err(NetlogicError::LimitExceeded {
                what,
                actual,
                max: MAX_BOUNDARY_PORTS,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::library;

    #[test]
    fn any_format_detected() {
        let bp = library::half_adder();
        let json = blueprint_to_json(&bp).unwrap();
        let bytes = blueprint_to_bytes(&bp).unwrap();

        assert_eq!(blueprint_from_any(json.as_bytes()).unwrap(), bp);
        assert_eq!(blueprint_from_any(&bytes).unwrap(), bp);
    }
}
