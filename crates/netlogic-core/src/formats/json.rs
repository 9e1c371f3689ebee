//! JSON interchange document.
//!
//! ```json
//! {
//!   "node_list": ["AND"],
//!   "connections": [
//!     { "source": { "node": null, "port": 0 }, "sink": { "node": 0, "port": 0 } }
//!   ],
//!   "num_inputs": 2, "num_outputs": 1,
//!   "input_labels": ["A", "B"], "output_labels": ["Y"],
//!   "id": "AND2"
//! }
//! ```
//!
//! A `null` or absent `node` is the blueprint boundary.

use super::check_boundary;
use crate::primitives::MAX_DOCUMENT_BYTES;
use crate::{Blueprint, Connection, NetlogicError, PortOrigin, PortRef};
use serde::{Deserialize, Serialize};

/// One endpoint as written in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDocument {
    #[serde(default)]
    pub node: Option<usize>,
    pub port: usize,
}

/// One connection as written in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDocument {
    pub source: PortDocument,
    pub sink: PortDocument,
}

/// The full document, field for field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlueprintDocument {
    pub node_list: Vec<String>,
    pub connections: Vec<ConnectionDocument>,
    pub num_inputs: usize,
    pub num_outputs: usize,
    pub input_labels: Vec<String>,
    pub output_labels: Vec<String>,
    pub id: String,
}

impl From<PortDocument> for PortRef {
    fn from(doc: PortDocument) -> Self {
        match doc.node {
            None => PortRef::external(doc.port),
            Some(n) => PortRef::node(n, doc.port),
        }
    }
}

impl From<PortRef> for PortDocument {
    fn from(port: PortRef) -> Self {
        Self {
            node: match port.origin {
                PortOrigin::External => None,
                PortOrigin::Internal(n) => Some(n),
            },
            port: port.index,
        }
    }
}

impl From<BlueprintDocument> for Blueprint {
    fn from(doc: BlueprintDocument) -> Self {
        Self {
            id: doc.id,
            nodes: doc.node_list,
            connections: doc
                .connections
                .into_iter()
                .map(|c| Connection::new(c.source.into(), c.sink.into()))
                .collect(),
            num_inputs: doc.num_inputs,
            num_outputs: doc.num_outputs,
            input_labels: doc.input_labels,
            output_labels: doc.output_labels,
        }
    }
}

impl From<&Blueprint> for BlueprintDocument {
    fn from(bp: &Blueprint) -> Self {
        Self {
            node_list: bp.nodes.clone(),
            connections: bp
                .connections
                .iter()
                .map(|c| ConnectionDocument {
                    source: c.source.into(),
                    sink: c.sink.into(),
                })
                .collect(),
            num_inputs: bp.num_inputs,
            num_outputs: bp.num_outputs,
            input_labels: bp.input_labels.clone(),
            output_labels: bp.output_labels.clone(),
            id: bp.id.clone(),
        }
    }
}

/// Parse a blueprint from a JSON document.
///
/// The size limit is checked BEFORE parsing; boundary counts right after.
pub fn blueprint_from_json(bytes: &[u8]) -> Result<Blueprint, NetlogicError> {
    if bytes.len() > MAX_DOCUMENT_BYTES {
        return Err(NetlogicError::LimitExceeded {
            what: "document size",
            actual: bytes.len(),
            max: MAX_DOCUMENT_BYTES,
        });
    }

    let doc: BlueprintDocument = serde_json::from_slice(bytes)
        .map_err(|e| NetlogicError::DeserializationError(e.to_string()))?;
    let blueprint = Blueprint::from(doc);
    check_boundary(&blueprint)?;
    Ok(blueprint)
}

/// Write a blueprint as a pretty-printed JSON document.
pub fn blueprint_to_json(blueprint: &Blueprint) -> Result<String, NetlogicError> {
    serde_json::to_string_pretty(&BlueprintDocument::from(blueprint))
        .map_err(|e| NetlogicError::SerializationError(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const AND_DOC: &str = r#"{
        "node_list": ["AND"],
        "connections": [
            { "source": { "node": null, "port": 0 }, "sink": { "node": 0, "port": 0 } },
            { "source": { "port": 1 }, "sink": { "node": 0, "port": 1 } },
            { "source": { "node": 0, "port": 0 }, "sink": { "node": null, "port": 0 } }
        ],
        "num_inputs": 2,
        "num_outputs": 1,
        "input_labels": ["A", "B"],
        "output_labels": ["Y"],
        "id": "AND2"
    }"#;

    #[test]
    fn parses_document_with_null_and_absent_nodes() {
        let bp = blueprint_from_json(AND_DOC.as_bytes()).unwrap();
        assert_eq!(bp.id, "AND2");
        assert_eq!(bp.nodes, vec!["AND"]);
        assert_eq!(
            bp.connections[1],
            Connection::new(PortRef::external(1), PortRef::node(0, 1))
        );
        assert_eq!(bp.connections[2].sink, PortRef::external(0));
    }

    #[test]
    fn writes_null_for_boundary_ports() {
        let bp = blueprint_from_json(AND_DOC.as_bytes()).unwrap();
        let json = blueprint_to_json(&bp).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["connections"][0]["source"]["node"].is_null());
        assert_eq!(value["connections"][0]["sink"]["node"], 0);
    }

    #[test]
    fn negative_port_rejected() {
        let doc = AND_DOC.replace(r#""node": 0, "port": 1"#, r#""node": 0, "port": -1"#);
        let result = blueprint_from_json(doc.as_bytes());
        assert!(matches!(result, Err(NetlogicError::DeserializationError(_))));
    }

    #[test]
    fn missing_field_rejected() {
        let doc = AND_DOC.replace(r#""id": "AND2""#, r#""name": "AND2""#);
        assert!(blueprint_from_json(doc.as_bytes()).is_err());
    }

    #[test]
    fn oversized_boundary_rejected() {
        let doc = br#"{"node_list":[],"connections":[],"num_inputs":0,"num_outputs":20000000,"input_labels":[],"output_labels":[],"id":"W"}"#;
        let result = blueprint_from_json(doc);
        assert!(matches!(
            result,
            Err(NetlogicError::LimitExceeded {
                actual: 20_000_000,
                ..
            })
        ));
    }

    #[test]
    fn boundary_at_limit_accepted() {
        let doc = AND_DOC.replace(r#""num_inputs": 2"#, r#""num_inputs": 65536"#);
        let bp = blueprint_from_json(doc.as_bytes()).unwrap();
        assert_eq!(bp.num_inputs, crate::primitives::MAX_BOUNDARY_PORTS);
    }
}
