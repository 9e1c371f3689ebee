//! # netlogic-core
//!
//! The deterministic blueprint engine for Netlogic - THE LOGIC.
//!
//! A blueprint is a netlist: named logic nodes wired together through
//! numbered ports, with a boundary of external input and output slots.
//! This crate answers two questions about one:
//!
//! 1. Is it well-formed? ([`validate`], reporting every [`Defect`])
//! 2. Given these inputs, what are its outputs? ([`evaluate`], [`Circuit`])
//!
//! ## Flow
//!
//! ```text
//! loader ──▶ Blueprint ──▶ validate ──(ok)──▶ Circuit::compile ──▶ evaluate ──▶ outputs
//!                              │
//!                              └──(defects)──▶ caller
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure: no I/O, no logging, no global mutable state
//! - Deterministic: ordered collections only; defects and orders are reproducible
//! - The gate catalog is injectable; [`GateCatalog::standard`] is the default

// =============================================================================
// MODULES
// =============================================================================

pub mod catalog;
pub mod evaluator;
pub mod formats;
pub mod graph;
pub mod library;
pub mod metrics;
pub mod primitives;
pub mod truth_table;
pub mod types;
pub mod validator;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Blueprint, Boundary, Connection, Defect, NetlogicError, PortOrigin, PortRef, Precondition,
    Side,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use catalog::{GateCatalog, GateSpec, TruthFn};
pub use evaluator::{Circuit, Driver, evaluate};
pub use metrics::CircuitMetrics;
pub use truth_table::{TruthRow, TruthTable};
pub use validator::validate;

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{
    BlueprintDocument, blueprint_from_any, blueprint_from_bytes, blueprint_from_json,
    blueprint_to_bytes, blueprint_to_json,
};

#[cfg(feature = "crypto-hash")]
pub use formats::fingerprint;
