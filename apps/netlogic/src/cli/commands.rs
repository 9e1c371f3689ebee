//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::Format;
use crate::config::Config;
use netlogic_core::{
    Blueprint, Circuit, CircuitMetrics, Defect, NetlogicError, Precondition, TruthTable,
    blueprint_from_any, blueprint_to_bytes, blueprint_to_json, fingerprint, library,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// How a command finished when it did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command did what was asked.
    Success,
    /// The blueprint has structural defects; the report was printed.
    Defective,
}

// =============================================================================
// FILE HELPERS
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), NetlogicError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| NetlogicError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(NetlogicError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize an input path and ensure it names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, NetlogicError> {
    let canonical = path.canonicalize().map_err(|e| {
        NetlogicError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(NetlogicError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Canonicalize the parent of an output path.
fn validate_output_path(path: &Path) -> Result<PathBuf, NetlogicError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        NetlogicError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(NetlogicError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| NetlogicError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Read and decode a blueprint file, JSON or binary.
pub fn load_blueprint(path: &Path, max_bytes: u64) -> Result<Blueprint, NetlogicError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, max_bytes)?;

    let data = std::fs::read(&validated_path)
        .map_err(|e| NetlogicError::IoError(format!("Read file: {}", e)))?;

    let blueprint = blueprint_from_any(&data)?;
    tracing::debug!(
        id = %blueprint.id,
        nodes = blueprint.node_count(),
        connections = blueprint.connections.len(),
        "Loaded blueprint"
    );
    Ok(blueprint)
}

/// Encode a blueprint in the requested format.
fn encode(blueprint: &Blueprint, format: Format) -> Result<Vec<u8>, NetlogicError> {
    match format {
        Format::Json => blueprint_to_json(blueprint).map(String::into_bytes),
        Format::Binary => blueprint_to_bytes(blueprint),
    }
}

fn write_output(path: &Path, data: &[u8]) -> Result<PathBuf, NetlogicError> {
    let validated_output = validate_output_path(path)?;
    std::fs::write(&validated_output, data)
        .map_err(|e| NetlogicError::IoError(format!("Write file: {}", e)))?;
    Ok(validated_output)
}

/// Pretty-print any serializable value as JSON.
fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, NetlogicError> {
    serde_json::to_string_pretty(value).map_err(|e| NetlogicError::SerializationError(e.to_string()))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), NetlogicError> {
    println!("{}", render_json(value)?);
    Ok(())
}

/// Parse an input vector: comma or whitespace separated `1/0/true/false`.
pub fn parse_inputs(text: &str) -> Result<Vec<bool>, NetlogicError> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| match token.to_ascii_lowercase().as_str() {
            "1" | "true" | "t" => Ok(true),
            "0" | "false" | "f" => Ok(false),
            _ => Err(NetlogicError::DeserializationError(format!(
                "Invalid input value '{}'. Use 1/0 or true/false",
                token
            ))),
        })
        .collect()
}

fn bit(value: bool) -> u8 {
    u8::from(value)
}

// =============================================================================
// DEFECT REPORTING
// =============================================================================

fn report_defects(
    blueprint: &Blueprint,
    defects: &[Defect],
    json_mode: bool,
) -> Result<(), NetlogicError> {
    tracing::warn!(id = %blueprint.id, defects = defects.len(), "Blueprint is not well-formed");

    if json_mode {
        print_json(&serde_json::json!({
            "id": blueprint.id,
            "valid": false,
            "defects": defects,
            "messages": defects.iter().map(ToString::to_string).collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    println!(
        "Blueprint '{}' has {} defect(s):",
        blueprint.id,
        defects.len()
    );
    for defect in defects {
        println!("  - {}", defect);
    }
    Ok(())
}

/// Load the catalog and blueprint, then compile.
///
/// Returns `None` after printing the defect report when the blueprint is not well-formed.
fn load_circuit(
    config: &Config,
    file: &Path,
    json_mode: bool,
) -> Result<Option<(Blueprint, Circuit)>, NetlogicError> {
    let catalog = config.build_catalog()?;
    let blueprint = load_blueprint(file, config.limits.max_file_bytes)?;

    match Circuit::compile(&blueprint, &catalog) {
        Ok(circuit) => Ok(Some((blueprint, circuit))),
        Err(NetlogicError::PreconditionViolated(Precondition::NotValidated(defects))) => {
            report_defects(&blueprint, &defects, json_mode)?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

// =============================================================================
// VALIDATE COMMAND
// =============================================================================

/// Validate a blueprint.
pub fn cmd_validate(
    config: &Config,
    file: &Path,
    json_mode: bool,
    verbose: bool,
) -> Result<Outcome, NetlogicError> {
    let Some((blueprint, circuit)) = load_circuit(config, file, json_mode)? else {
        return Ok(Outcome::Defective);
    };

    tracing::info!(id = %blueprint.id, "Blueprint is well-formed");

    if json_mode {
        print_json(&serde_json::json!({
            "id": blueprint.id,
            "valid": true,
            "defects": Vec::<Defect>::new(),
            "node_count": circuit.node_count(),
            "connection_count": circuit.connection_count(),
        }))?;
        return Ok(Outcome::Success);
    }

    println!(
        "Blueprint '{}' is valid ({} nodes, {} connections)",
        blueprint.id,
        circuit.node_count(),
        circuit.connection_count()
    );
    if verbose {
        println!("Inputs:  {}", circuit.input_labels().join(", "));
        println!("Outputs: {}", circuit.output_labels().join(", "));
        println!("Order:   {:?}", circuit.order());
    }

    Ok(Outcome::Success)
}

// =============================================================================
// EVAL COMMAND
// =============================================================================

/// Evaluate a blueprint for one input vector.
pub fn cmd_eval(
    config: &Config,
    file: &Path,
    inputs: &str,
    json_mode: bool,
) -> Result<Outcome, NetlogicError> {
    let inputs = parse_inputs(inputs)?;
    let Some((blueprint, circuit)) = load_circuit(config, file, json_mode)? else {
        return Ok(Outcome::Defective);
    };

    let outputs = circuit.evaluate(&inputs)?;
    tracing::info!(id = %blueprint.id, inputs = inputs.len(), "Evaluated blueprint");

    if json_mode {
        let named = |labels: &[String], values: &[bool]| {
            labels
                .iter()
                .cloned()
                .zip(values.iter().map(|&v| serde_json::Value::Bool(v)))
                .collect::<serde_json::Map<_, _>>()
        };
        print_json(&serde_json::json!({
            "id": blueprint.id,
            "inputs": named(circuit.input_labels(), &inputs),
            "outputs": named(circuit.output_labels(), &outputs),
        }))?;
        return Ok(Outcome::Success);
    }

    for (label, value) in circuit.output_labels().iter().zip(&outputs) {
        println!("{} = {}", label, bit(*value));
    }

    Ok(Outcome::Success)
}

// =============================================================================
// TABLE COMMAND
// =============================================================================

/// Print the truth table of a blueprint.
pub fn cmd_table(config: &Config, file: &Path, json_mode: bool) -> Result<Outcome, NetlogicError> {
    let Some((blueprint, circuit)) = load_circuit(config, file, json_mode)? else {
        return Ok(Outcome::Defective);
    };

    let table = TruthTable::generate_bounded(&circuit, config.limits.max_table_inputs)?;
    tracing::info!(id = %blueprint.id, rows = table.rows.len(), "Generated truth table");

    if json_mode {
        print_json(&table)?;
        return Ok(Outcome::Success);
    }

    println!("Truth table for '{}'", blueprint.id);
    print!("{}", table.render());

    Ok(Outcome::Success)
}

// =============================================================================
// INSPECT COMMAND
// =============================================================================

/// Show circuit metrics.
pub fn cmd_inspect(
    config: &Config,
    file: &Path,
    json_mode: bool,
) -> Result<Outcome, NetlogicError> {
    let Some((blueprint, circuit)) = load_circuit(config, file, json_mode)? else {
        return Ok(Outcome::Defective);
    };
    let metrics = CircuitMetrics::from_circuit(&circuit);

    if json_mode {
        print_json(&serde_json::json!({
            "id": blueprint.id,
            "num_inputs": circuit.num_inputs(),
            "num_outputs": circuit.num_outputs(),
            "node_count": metrics.node_count,
            "connection_count": metrics.connection_count,
            "depth": metrics.depth,
            "max_layer_width": metrics.max_layer_width,
            "max_fan_out": metrics.max_fan_out,
            "kinds": metrics.kinds,
        }))?;
        return Ok(Outcome::Success);
    }

    println!("Netlogic Circuit: {}", blueprint.id);
    println!("==================");
    println!("Inputs:          {}", circuit.num_inputs());
    println!("Outputs:         {}", circuit.num_outputs());
    println!("Nodes:           {}", metrics.node_count);
    println!("Connections:     {}", metrics.connection_count);
    println!("Depth:           {}", metrics.depth);
    println!("Max Layer Width: {}", metrics.max_layer_width);
    println!("Max Fan-out:     {}", metrics.max_fan_out);
    if !metrics.kinds.is_empty() {
        println!();
        println!("Gate kinds:");
        for (kind, count) in &metrics.kinds {
            println!("  {:<12} {}", kind, count);
        }
    }

    Ok(Outcome::Success)
}

// =============================================================================
// CONVERT COMMAND
// =============================================================================

/// Convert a blueprint between JSON and binary.
///
/// The blueprint is not validated; conversion preserves defects as-is.
pub fn cmd_convert(
    config: &Config,
    file: &Path,
    output: &Path,
    format: Format,
) -> Result<Outcome, NetlogicError> {
    let blueprint = load_blueprint(file, config.limits.max_file_bytes)?;
    let data = encode(&blueprint, format)?;
    let written = write_output(output, &data)?;

    println!("Converted {} bytes to {:?}", data.len(), written);
    Ok(Outcome::Success)
}

// =============================================================================
// LIBRARY COMMAND
// =============================================================================

/// Write a reference blueprint, or list the available names.
pub fn cmd_library(
    name: Option<&str>,
    bits: usize,
    output: Option<&Path>,
    format: Format,
    json_mode: bool,
) -> Result<Outcome, NetlogicError> {
    let Some(name) = name else {
        if json_mode {
            print_json(&serde_json::json!({ "names": library::NAMES }))?;
        } else {
            for name in library::NAMES {
                println!("{}", name);
            }
        }
        return Ok(Outcome::Success);
    };

    let blueprint = library::by_name(name, bits).ok_or_else(|| {
        NetlogicError::UnknownGateKind(format!(
            "{} (available: {})",
            name,
            library::NAMES.join(", ")
        ))
    })?;

    let data = encode(&blueprint, format)?;
    match output {
        Some(path) => {
            let written = write_output(path, &data)?;
            println!("Wrote '{}' ({} bytes) to {:?}", blueprint.id, data.len(), written);
        }
        None if format == Format::Json => println!("{}", String::from_utf8_lossy(&data)),
        None => {
            return Err(NetlogicError::IoError(
                "Binary output needs --output".to_string(),
            ));
        }
    }

    Ok(Outcome::Success)
}

// =============================================================================
// HASH COMMAND
// =============================================================================

/// Compute the BLAKE3 fingerprint of a blueprint.
pub fn cmd_hash(config: &Config, file: &Path, json_mode: bool) -> Result<Outcome, NetlogicError> {
    let blueprint = load_blueprint(file, config.limits.max_file_bytes)?;
    let hash = fingerprint(&blueprint)?;

    if json_mode {
        print_json(&serde_json::json!({
            "id": blueprint.id,
            "hash": hash,
            "algorithm": "blake3",
        }))?;
        return Ok(Outcome::Success);
    }

    println!("BLAKE3 Hash: {}", hash);
    println!("Blueprint:   {}", blueprint.id);

    Ok(Outcome::Success)
}

// =============================================================================
// TESTS
// =============================================================================
