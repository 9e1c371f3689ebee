//! # Configuration
//!
//! Optional TOML configuration for the Netlogic binary.
//!
//! ```toml
//! [limits]
//! max_file_bytes = 16777216
//! max_table_inputs = 16
//!
//! [[gates]]
//! name = "XOR_BASIC"
//! path = "gates/xor_basic.json"
//! ```
//!
//! Gate paths are resolved relative to the directory holding the config file.
//! Gates are registered in file order, so later entries may use earlier ones.

use crate::cli::load_blueprint;
use netlogic_core::{
    GateCatalog, NetlogicError,
    primitives::{MAX_DOCUMENT_BYTES, MAX_TRUTH_TABLE_INPUTS},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "netlogic.toml";

// =============================================================================
// CONFIG TYPES
// =============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Resource limits.
    pub limits: Limits,

    /// Composite gates to register before loading a blueprint.
    pub gates: Vec<GateEntry>,

    /// Directory that relative gate paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// Resource limits applied by the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Largest blueprint file the binary will read.
    pub max_file_bytes: u64,
    /// Largest input count for `table`. Clamped to the engine's own bound.
    pub max_table_inputs: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_bytes: MAX_DOCUMENT_BYTES as u64,
            max_table_inputs: MAX_TRUTH_TABLE_INPUTS,
        }
    }
}

/// A blueprint file registered as a composite gate kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateEntry {
    /// Kind name. Overrides the blueprint's own id.
    pub name: Option<String>,
    /// Blueprint file (JSON or compact binary).
    pub path: PathBuf,
}

// =============================================================================
// LOADING
// =============================================================================

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, NetlogicError> {
        toml::from_str(text)
            .map_err(|e| NetlogicError::DeserializationError(format!("Invalid config: {}", e)))
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `netlogic.toml` in the
    /// working directory is used if present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, NetlogicError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|e| {
            NetlogicError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;

        let mut config = Self::from_toml_str(&text)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        tracing::debug!(
            config = %path.display(),
            gates = config.gates.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Resolve a gate path against the config directory.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Build the gate catalog: standard gates plus every configured composite.
    ///
    /// Gate files go through the same path and size checks as any blueprint.
    pub fn build_catalog(&self) -> Result<GateCatalog, NetlogicError> {
        let mut catalog = GateCatalog::with_standard_gates();

        for entry in &self.gates {
            let path = self.resolve(&entry.path);
            let mut blueprint = load_blueprint(&path, self.limits.max_file_bytes)?;
            if let Some(name) = &entry.name {
                blueprint.id = name.clone();
            }

            catalog.register_blueprint(&blueprint)?;
            tracing::info!(kind = %blueprint.id, path = %path.display(), "Registered composite gate");
        }

        Ok(catalog)
    }
}

// =============================================================================
// TESTS
// =============================================================================
