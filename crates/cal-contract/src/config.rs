use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContractError, ContractResult};

/// How container lookups walk the keyspace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainmentStrategy {
    /// One scan per call builds a reverse component index, then the
    /// breadth-first walk runs against the index.
    #[default]
    Indexed,
    /// One full scan per frontier entry.
    Rescan,
}

/// How batch creation and deletion apply their records.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// Validate every record before the first write; a failing batch
    /// writes nothing.
    #[default]
    Atomic,
    /// Check then write record by record; a failure leaves earlier records
    /// of the same batch applied.
    Sequential,
}

/// Configuration for the asset contract.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub containment: ContainmentStrategy,
    pub batch_mode: BatchMode,
}

impl ContractConfig {
    /// Parse a TOML document. Missing keys fall back to the defaults.
    pub fn from_toml_str(raw: &str) -> ContractResult<Self> {
        toml::from_str(raw).map_err(|e| ContractError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> ContractResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ContractError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn with_containment(mut self, containment: ContainmentStrategy) -> Self {
        self.containment = containment;
        self
    }

    pub fn with_batch_mode(mut self, batch_mode: BatchMode) -> Self {
        self.batch_mode = batch_mode;
        self
    }
}
