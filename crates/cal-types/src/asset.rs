use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::AssetId;

/// A simple part: who made it and which part it is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub manufacturer: String,
    pub part_number: String,
}

impl Asset {
    pub fn new(manufacturer: impl Into<String>, part_number: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            part_number: part_number.into(),
        }
    }
}

/// A part assembled from other parts.
///
/// `components` holds the ids of the contained assets. Duplicates are
/// allowed and order only matters for display. Records written by older
/// clients may lack `components` or `isActive`; they decode as an empty
/// list and an active asset respectively.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexAsset {
    pub manufacturer: String,
    pub part_number: String,
    /// Never set by the contract itself; carried through when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_complex: Option<bool>,
    #[serde(default)]
    pub components: Vec<AssetId>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl ComplexAsset {
    /// A fresh, active asset with no components.
    pub fn new(manufacturer: impl Into<String>, part_number: impl Into<String>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            part_number: part_number.into(),
            is_complex: None,
            components: Vec::new(),
            is_active: true,
        }
    }

    pub fn with_components(mut self, components: Vec<AssetId>) -> Self {
        self.components = components;
        self
    }

    /// Returns `true` if `id` appears in this asset's component list.
    pub fn contains(&self, id: &str) -> bool {
        self.components.iter().any(|c| c == id)
    }

    /// Mark the asset as retired. There is no way back.
    pub fn retire(&mut self) {
        self.is_active = false;
    }
}

/// Which record shape a key holds.
///
/// Records are not self-describing: the caller decides which shape to
/// expect based on the operation that created the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Asset,
    Complex,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Complex => write!(f, "complex"),
        }
    }
}
