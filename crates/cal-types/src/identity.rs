use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identity of an asset: the key its record is stored under.
///
/// The id is chosen by the client at creation time and never changes
/// afterwards. It is not stored inside the record itself.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Wrap a raw key. No validation is performed; the store accepts any key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Parse a client-supplied id, rejecting the empty string.
    pub fn parse(id: &str) -> Result<Self, TypeError> {
        if id.is_empty() {
            return Err(TypeError::EmptyAssetId);
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", self.0)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for AssetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AssetId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AssetId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
