use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::asset::ComplexAsset;
use crate::identity::AssetId;

/// Component records keyed by id, in the order the parent lists them.
///
/// Serializes as a JSON object whose keys keep that order. An id listed
/// twice keeps its first position and the latest record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentRecords {
    entries: Vec<(AssetId, ComplexAsset)>,
}

impl ComponentRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: AssetId, record: ComplexAsset) {
        match self.entries.iter_mut().find(|(key, _)| *key == id) {
            Some((_, slot)) => *slot = record,
            None => self.entries.push((id, record)),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ComplexAsset> {
        self.entries
            .iter()
            .find(|(key, _)| key == id)
            .map(|(_, record)| record)
    }

    pub fn ids(&self) -> impl Iterator<Item = &AssetId> {
        self.entries.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ComponentRecords {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, record) in &self.entries {
            map.serialize_entry(id, record)?;
        }
        map.end()
    }
}
