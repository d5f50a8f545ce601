//! Containment queries: which assets hold a given asset, directly or
//! through any number of intermediate assemblies.
//!
//! The walk is a breadth-first worklist. It starts from the target, and for
//! each id in the frontier it appends every not-yet-seen asset whose
//! component list names that id. Direct containers of one frontier entry are
//! visited in ascending key order, which is the order the store scans in,
//! so both strategies below discover containers in the same order.
//!
//! # Invariants
//!
//! - The target itself is never reported, even if it lists itself.
//! - Each container is reported once, at its first discovery.
//! - Cycles in the component graph terminate.

use std::collections::{BTreeSet, HashMap, HashSet};

use cal_store::StateStore;
use cal_types::AssetId;
use tracing::debug;

use crate::contract::decode_complex_at;
use crate::error::ContractResult;

/// Reverse component index: component id -> assets listing it.
#[derive(Clone, Debug, Default)]
pub struct ContainmentIndex {
    containers: HashMap<AssetId, BTreeSet<AssetId>>,
}

impl ContainmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index with one scan of the whole keyspace.
    ///
    /// Every value is read as a complex asset; simple assets contribute
    /// nothing. Empty values are treated as absent keys.
    pub fn build<S: StateStore + ?Sized>(store: &S) -> ContractResult<Self> {
        let mut index = Self::new();
        let mut scanned = 0usize;
        for (key, value) in store.scan_all()? {
            if value.is_empty() {
                continue;
            }
            let asset = decode_complex_at(&key, &value)?;
            index.insert(&AssetId::new(key), &asset.components);
            scanned += 1;
        }
        debug!(scanned, indexed = index.len(), "containment index built");
        Ok(index)
    }

    /// Record that `container` lists each of `components`.
    pub fn insert(&mut self, container: &AssetId, components: &[AssetId]) {
        for component in components {
            self.containers
                .entry(component.clone())
                .or_default()
                .insert(container.clone());
        }
    }

    /// Assets that list `id` directly, ascending by key.
    pub fn direct_containers(&self, id: &str) -> impl Iterator<Item = &AssetId> {
        self.containers.get(id).into_iter().flatten()
    }

    /// Every asset that directly or transitively contains `id`, in
    /// breadth-first discovery order.
    pub fn containers_of(&self, id: &str) -> Vec<AssetId> {
        let mut frontier = vec![AssetId::new(id)];
        let mut seen: HashSet<AssetId> = frontier.iter().cloned().collect();
        let mut cursor = 0;
        while cursor < frontier.len() {
            let tier = frontier[cursor].clone();
            cursor += 1;
            for container in self.direct_containers(tier.as_str()) {
                if seen.insert(container.clone()) {
                    frontier.push(container.clone());
                }
            }
        }
        frontier.split_off(1)
    }

    /// Number of distinct components that have at least one container.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

/// Containers of `id` found by rescanning the keyspace once per frontier
/// entry, without building an index.
///
/// Returns the same ids in the same order as
/// [`ContainmentIndex::containers_of`], at a cost of one full scan per
/// discovered container.
pub fn rescan_containers<S: StateStore + ?Sized>(
    store: &S,
    id: &str,
) -> ContractResult<Vec<AssetId>> {
    let mut frontier = vec![AssetId::new(id)];
    let mut cursor = 0;
    while cursor < frontier.len() {
        let tier = frontier[cursor].clone();
        cursor += 1;
        for (key, value) in store.scan_all()? {
            if value.is_empty() {
                continue;
            }
            let asset = decode_complex_at(&key, &value)?;
            if asset.contains(tier.as_str()) && !frontier.iter().any(|f| f == key.as_str()) {
                frontier.push(AssetId::new(key));
            }
        }
    }
    debug!(target_id = id, scans = cursor, "containment rescan complete");
    Ok(frontier.split_off(1))
}
