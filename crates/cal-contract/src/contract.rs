use std::collections::{BTreeMap, HashSet};

use cal_codec::{
    parse_id_list, parse_record, parse_simple_record, record_id, split_id_list, split_records,
    AssetCodec, BatchRecord, CodecResult,
};
use cal_store::StateStore;
use cal_types::{Asset, AssetId, ComplexAsset, ComponentRecords};
use serde::Serialize;
use tracing::{debug, info};

use crate::auth::verify_chip_response;
use crate::config::{BatchMode, ContainmentStrategy, ContractConfig};
use crate::containment::{rescan_containers, ContainmentIndex};
use crate::error::{ContractError, ContractResult};

/// The composite asset engine.
///
/// Stateless apart from its configuration: every operation takes the store
/// handle of the current invocation and re-reads whatever it needs. Nothing
/// is cached between calls.
#[derive(Clone, Debug, Default)]
pub struct AssetContract {
    config: ContractConfig,
}

impl AssetContract {
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    // ---------------------------------------------------------------
    // Existence
    // ---------------------------------------------------------------

    /// `true` iff a non-empty value is stored at `id`.
    pub fn asset_exists<S: StateStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
    ) -> ContractResult<bool> {
        Ok(store.get(id)?.is_some_and(|value| !value.is_empty()))
    }

    fn require_exists<S: StateStore + ?Sized>(&self, store: &S, id: &str) -> ContractResult<()> {
        if !self.asset_exists(store, id)? {
            return Err(ContractError::not_found(id));
        }
        Ok(())
    }

    fn require_absent<S: StateStore + ?Sized>(&self, store: &S, id: &str) -> ContractResult<()> {
        if self.asset_exists(store, id)? {
            return Err(ContractError::already_exists(id));
        }
        Ok(())
    }

    // ---------------------------------------------------------------
    // Creation
    // ---------------------------------------------------------------

    pub fn create_asset<S: StateStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
        manufacturer: &str,
        part_number: &str,
    ) -> ContractResult<()> {
        let id = AssetId::parse(id)?;
        self.require_absent(store, id.as_str())?;
        write_record(store, id.as_str(), &Asset::new(manufacturer, part_number))?;
        debug!(%id, "asset created");
        Ok(())
    }

    pub fn create_complex_asset<S: StateStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
        manufacturer: &str,
        part_number: &str,
    ) -> ContractResult<()> {
        let id = AssetId::parse(id)?;
        self.require_absent(store, id.as_str())?;
        write_record(store, id.as_str(), &ComplexAsset::new(manufacturer, part_number))?;
        debug!(%id, "complex asset created");
        Ok(())
    }

    /// Create simple assets from `id,manufacturer,partNumber` records.
    pub fn create_asset_batch<S: StateStore + ?Sized>(
        &self,
        store: &S,
        batch: &str,
    ) -> ContractResult<usize> {
        self.apply_creation_batch(store, batch, parse_simple_record, |record| {
            AssetCodec::encode(&Asset::new(&record.manufacturer, &record.part_number))
        })
    }

    /// Create complex assets from `id,manufacturer,partNumber,[c1.c2]` records.
    ///
    /// Component ids are stored as given; no containment check is applied.
    pub fn create_complex_asset_batch<S: StateStore + ?Sized>(
        &self,
        store: &S,
        batch: &str,
    ) -> ContractResult<usize> {
        self.apply_creation_batch(store, batch, parse_record, |record| {
            AssetCodec::encode(
                &ComplexAsset::new(&record.manufacturer, &record.part_number)
                    .with_components(record.components.clone()),
            )
        })
    }

    /// Each record is checked for an empty or existing id before its fields
    /// are parsed, so an existing id wins over a malformed record.
    fn apply_creation_batch<S, P, E>(
        &self,
        store: &S,
        batch: &str,
        parse: P,
        encode: E,
    ) -> ContractResult<usize>
    where
        S: StateStore + ?Sized,
        P: Fn(&str) -> CodecResult<BatchRecord>,
        E: Fn(&BatchRecord) -> CodecResult<Vec<u8>>,
    {
        let mut staged: Vec<(AssetId, Vec<u8>)> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for raw in split_records(batch) {
            let id = record_id(raw);
            AssetId::parse(id)?;
            if !seen.insert(id.to_string()) {
                return Err(ContractError::already_exists(id));
            }
            self.require_absent(store, id)?;
            let record = parse(raw).map_err(|e| ContractError::from_codec(id, e))?;
            let bytes = encode(&record).map_err(|e| ContractError::from_codec(id, e))?;

            match self.config.batch_mode {
                BatchMode::Atomic => staged.push((record.id, bytes)),
                BatchMode::Sequential => {
                    store.put(record.id.as_str(), bytes)?;
                    debug!(id = %record.id, "batch record written");
                }
            }
        }

        let count = seen.len();
        for (id, bytes) in staged {
            store.put(id.as_str(), bytes)?;
        }
        info!(count, mode = ?self.config.batch_mode, "asset batch created");
        Ok(count)
    }

    // ---------------------------------------------------------------
    // Assembly
    // ---------------------------------------------------------------

    /// Create a complex asset from existing parts.
    ///
    /// `components` is a comma-separated id list. A candidate is kept only
    /// if nothing contains it yet; candidates already built into another
    /// assembly are silently dropped. A candidate that does not exist fails
    /// the call with `NotFound`.
    pub fn assemble_complex_asset<S: StateStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
        manufacturer: &str,
        part_number: &str,
        components: &str,
    ) -> ContractResult<()> {
        AssetId::parse(id)?;
        self.require_absent(store, id)?;
        let candidates = parse_id_list(components);

        let index = match self.config.containment {
            ContainmentStrategy::Indexed if !candidates.is_empty() => {
                Some(ContainmentIndex::build(store)?)
            }
            _ => None,
        };

        let mut accepted = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            self.require_exists(store, candidate.as_str())?;
            let containers = match &index {
                Some(index) => index.containers_of(candidate.as_str()),
                None => rescan_containers(store, candidate.as_str())?,
            };
            if containers.is_empty() {
                accepted.push(candidate);
            } else {
                debug!(
                    id,
                    component = %candidate,
                    containers = containers.len(),
                    "component already assembled elsewhere; skipped"
                );
            }
        }

        let asset = ComplexAsset::new(manufacturer, part_number).with_components(accepted);
        write_record(store, id, &asset)?;
        debug!(id, components = asset.components.len(), "complex asset assembled");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Authentication
    // ---------------------------------------------------------------

    /// Check a chip response for an existing asset.
    ///
    /// The manufacturer is accepted for interface compatibility but does
    /// not take part in the comparison.
    pub fn authenticate_asset<S: StateStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
        manufacturer: &str,
        nonce: i64,
        chip_response: i64,
    ) -> ContractResult<bool> {
        self.require_exists(store, id)?;
        let genuine = verify_chip_response(nonce, chip_response);
        debug!(id, manufacturer, genuine, "asset authentication checked");
        Ok(genuine)
    }

    // ---------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------

    pub fn read_asset<S: StateStore + ?Sized>(&self, store: &S, id: &str) -> ContractResult<Asset> {
        let bytes = self.read_bytes(store, id)?;
        AssetCodec::decode_asset(&bytes).map_err(|e| ContractError::from_codec(id, e))
    }

    pub fn read_complex_asset<S: StateStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
    ) -> ContractResult<ComplexAsset> {
        let bytes = self.read_bytes(store, id)?;
        decode_complex_at(id, &bytes)
    }

    /// Every record in the store read as a simple asset, in key order.
    pub fn read_all_assets<S: StateStore + ?Sized>(
        &self,
        store: &S,
    ) -> ContractResult<BTreeMap<AssetId, Asset>> {
        let mut assets = BTreeMap::new();
        for (key, value) in store.scan_all()? {
            if value.is_empty() {
                continue;
            }
            let asset =
                AssetCodec::decode_asset(&value).map_err(|e| ContractError::from_codec(&key, e))?;
            assets.insert(AssetId::new(key), asset);
        }
        Ok(assets)
    }

    /// Every record in the store read as a complex asset, in key order.
    pub fn read_all_complex_assets<S: StateStore + ?Sized>(
        &self,
        store: &S,
    ) -> ContractResult<BTreeMap<AssetId, ComplexAsset>> {
        let mut assets = BTreeMap::new();
        for (key, value) in store.scan_all()? {
            if value.is_empty() {
                continue;
            }
            let asset = decode_complex_at(&key, &value)?;
            assets.insert(AssetId::new(key), asset);
        }
        Ok(assets)
    }

    fn read_bytes<S: StateStore + ?Sized>(&self, store: &S, id: &str) -> ContractResult<Vec<u8>> {
        match store.get(id)? {
            Some(bytes) if !bytes.is_empty() => Ok(bytes),
            _ => Err(ContractError::not_found(id)),
        }
    }

    // ---------------------------------------------------------------
    // Containment
    // ---------------------------------------------------------------

    /// Every asset that directly or transitively contains `id`, in
    /// breadth-first discovery order.
    pub fn part_containment<S: StateStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
    ) -> ContractResult<Vec<AssetId>> {
        self.require_exists(store, id)?;
        match self.config.containment {
            ContainmentStrategy::Indexed => Ok(ContainmentIndex::build(store)?.containers_of(id)),
            ContainmentStrategy::Rescan => rescan_containers(store, id),
        }
    }

    /// The records of an asset's direct components, keyed by component id
    /// in the order the asset lists them.
    ///
    /// A component that no longer exists fails the query with `NotFound`
    /// naming the component.
    pub fn query_components<S: StateStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
    ) -> ContractResult<ComponentRecords> {
        let asset = self.read_complex_asset(store, id)?;
        let mut components = ComponentRecords::new();
        for component in asset.components {
            let record = self.read_complex_asset(store, component.as_str())?;
            components.insert(component, record);
        }
        debug!(id, components = components.len(), "components queried");
        Ok(components)
    }

    // ---------------------------------------------------------------
    // Update / retire
    // ---------------------------------------------------------------

    /// Replace an asset with a simple record.
    pub fn update_asset<S: StateStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
        manufacturer: &str,
        part_number: &str,
    ) -> ContractResult<()> {
        self.require_exists(store, id)?;
        write_record(store, id, &Asset::new(manufacturer, part_number))?;
        debug!(id, "asset updated");
        Ok(())
    }

    /// Replace a complex asset wholesale.
    ///
    /// The new record starts out active, whatever the old one said.
    // TODO: carry `isActive` over once retired-asset updates are decided on.
    pub fn update_complex_asset<S: StateStore + ?Sized>(
        &self,
        store: &S,
        id: &str,
        manufacturer: &str,
        part_number: &str,
        components: &str,
    ) -> ContractResult<()> {
        self.require_exists(store, id)?;
        let asset = ComplexAsset::new(manufacturer, part_number)
            .with_components(parse_id_list(components));
        write_record(store, id, &asset)?;
        debug!(id, components = asset.components.len(), "complex asset updated");
        Ok(())
    }

    pub fn retire_asset<S: StateStore + ?Sized>(&self, store: &S, id: &str) -> ContractResult<()> {
        let mut asset = self.read_complex_asset(store, id)?;
        asset.retire();
        write_record(store, id, &asset)?;
        debug!(id, "asset retired");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Deletion
    // ---------------------------------------------------------------

    /// Hard-remove an asset. Assemblies that list it are left untouched.
    pub fn delete_asset<S: StateStore + ?Sized>(&self, store: &S, id: &str) -> ContractResult<()> {
        self.require_exists(store, id)?;
        store.delete(id)?;
        debug!(id, "asset deleted");
        Ok(())
    }

    /// Delete every id of a comma-separated list, failing on the first id
    /// that does not exist.
    ///
    /// The list is split as-is: an empty token, such as the one in `a,,b`
    /// or after a trailing comma, never exists and fails the call. An id
    /// listed twice is missing the second time.
    pub fn delete_asset_batch<S: StateStore + ?Sized>(
        &self,
        store: &S,
        ids: &str,
    ) -> ContractResult<usize> {
        let ids: Vec<&str> = split_id_list(ids).collect();
        match self.config.batch_mode {
            BatchMode::Atomic => {
                let mut seen = HashSet::new();
                for id in &ids {
                    if !seen.insert(*id) {
                        return Err(ContractError::not_found(*id));
                    }
                    self.require_exists(store, id)?;
                }
                for id in &ids {
                    store.delete(id)?;
                }
            }
            BatchMode::Sequential => {
                for id in &ids {
                    self.require_exists(store, id)?;
                    store.delete(id)?;
                }
            }
        }
        info!(count = ids.len(), mode = ?self.config.batch_mode, "asset batch deleted");
        Ok(ids.len())
    }
}

/// Decode the value stored at `key` as a complex asset.
pub(crate) fn decode_complex_at(key: &str, value: &[u8]) -> ContractResult<ComplexAsset> {
    AssetCodec::decode_complex(value).map_err(|e| ContractError::from_codec(key, e))
}

fn write_record<S, T>(store: &S, id: &str, record: &T) -> ContractResult<()>
where
    S: StateStore + ?Sized,
    T: Serialize,
{
    let bytes = AssetCodec::encode(record).map_err(|e| ContractError::from_codec(id, e))?;
    store.put(id, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use cal_store::InMemoryStateStore;

    use super::*;

    fn contract() -> AssetContract {
        AssetContract::default()
    }

    fn sequential() -> AssetContract {
        AssetContract::new(ContractConfig::default().with_batch_mode(BatchMode::Sequential))
    }

    fn rescanning() -> AssetContract {
        AssetContract::new(
            ContractConfig::default().with_containment(ContainmentStrategy::Rescan),
        )
    }

    fn ids(raw: &[&str]) -> Vec<AssetId> {
        raw.iter().map(|s| AssetId::from(*s)).collect()
    }

    // -----------------------------------------------------------------------
    // Existence and creation
    // -----------------------------------------------------------------------

    #[test]
    fn exists_flips_on_creation() {
        let store = InMemoryStateStore::new();
        let c = contract();
        assert!(!c.asset_exists(&store, "p1").unwrap());
        c.create_complex_asset(&store, "p1", "ACME", "100").unwrap();
        assert!(c.asset_exists(&store, "p1").unwrap());

        assert!(!c.asset_exists(&store, "s1").unwrap());
        c.create_asset(&store, "s1", "ACME", "200").unwrap();
        assert!(c.asset_exists(&store, "s1").unwrap());
    }

    #[test]
    fn empty_value_does_not_count_as_existing() {
        let store = InMemoryStateStore::new();
        store.put("ghost", Vec::new()).unwrap();
        assert!(!contract().asset_exists(&store, "ghost").unwrap());
    }

    #[test]
    fn create_twice_fails() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "p1", "ACME", "100").unwrap();
        let err = c.create_complex_asset(&store, "p1", "ACME", "100").unwrap_err();
        assert!(matches!(err, ContractError::AlreadyExists { ref id } if id == "p1"));
        let err = c.create_asset(&store, "p1", "ACME", "100").unwrap_err();
        assert!(matches!(err, ContractError::AlreadyExists { .. }));
    }

    #[test]
    fn created_complex_asset_is_active_and_empty() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "p1", "ACME", "100").unwrap();
        let asset = c.read_complex_asset(&store, "p1").unwrap();
        assert_eq!(asset, ComplexAsset::new("ACME", "100"));
        assert!(asset.is_active);
    }

    // -----------------------------------------------------------------------
    // Batches
    // -----------------------------------------------------------------------

    #[test]
    fn complex_batch_creates_all_records() {
        let store = InMemoryStateStore::new();
        let c = contract();
        let created = c
            .create_complex_asset_batch(&store, "a1,ACME,100,[];a2,ACME,200,[]")
            .unwrap();
        assert_eq!(created, 2);
        let all = c.read_all_complex_assets(&store).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.values().all(|a| a.components.is_empty()));
        assert_eq!(all["a2"].part_number, "200");
    }

    #[test]
    fn resubmitted_batch_fails_on_first_id() {
        let store = InMemoryStateStore::new();
        let c = contract();
        let batch = "a1,ACME,100,[];a2,ACME,200,[]";
        c.create_complex_asset_batch(&store, batch).unwrap();
        let err = c.create_complex_asset_batch(&store, batch).unwrap_err();
        assert!(matches!(err, ContractError::AlreadyExists { ref id } if id == "a1"));
    }

    #[test]
    fn batch_stores_components() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset_batch(&store, "p1,ACME,1,[];p2,ACME,2,[p1.]").unwrap();
        assert_eq!(c.read_complex_asset(&store, "p2").unwrap().components, ids(&["p1"]));
    }

    #[test]
    fn atomic_batch_writes_nothing_on_failure() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "a2", "ACME", "200").unwrap();
        let err = c
            .create_complex_asset_batch(&store, "a1,ACME,100,[];a2,ACME,200,[]")
            .unwrap_err();
        assert!(matches!(err, ContractError::AlreadyExists { ref id } if id == "a2"));
        assert!(!c.asset_exists(&store, "a1").unwrap());
    }

    #[test]
    fn sequential_batch_keeps_earlier_records() {
        let store = InMemoryStateStore::new();
        let c = sequential();
        c.create_complex_asset(&store, "a2", "ACME", "200").unwrap();
        assert!(c.create_complex_asset_batch(&store, "a1,ACME,100,[];a2,ACME,200,[]").is_err());
        assert!(c.asset_exists(&store, "a1").unwrap());
    }

    #[test]
    fn duplicate_id_inside_batch_fails_in_both_modes() {
        for c in [contract(), sequential()] {
            let store = InMemoryStateStore::new();
            let err = c
                .create_complex_asset_batch(&store, "a1,ACME,1,[];a1,ACME,2,[]")
                .unwrap_err();
            assert!(matches!(err, ContractError::AlreadyExists { ref id } if id == "a1"));
        }
    }

    #[test]
    fn malformed_batch_record_is_rejected() {
        let store = InMemoryStateStore::new();
        let c = contract();
        let err = c.create_complex_asset_batch(&store, "a1,ACME,100").unwrap_err();
        assert!(matches!(err, ContractError::BatchFormat { ref id, .. } if id == "a1"));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn existing_id_is_reported_before_bad_format() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "a1", "ACME", "100").unwrap();
        let err = c.create_complex_asset_batch(&store, "a1,ACME").unwrap_err();
        assert!(matches!(err, ContractError::AlreadyExists { .. }));
    }

    #[test]
    fn simple_batch_creates_simple_records() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_asset_batch(&store, "s1,ACME,100;s2,Globex,200").unwrap();
        assert_eq!(c.read_asset(&store, "s2").unwrap(), Asset::new("Globex", "200"));
        assert!(c.create_asset_batch(&store, "s3,ACME").is_err());
    }

    // -----------------------------------------------------------------------
    // Assembly and containment
    // -----------------------------------------------------------------------

    #[test]
    fn containment_scenario() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "p1", "ACME", "100").unwrap();
        c.assemble_complex_asset(&store, "p2", "ACME", "200", "p1").unwrap();

        assert_eq!(c.part_containment(&store, "p1").unwrap(), ids(&["p2"]));
        let components = c.query_components(&store, "p2").unwrap();
        assert_eq!(components.len(), 1);
        assert_eq!(
            components.get("p1"),
            Some(&c.read_complex_asset(&store, "p1").unwrap())
        );
    }

    #[test]
    fn isolated_asset_has_empty_containment() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "p1", "ACME", "100").unwrap();
        assert!(c.part_containment(&store, "p1").unwrap().is_empty());
    }

    #[test]
    fn containment_of_missing_asset_fails() {
        let store = InMemoryStateStore::new();
        let err = contract().part_containment(&store, "nope").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { .. }));
    }

    #[test]
    fn assemble_skips_components_already_contained() {
        for c in [contract(), rescanning()] {
            let store = InMemoryStateStore::new();
            c.create_complex_asset(&store, "a", "ACME", "1").unwrap();
            c.assemble_complex_asset(&store, "b", "ACME", "2", "a").unwrap();

            c.assemble_complex_asset(&store, "c", "ACME", "3", "a").unwrap();
            assert!(c.read_complex_asset(&store, "c").unwrap().components.is_empty());
            assert_eq!(c.part_containment(&store, "a").unwrap(), ids(&["b"]));
        }
    }

    #[test]
    fn assemble_keeps_free_components_in_order() {
        let store = InMemoryStateStore::new();
        let c = contract();
        for id in ["w1", "w2", "w3"] {
            c.create_complex_asset(&store, id, "ACME", "wheel").unwrap();
        }
        c.assemble_complex_asset(&store, "cart", "ACME", "cart", "w3,,w1,w2,").unwrap();
        assert_eq!(
            c.read_complex_asset(&store, "cart").unwrap().components,
            ids(&["w3", "w1", "w2"])
        );
    }

    #[test]
    fn assemble_with_missing_component_fails() {
        let store = InMemoryStateStore::new();
        let c = contract();
        let err = c.assemble_complex_asset(&store, "x", "ACME", "1", "ghost").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { ref id } if id == "ghost"));
        assert!(!c.asset_exists(&store, "x").unwrap());
    }

    #[test]
    fn assemble_existing_id_fails() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "x", "ACME", "1").unwrap();
        let err = c.assemble_complex_asset(&store, "x", "ACME", "1", "").unwrap_err();
        assert!(matches!(err, ContractError::AlreadyExists { .. }));
    }

    #[test]
    fn transitive_containment_through_assemblies() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "bolt", "ACME", "1").unwrap();
        c.assemble_complex_asset(&store, "wheel", "ACME", "2", "bolt").unwrap();
        c.assemble_complex_asset(&store, "car", "ACME", "3", "wheel").unwrap();
        assert_eq!(c.part_containment(&store, "bolt").unwrap(), ids(&["wheel", "car"]));
    }

    #[test]
    fn query_components_detects_dangling_reference() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "p1", "ACME", "1").unwrap();
        c.assemble_complex_asset(&store, "p2", "ACME", "2", "p1").unwrap();
        c.delete_asset(&store, "p1").unwrap();
        let err = c.query_components(&store, "p2").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { ref id } if id == "p1"));
    }

    // -----------------------------------------------------------------------
    // Authentication
    // -----------------------------------------------------------------------

    #[test]
    fn authenticate_scenario() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "p1", "ACME", "1").unwrap();
        assert!(c.authenticate_asset(&store, "p1", "ACME", 5, 6).unwrap());
        assert!(!c.authenticate_asset(&store, "p1", "ACME", 5, 5).unwrap());
        assert!(c.authenticate_asset(&store, "p1", "Someone Else", 5, 6).unwrap());
        let err = c.authenticate_asset(&store, "nope", "ACME", 5, 6).unwrap_err();
        assert!(matches!(err, ContractError::NotFound { .. }));
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    #[test]
    fn read_missing_asset_fails() {
        let store = InMemoryStateStore::new();
        let err = contract().read_complex_asset(&store, "nope").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { .. }));
        assert!(contract().read_asset(&store, "nope").is_err());
    }

    #[test]
    fn read_malformed_record_names_the_key() {
        let store = InMemoryStateStore::new();
        store.put("junk", b"{\"manufacturer\":1}".to_vec()).unwrap();
        let err = contract().read_complex_asset(&store, "junk").unwrap_err();
        assert!(matches!(err, ContractError::MalformedRecord { ref id, .. } if id == "junk"));
        assert!(contract().read_all_assets(&store).is_err());
    }

    #[test]
    fn read_all_is_in_key_order() {
        let store = InMemoryStateStore::new();
        let c = contract();
        for id in ["c", "a", "b"] {
            c.create_asset(&store, id, "ACME", id).unwrap();
        }
        let keys: Vec<_> = c.read_all_assets(&store).unwrap().into_keys().collect();
        assert_eq!(keys, ids(&["a", "b", "c"]));
    }

    // -----------------------------------------------------------------------
    // Update, retire, delete
    // -----------------------------------------------------------------------

    #[test]
    fn retire_scenario() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "p1", "ACME", "1").unwrap();
        c.retire_asset(&store, "p1").unwrap();
        assert!(!c.read_complex_asset(&store, "p1").unwrap().is_active);
        let err = c.retire_asset(&store, "nope").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { .. }));
    }

    #[test]
    fn retire_keeps_components() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "p1", "ACME", "1").unwrap();
        c.assemble_complex_asset(&store, "p2", "ACME", "2", "p1").unwrap();
        c.retire_asset(&store, "p2").unwrap();
        assert_eq!(c.read_complex_asset(&store, "p2").unwrap().components, ids(&["p1"]));
    }

    #[test]
    fn complex_update_replaces_everything_and_reactivates() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "p1", "ACME", "1").unwrap();
        c.retire_asset(&store, "p1").unwrap();
        c.update_complex_asset(&store, "p1", "Globex", "9", "x,,y").unwrap();
        let asset = c.read_complex_asset(&store, "p1").unwrap();
        assert_eq!(asset.manufacturer, "Globex");
        assert_eq!(asset.part_number, "9");
        assert_eq!(asset.components, ids(&["x", "y"]));
        assert!(asset.is_active);
    }

    #[test]
    fn update_missing_asset_fails() {
        let store = InMemoryStateStore::new();
        let c = contract();
        assert!(matches!(
            c.update_asset(&store, "nope", "ACME", "1").unwrap_err(),
            ContractError::NotFound { .. }
        ));
        assert!(matches!(
            c.update_complex_asset(&store, "nope", "ACME", "1", "").unwrap_err(),
            ContractError::NotFound { .. }
        ));
    }

    #[test]
    fn simple_update_overwrites_record() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_asset(&store, "s1", "ACME", "1").unwrap();
        c.update_asset(&store, "s1", "Globex", "2").unwrap();
        assert_eq!(c.read_asset(&store, "s1").unwrap(), Asset::new("Globex", "2"));
    }

    #[test]
    fn delete_is_hard_removal() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "p1", "ACME", "1").unwrap();
        c.delete_asset(&store, "p1").unwrap();
        assert!(!c.asset_exists(&store, "p1").unwrap());
        assert!(store.get("p1").unwrap().is_none());
        assert!(matches!(
            c.delete_asset(&store, "p1").unwrap_err(),
            ContractError::NotFound { .. }
        ));
    }

    #[test]
    fn delete_batch_removes_listed_ids() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset_batch(&store, "a,M,1,[];b,M,2,[];c,M,3,[]").unwrap();
        assert_eq!(c.delete_asset_batch(&store, "a,c").unwrap(), 2);
        assert!(c.asset_exists(&store, "b").unwrap());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn atomic_delete_batch_stops_before_deleting() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset(&store, "a", "M", "1").unwrap();
        let err = c.delete_asset_batch(&store, "a,missing").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { ref id } if id == "missing"));
        assert!(c.asset_exists(&store, "a").unwrap());
    }

    #[test]
    fn sequential_delete_batch_keeps_earlier_deletions() {
        let store = InMemoryStateStore::new();
        let c = sequential();
        c.create_complex_asset(&store, "a", "M", "1").unwrap();
        assert!(c.delete_asset_batch(&store, "a,missing").is_err());
        assert!(!c.asset_exists(&store, "a").unwrap());
    }

    #[test]
    fn repeated_id_in_delete_batch_is_missing_the_second_time() {
        for c in [contract(), sequential()] {
            let store = InMemoryStateStore::new();
            c.create_complex_asset(&store, "a", "M", "1").unwrap();
            let err = c.delete_asset_batch(&store, "a,a").unwrap_err();
            assert!(matches!(err, ContractError::NotFound { ref id } if id == "a"));
        }
    }

    #[test]
    fn empty_token_in_delete_batch_fails_atomically() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset_batch(&store, "a,M,1,[];b,M,2,[]").unwrap();
        let err = c.delete_asset_batch(&store, "a,,b").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { ref id } if id == ""));
        assert!(c.asset_exists(&store, "a").unwrap());
        assert!(c.asset_exists(&store, "b").unwrap());
    }

    #[test]
    fn empty_token_in_delete_batch_stops_sequential_run() {
        let store = InMemoryStateStore::new();
        let c = sequential();
        c.create_complex_asset_batch(&store, "a,M,1,[];b,M,2,[]").unwrap();
        let err = c.delete_asset_batch(&store, "a,,b").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { ref id } if id == ""));
        assert!(!c.asset_exists(&store, "a").unwrap());
        assert!(c.asset_exists(&store, "b").unwrap());
    }

    #[test]
    fn trailing_comma_in_delete_batch_fails() {
        for c in [contract(), sequential()] {
            let store = InMemoryStateStore::new();
            c.create_complex_asset(&store, "a", "M", "1").unwrap();
            let err = c.delete_asset_batch(&store, "a,").unwrap_err();
            assert_eq!(err.kind(), "NotFound");
        }
    }

    // -----------------------------------------------------------------------
    // Id validation and component order
    // -----------------------------------------------------------------------

    #[test]
    fn empty_id_is_rejected_on_every_creation_path() {
        let store = InMemoryStateStore::new();
        let c = contract();
        let invalid = |r: ContractResult<()>| matches!(r, Err(ContractError::InvalidId(_)));
        assert!(invalid(c.create_asset(&store, "", "ACME", "1")));
        assert!(invalid(c.create_complex_asset(&store, "", "ACME", "1")));
        assert!(invalid(c.assemble_complex_asset(&store, "", "ACME", "1", "")));
        let err = c.create_complex_asset_batch(&store, "a,M,1,[];,M,2,[]").unwrap_err();
        assert!(matches!(err, ContractError::InvalidId(_)));
        assert!(c.create_asset_batch(&store, ",M,1").is_err());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn query_components_follows_listing_order() {
        let store = InMemoryStateStore::new();
        let c = contract();
        c.create_complex_asset_batch(&store, "a,M,1,[];b,M,2,[];top,M,3,[b.a.b]").unwrap();
        let components = c.query_components(&store, "top").unwrap();
        assert_eq!(components.ids().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(components.get("a").unwrap().part_number, "1");
    }
}
