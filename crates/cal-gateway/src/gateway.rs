use cal_contract::AssetContract;
use cal_store::StateStore;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{GatewayError, GatewayResult};
use crate::transaction::Transaction;

/// Runs read-only transactions. Results are never committed.
pub trait TransactionEvaluator: Send + Sync {
    fn evaluate_transaction(&self, name: &str, args: &[&str]) -> GatewayResult<Vec<u8>>;
}

/// Runs any transaction, committing its writes to the store.
pub trait TransactionSubmitter: Send + Sync {
    fn submit_transaction(&self, name: &str, args: &[&str]) -> GatewayResult<Vec<u8>>;
}

/// Binds an [`AssetContract`] to a state store handle.
///
/// Operations that return nothing, and batch operations, produce an empty
/// payload. Everything else is JSON.
pub struct Gateway<S: StateStore> {
    store: S,
    contract: AssetContract,
}

impl<S: StateStore> Gateway<S> {
    pub fn new(store: S, contract: AssetContract) -> Self {
        Self { store, contract }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Execute a parsed transaction against the store.
    pub fn invoke(&self, tx: &Transaction) -> GatewayResult<Vec<u8>> {
        debug!(transaction = tx.name(), "invoking");
        let result = self.dispatch(tx);
        if let Err(e) = &result {
            warn!(transaction = tx.name(), kind = e.kind(), error = %e, "transaction failed");
        }
        result
    }

    fn dispatch(&self, tx: &Transaction) -> GatewayResult<Vec<u8>> {
        let c = &self.contract;
        let s = &self.store;
        match tx {
            Transaction::AssetExists { id } => encode(&c.asset_exists(s, id)?),
            Transaction::CreateAsset {
                id,
                manufacturer,
                part_number,
            } => {
                c.create_asset(s, id, manufacturer, part_number)?;
                Ok(Vec::new())
            }
            Transaction::CreateAssetBatch { batch } => {
                c.create_asset_batch(s, batch)?;
                Ok(Vec::new())
            }
            Transaction::CreateComplexAsset {
                id,
                manufacturer,
                part_number,
            } => {
                c.create_complex_asset(s, id, manufacturer, part_number)?;
                Ok(Vec::new())
            }
            Transaction::CreateComplexAssetBatch { batch } => {
                c.create_complex_asset_batch(s, batch)?;
                Ok(Vec::new())
            }
            Transaction::AssembleComplexAsset {
                id,
                manufacturer,
                part_number,
                components,
            } => {
                c.assemble_complex_asset(s, id, manufacturer, part_number, components)?;
                Ok(Vec::new())
            }
            Transaction::AuthenticateAsset {
                id,
                manufacturer,
                nonce,
                chip_response,
            } => encode(&c.authenticate_asset(s, id, manufacturer, *nonce, *chip_response)?),
            Transaction::ReadAsset { id } => encode(&c.read_asset(s, id)?),
            Transaction::ReadAllAssets => encode(&c.read_all_assets(s)?),
            Transaction::ReadComplexAsset { id } => encode(&c.read_complex_asset(s, id)?),
            Transaction::ReadAllComplexAssets => encode(&c.read_all_complex_assets(s)?),
            Transaction::PartContainment { id } => encode(&c.part_containment(s, id)?),
            Transaction::QueryComponents { id } => encode(&c.query_components(s, id)?),
            Transaction::UpdateAsset {
                id,
                manufacturer,
                part_number,
            } => {
                c.update_asset(s, id, manufacturer, part_number)?;
                Ok(Vec::new())
            }
            Transaction::UpdateComplexAsset {
                id,
                manufacturer,
                part_number,
                components,
            } => {
                c.update_complex_asset(s, id, manufacturer, part_number, components)?;
                Ok(Vec::new())
            }
            Transaction::RetireAsset { id } => {
                c.retire_asset(s, id)?;
                Ok(Vec::new())
            }
            Transaction::DeleteAsset { id } => {
                c.delete_asset(s, id)?;
                Ok(Vec::new())
            }
            Transaction::DeleteAssetBatch { ids } => {
                c.delete_asset_batch(s, ids)?;
                Ok(Vec::new())
            }
        }
    }
}

impl<S: StateStore> TransactionEvaluator for Gateway<S> {
    fn evaluate_transaction(&self, name: &str, args: &[&str]) -> GatewayResult<Vec<u8>> {
        let tx = Transaction::parse(name, args)?;
        if !tx.is_read_only() {
            return Err(GatewayError::NotReadOnly(tx.name()));
        }
        self.invoke(&tx)
    }
}

impl<S: StateStore> TransactionSubmitter for Gateway<S> {
    fn submit_transaction(&self, name: &str, args: &[&str]) -> GatewayResult<Vec<u8>> {
        let tx = Transaction::parse(name, args)?;
        self.invoke(&tx)
    }
}

impl<S: StateStore + std::fmt::Debug> std::fmt::Debug for Gateway<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("store", &self.store)
            .field("contract", &self.contract)
            .finish()
    }
}

fn encode<T: Serialize>(value: &T) -> GatewayResult<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| GatewayError::Serialization(e.to_string()))
}
