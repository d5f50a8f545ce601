use crate::error::{GatewayError, GatewayResult};

/// Transaction names as seen by external callers.
pub mod names {
    pub const ASSET_EXISTS: &str = "assetExists";
    pub const CREATE_ASSET: &str = "createAsset";
    pub const CREATE_ASSET_BATCH: &str = "createAssetBatch";
    pub const CREATE_COMPLEX_ASSET: &str = "createComplexAsset";
    pub const CREATE_COMPLEX_ASSET_BATCH: &str = "createComplexAssetBatch";
    pub const ASSEMBLE_COMPLEX_ASSET: &str = "assembleComplexAsset";
    pub const AUTHENTICATE_ASSET: &str = "authenticateAsset";
    pub const READ_ASSET: &str = "readAsset";
    pub const READ_ALL_ASSETS: &str = "readAllAssets";
    pub const READ_COMPLEX_ASSET: &str = "readComplexAsset";
    pub const READ_ALL_COMPLEX_ASSETS: &str = "readAllComplexAssets";
    pub const PART_CONTAINMENT: &str = "partContainment";
    pub const QUERY_COMPONENTS: &str = "queryComponents";
    pub const UPDATE_ASSET: &str = "updateAsset";
    pub const UPDATE_COMPLEX_ASSET: &str = "updateComplexAsset";
    pub const RETIRE_ASSET: &str = "retireAsset";
    pub const DELETE_ASSET: &str = "deleteAsset";
    pub const DELETE_ASSET_BATCH: &str = "deleteAssetBatch";

    /// Read-only transactions, callable through evaluate.
    pub const EVALUATE: &[&str] = &[
        ASSET_EXISTS,
        AUTHENTICATE_ASSET,
        READ_ASSET,
        READ_ALL_ASSETS,
        READ_COMPLEX_ASSET,
        READ_ALL_COMPLEX_ASSETS,
        PART_CONTAINMENT,
        QUERY_COMPONENTS,
    ];

    /// Mutating transactions, callable only through submit.
    pub const SUBMIT: &[&str] = &[
        CREATE_ASSET,
        CREATE_ASSET_BATCH,
        CREATE_COMPLEX_ASSET,
        CREATE_COMPLEX_ASSET_BATCH,
        ASSEMBLE_COMPLEX_ASSET,
        UPDATE_ASSET,
        UPDATE_COMPLEX_ASSET,
        RETIRE_ASSET,
        DELETE_ASSET,
        DELETE_ASSET_BATCH,
    ];
}

/// A parsed contract invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transaction {
    AssetExists { id: String },
    CreateAsset {
        id: String,
        manufacturer: String,
        part_number: String,
    },
    CreateAssetBatch { batch: String },
    CreateComplexAsset {
        id: String,
        manufacturer: String,
        part_number: String,
    },
    CreateComplexAssetBatch { batch: String },
    AssembleComplexAsset {
        id: String,
        manufacturer: String,
        part_number: String,
        components: String,
    },
    AuthenticateAsset {
        id: String,
        manufacturer: String,
        nonce: i64,
        chip_response: i64,
    },
    ReadAsset { id: String },
    ReadAllAssets,
    ReadComplexAsset { id: String },
    ReadAllComplexAssets,
    PartContainment { id: String },
    QueryComponents { id: String },
    UpdateAsset {
        id: String,
        manufacturer: String,
        part_number: String,
    },
    UpdateComplexAsset {
        id: String,
        manufacturer: String,
        part_number: String,
        components: String,
    },
    RetireAsset { id: String },
    DeleteAsset { id: String },
    DeleteAssetBatch { ids: String },
}

impl Transaction {
    /// Build a transaction from its external name and positional arguments.
    pub fn parse(name: &str, args: &[&str]) -> GatewayResult<Self> {
        let tx = match name {
            names::ASSET_EXISTS => {
                let [id] = arity::<1>(names::ASSET_EXISTS, args)?;
                Self::AssetExists { id }
            }
            names::CREATE_ASSET => {
                let [id, manufacturer, part_number] = arity::<3>(names::CREATE_ASSET, args)?;
                Self::CreateAsset {
                    id,
                    manufacturer,
                    part_number,
                }
            }
            names::CREATE_ASSET_BATCH => {
                let [batch] = arity::<1>(names::CREATE_ASSET_BATCH, args)?;
                Self::CreateAssetBatch { batch }
            }
            names::CREATE_COMPLEX_ASSET => {
                let [id, manufacturer, part_number] =
                    arity::<3>(names::CREATE_COMPLEX_ASSET, args)?;
                Self::CreateComplexAsset {
                    id,
                    manufacturer,
                    part_number,
                }
            }
            names::CREATE_COMPLEX_ASSET_BATCH => {
                let [batch] = arity::<1>(names::CREATE_COMPLEX_ASSET_BATCH, args)?;
                Self::CreateComplexAssetBatch { batch }
            }
            names::ASSEMBLE_COMPLEX_ASSET => {
                let [id, manufacturer, part_number, components] =
                    arity::<4>(names::ASSEMBLE_COMPLEX_ASSET, args)?;
                Self::AssembleComplexAsset {
                    id,
                    manufacturer,
                    part_number,
                    components,
                }
            }
            names::AUTHENTICATE_ASSET => {
                let [id, manufacturer, nonce, chip_response] =
                    arity::<4>(names::AUTHENTICATE_ASSET, args)?;
                Self::AuthenticateAsset {
                    id,
                    manufacturer,
                    nonce: integer(names::AUTHENTICATE_ASSET, "nonce", &nonce)?,
                    chip_response: integer(
                        names::AUTHENTICATE_ASSET,
                        "chipResponse",
                        &chip_response,
                    )?,
                }
            }
            names::READ_ASSET => {
                let [id] = arity::<1>(names::READ_ASSET, args)?;
                Self::ReadAsset { id }
            }
            names::READ_ALL_ASSETS => {
                let [] = arity::<0>(names::READ_ALL_ASSETS, args)?;
                Self::ReadAllAssets
            }
            names::READ_COMPLEX_ASSET => {
                let [id] = arity::<1>(names::READ_COMPLEX_ASSET, args)?;
                Self::ReadComplexAsset { id }
            }
            names::READ_ALL_COMPLEX_ASSETS => {
                let [] = arity::<0>(names::READ_ALL_COMPLEX_ASSETS, args)?;
                Self::ReadAllComplexAssets
            }
            names::PART_CONTAINMENT => {
                let [id] = arity::<1>(names::PART_CONTAINMENT, args)?;
                Self::PartContainment { id }
            }
            names::QUERY_COMPONENTS => {
                let [id] = arity::<1>(names::QUERY_COMPONENTS, args)?;
                Self::QueryComponents { id }
            }
            names::UPDATE_ASSET => {
                let [id, manufacturer, part_number] = arity::<3>(names::UPDATE_ASSET, args)?;
                Self::UpdateAsset {
                    id,
                    manufacturer,
                    part_number,
                }
            }
            names::UPDATE_COMPLEX_ASSET => {
                let [id, manufacturer, part_number, components] =
                    arity::<4>(names::UPDATE_COMPLEX_ASSET, args)?;
                Self::UpdateComplexAsset {
                    id,
                    manufacturer,
                    part_number,
                    components,
                }
            }
            names::RETIRE_ASSET => {
                let [id] = arity::<1>(names::RETIRE_ASSET, args)?;
                Self::RetireAsset { id }
            }
            names::DELETE_ASSET => {
                let [id] = arity::<1>(names::DELETE_ASSET, args)?;
                Self::DeleteAsset { id }
            }
            names::DELETE_ASSET_BATCH => {
                let [ids] = arity::<1>(names::DELETE_ASSET_BATCH, args)?;
                Self::DeleteAssetBatch { ids }
            }
            other => return Err(GatewayError::UnknownTransaction(other.to_string())),
        };
        Ok(tx)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AssetExists { .. } => names::ASSET_EXISTS,
            Self::CreateAsset { .. } => names::CREATE_ASSET,
            Self::CreateAssetBatch { .. } => names::CREATE_ASSET_BATCH,
            Self::CreateComplexAsset { .. } => names::CREATE_COMPLEX_ASSET,
            Self::CreateComplexAssetBatch { .. } => names::CREATE_COMPLEX_ASSET_BATCH,
            Self::AssembleComplexAsset { .. } => names::ASSEMBLE_COMPLEX_ASSET,
            Self::AuthenticateAsset { .. } => names::AUTHENTICATE_ASSET,
            Self::ReadAsset { .. } => names::READ_ASSET,
            Self::ReadAllAssets => names::READ_ALL_ASSETS,
            Self::ReadComplexAsset { .. } => names::READ_COMPLEX_ASSET,
            Self::ReadAllComplexAssets => names::READ_ALL_COMPLEX_ASSETS,
            Self::PartContainment { .. } => names::PART_CONTAINMENT,
            Self::QueryComponents { .. } => names::QUERY_COMPONENTS,
            Self::UpdateAsset { .. } => names::UPDATE_ASSET,
            Self::UpdateComplexAsset { .. } => names::UPDATE_COMPLEX_ASSET,
            Self::RetireAsset { .. } => names::RETIRE_ASSET,
            Self::DeleteAsset { .. } => names::DELETE_ASSET,
            Self::DeleteAssetBatch { .. } => names::DELETE_ASSET_BATCH,
        }
    }

    /// `true` for transactions that never write to the store.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Self::AssetExists { .. }
                | Self::AuthenticateAsset { .. }
                | Self::ReadAsset { .. }
                | Self::ReadAllAssets
                | Self::ReadComplexAsset { .. }
                | Self::ReadAllComplexAssets
                | Self::PartContainment { .. }
                | Self::QueryComponents { .. }
        )
    }
}

fn arity<const N: usize>(name: &'static str, args: &[&str]) -> GatewayResult<[String; N]> {
    if args.len() != N {
        return Err(GatewayError::ArgumentCount {
            name,
            expected: N,
            actual: args.len(),
        });
    }
    Ok(std::array::from_fn(|i| args[i].to_string()))
}

fn integer(name: &'static str, argument: &'static str, raw: &str) -> GatewayResult<i64> {
    raw.trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| GatewayError::InvalidArgument {
            name,
            argument,
            reason: e.to_string(),
        })
}
