mod cache;
pub mod gw2;

pub use gw2::Gw2Client;

use std::collections::BTreeSet;

use serde::Deserialize;
use thiserror::Error;

use crate::models::ItemId;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure taxonomy of the account data source.
///
/// `Timeout` is retried a bounded number of times by the client before it
/// surfaces here; `Aborted` is the clean cancellation path and not an error
/// in the usual sense.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid access token")]
    InvalidAccessToken,

    #[error("access token lacks permission: {0}")]
    MissingPermission(String),

    #[error("timeout calling api")]
    Timeout,

    #[error("aborted by user")]
    Aborted,

    #[error("unexpected status: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// One selected account, seen through the remote game API.
///
/// Every call observes the shared abort flag and fails fast with
/// [`ApiError::Aborted`] once it is set.
#[async_trait::async_trait]
pub trait AccountApi: Send + Sync {
    /// Request cancellation; all subsequent calls raise immediately.
    fn abort(&self);

    /// Clear the abort flag at the start of a fresh load.
    fn reset_abort(&self);

    fn is_aborted(&self) -> bool;

    async fn account_name(&self) -> ApiResult<String>;

    async fn characters(&self) -> ApiResult<Vec<String>>;

    async fn character_inventory(&self, character: &str) -> ApiResult<CharacterInventory>;

    async fn material_storage(&self) -> ApiResult<Vec<ItemSlot>>;

    /// Bank tab slots; empty slots come back as `None`.
    async fn bank(&self) -> ApiResult<Vec<Option<ItemSlot>>>;

    /// Shared inventory slots; empty slots come back as `None`.
    async fn shared_slots(&self) -> ApiResult<Vec<Option<ItemSlot>>>;

    /// Item metadata for the given ids. Ids the API does not know are simply
    /// missing from the result.
    async fn item_info(&self, ids: &BTreeSet<ItemId>) -> ApiResult<Vec<ItemInfo>>;

    /// Trading post listings for the given ids. Unlisted ids are missing
    /// from the result.
    async fn item_prices(&self, ids: &BTreeSet<ItemId>) -> ApiResult<Vec<ItemPrice>>;

    async fn item_price(&self, id: ItemId) -> ApiResult<ItemPrice>;

    async fn recipes(&self) -> ApiResult<Vec<RecipeInfo>>;
}

// Wire DTOs, mirroring the GW2 v2 API payloads. Unknown fields are ignored
// on purpose; the API adds fields regularly.

/// One occupied slot in a bag, bank tab, shared slot or material storage.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSlot {
    pub id: ItemId,
    pub count: u32,
    /// `"Account"` for account-bound stacks.
    pub binding: Option<String>,
}

impl ItemSlot {
    pub fn is_account_bound(&self) -> bool {
        self.binding.as_deref() == Some("Account")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterInventory {
    /// Unequipped bag slots are `null`.
    pub bags: Vec<Option<Bag>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Bag {
    /// Empty slots inside a bag are `null`.
    pub inventory: Vec<Option<ItemSlot>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemInfo {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    pub rarity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub level: u32,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub details: Option<ItemDetails>,
}

impl ItemInfo {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemDetails {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemPrice {
    pub id: ItemId,
    pub sells: PriceQuote,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PriceQuote {
    /// Copper per unit.
    pub unit_price: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub output_item_id: ItemId,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipeIngredientInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: u32,
    pub count: u32,
}
