use std::collections::HashMap;

use tokio::sync::{Mutex, OnceCell};

use crate::api::{CharacterInventory, ItemSlot, RecipeInfo};

/// Results fetched once per client session.
///
/// The builder walks material storage twice (capacity sizing, then the
/// inventory itself) and a UI may reload rules against the same session, so
/// the per-account endpoints are fetched a single time and replayed from
/// here. The cache belongs to one client instance; a fresh session starts
/// with a fresh cache.
#[derive(Default)]
pub struct SessionCache {
    pub account_name: OnceCell<String>,
    pub characters: OnceCell<Vec<String>>,
    pub material_storage: OnceCell<Vec<ItemSlot>>,
    pub bank: OnceCell<Vec<Option<ItemSlot>>>,
    pub shared_slots: OnceCell<Vec<Option<ItemSlot>>>,
    pub recipes: OnceCell<Vec<RecipeInfo>>,
    pub character_inventories: Mutex<HashMap<String, CharacterInventory>>,
}
