//! In-memory `AccountApi` fixture for driving the model without a network.
#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use restack::api::{
    AccountApi, ApiError, ApiResult, Bag, CharacterInventory, ItemInfo, ItemPrice, ItemSlot,
    PriceQuote, RecipeInfo, RecipeIngredientInfo,
};
use restack::models::ItemId;

#[derive(Default)]
pub struct MockApi {
    pub account: String,
    pub characters: Vec<String>,
    pub inventories: HashMap<String, CharacterInventory>,
    pub materials: Vec<ItemSlot>,
    pub bank: Vec<Option<ItemSlot>>,
    pub shared: Vec<Option<ItemSlot>>,
    pub item_infos: Vec<ItemInfo>,
    pub prices: Vec<ItemPrice>,
    pub unit_prices: HashMap<ItemId, u32>,
    pub recipes: Vec<RecipeInfo>,
    /// Simulate a user abort after this many api calls.
    pub abort_after: Option<u32>,
    calls: AtomicU32,
    aborted: AtomicBool,
}

impl MockApi {
    pub fn new(account: &str) -> Self {
        Self {
            account: account.to_string(),
            ..Self::default()
        }
    }

    /// Put a character with a single bag of the given slots on this account.
    pub fn with_character(mut self, name: &str, slots: Vec<Option<ItemSlot>>) -> Self {
        self.characters.push(name.to_string());
        self.inventories.insert(
            name.to_string(),
            CharacterInventory {
                bags: vec![Some(Bag { inventory: slots })],
            },
        );
        self
    }

    fn check_abort(&self) -> ApiResult<()> {
        let calls = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(limit) = self.abort_after {
            if calls > limit {
                self.aborted.store(true, Ordering::Relaxed);
            }
        }
        if self.aborted.load(Ordering::Relaxed) {
            Err(ApiError::Aborted)
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait]
impl AccountApi for MockApi {
    fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    fn reset_abort(&self) {
        self.aborted.store(false, Ordering::Relaxed);
    }

    fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }

    async fn account_name(&self) -> ApiResult<String> {
        self.check_abort()?;
        Ok(self.account.clone())
    }

    async fn characters(&self) -> ApiResult<Vec<String>> {
        self.check_abort()?;
        Ok(self.characters.clone())
    }

    async fn character_inventory(&self, character: &str) -> ApiResult<CharacterInventory> {
        self.check_abort()?;
        Ok(self
            .inventories
            .get(character)
            .cloned()
            .unwrap_or(CharacterInventory { bags: Vec::new() }))
    }

    async fn material_storage(&self) -> ApiResult<Vec<ItemSlot>> {
        self.check_abort()?;
        Ok(self.materials.clone())
    }

    async fn bank(&self) -> ApiResult<Vec<Option<ItemSlot>>> {
        self.check_abort()?;
        Ok(self.bank.clone())
    }

    async fn shared_slots(&self) -> ApiResult<Vec<Option<ItemSlot>>> {
        self.check_abort()?;
        Ok(self.shared.clone())
    }

    async fn item_info(&self, ids: &BTreeSet<ItemId>) -> ApiResult<Vec<ItemInfo>> {
        self.check_abort()?;
        Ok(self
            .item_infos
            .iter()
            .filter(|info| ids.contains(&info.id))
            .cloned()
            .collect())
    }

    async fn item_prices(&self, ids: &BTreeSet<ItemId>) -> ApiResult<Vec<ItemPrice>> {
        self.check_abort()?;
        Ok(self
            .prices
            .iter()
            .filter(|price| ids.contains(&price.id))
            .cloned()
            .collect())
    }

    async fn item_price(&self, id: ItemId) -> ApiResult<ItemPrice> {
        self.check_abort()?;
        Ok(ItemPrice {
            id,
            sells: PriceQuote {
                unit_price: self.unit_prices.get(&id).copied().unwrap_or(0),
            },
        })
    }

    async fn recipes(&self) -> ApiResult<Vec<RecipeInfo>> {
        self.check_abort()?;
        Ok(self.recipes.clone())
    }
}

pub fn slot(id: u32, count: u32) -> ItemSlot {
    ItemSlot {
        id: ItemId(id),
        count,
        binding: None,
    }
}

pub fn bound_slot(id: u32, count: u32) -> ItemSlot {
    ItemSlot {
        id: ItemId(id),
        count,
        binding: Some("Account".to_string()),
    }
}

pub fn info(id: u32, name: &str, kind: &str, rarity: &str, level: u32) -> ItemInfo {
    ItemInfo {
        id: ItemId(id),
        name: name.to_string(),
        icon: None,
        rarity: rarity.to_string(),
        kind: kind.to_string(),
        level,
        flags: Vec::new(),
        description: None,
        details: None,
    }
}

/// A basic crafting material; stackable by classification.
pub fn material(id: u32, name: &str) -> ItemInfo {
    info(id, name, "CraftingMaterial", "Basic", 0)
}

pub fn with_description(mut item: ItemInfo, description: &str) -> ItemInfo {
    item.description = Some(description.to_string());
    item
}

pub fn with_flags(mut item: ItemInfo, flags: &[&str]) -> ItemInfo {
    item.flags = flags.iter().map(|f| f.to_string()).collect();
    item
}

pub fn price(id: u32, unit_price: u32) -> ItemPrice {
    ItemPrice {
        id: ItemId(id),
        sells: PriceQuote { unit_price },
    }
}

pub fn recipe(kind: &str, output_item_id: u32, ingredients: &[(u32, u32)]) -> RecipeInfo {
    RecipeInfo {
        kind: kind.to_string(),
        output_item_id: ItemId(output_item_id),
        ingredients: ingredients
            .iter()
            .map(|(id, count)| RecipeIngredientInfo {
                kind: "Item".to_string(),
                id: *id,
                count: *count,
            })
            .collect(),
    }
}
