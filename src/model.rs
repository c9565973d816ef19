mod build;
mod enrich;
mod rules;
pub mod tables;

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::AccountApi;
use crate::error::AppResult;
use crate::messaging::Messaging;
use crate::models::{Item, ItemId, Recipe, Source};

/// Aggregate root of one load: every item seen across the selected
/// accounts, merged by id, plus the lookups derived from them.
///
/// Lifecycle: reset to empty at the start of each load, populated by the
/// inventory walk and the metadata enrichment, then frozen once `is_ready`
/// turns true. Advice rules only read; their results are memoized per model
/// instance and invalidated by the next load.
pub struct Model {
    apis: Vec<Arc<dyn AccountApi>>,
    messaging: Arc<Messaging>,
    include_consumables: bool,
    is_ready: bool,

    pub items: BTreeMap<ItemId, Item>,
    /// Account names in processing order.
    pub accounts: Vec<String>,
    /// Material storage capacity per account, a multiple of 250 covering the
    /// largest stack observed there.
    pub material_storage_size: BTreeMap<String, u32>,
    /// Empty bag/bank/shared slots counted per account while walking.
    pub empty_slots: BTreeMap<String, u32>,
    /// Break-even unit value of salvaging a rare versus selling it.
    pub ecto_salvage_price: Option<f64>,
    /// Recipes that passed the feasibility filter.
    pub recipes: Vec<Recipe>,
    /// Synthesized craft-output aggregates, metadata only, keyed by output id.
    pub output_items: BTreeMap<ItemId, Item>,

    cache: rules::RuleCache,
}

impl Model {
    pub fn new(
        apis: Vec<Arc<dyn AccountApi>>,
        messaging: Arc<Messaging>,
        include_consumables: bool,
    ) -> Self {
        Self {
            apis,
            messaging,
            include_consumables,
            is_ready: false,
            items: BTreeMap::new(),
            accounts: Vec::new(),
            material_storage_size: BTreeMap::new(),
            empty_slots: BTreeMap::new(),
            ecto_salvage_price: None,
            recipes: Vec::new(),
            output_items: BTreeMap::new(),
            cache: rules::RuleCache::default(),
        }
    }

    /// Run the full load pipeline: walk every account's inventory, enrich
    /// with item metadata, resolve recipes and the ecto reference price.
    ///
    /// On any failure, including a user abort, partial results are discarded
    /// wholesale and the model stays empty and not ready.
    pub async fn load(&mut self) -> AppResult<()> {
        if self.apis.is_empty() {
            return Ok(());
        }

        self.reset();
        match self.load_inner().await {
            Ok(()) => {
                self.is_ready = true;
                self.messaging.refresh();
                Ok(())
            }
            Err(e) => {
                self.reset();
                Err(e)
            }
        }
    }

    async fn load_inner(&mut self) -> AppResult<()> {
        let apis = self.apis.clone();

        for api in &apis {
            self.build_storage_size(api.as_ref()).await?;
            self.build_inventory(api.as_ref()).await?;
            let account = api.account_name().await?;
            self.accounts.push(account);
        }

        let first = apis[0].as_ref();
        self.enrich_items(first).await?;
        self.resolve_recipes(first).await?;
        self.build_ecto_price(first).await?;
        Ok(())
    }

    fn reset(&mut self) {
        for api in &self.apis {
            api.reset_abort();
        }
        self.is_ready = false;
        self.items.clear();
        self.accounts.clear();
        self.material_storage_size.clear();
        self.empty_slots.clear();
        self.ecto_salvage_price = None;
        self.recipes.clear();
        self.output_items.clear();
        self.cache = rules::RuleCache::default();
        self.messaging.clear();
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    pub fn include_consumables(&self) -> bool {
        self.include_consumables
    }

    /// Handle for requesting cancellation from another task. Once triggered,
    /// every in-flight data source call raises immediately and the running
    /// load tears its partial state down.
    pub fn abort_handle(&self) -> AbortHandle {
        AbortHandle {
            apis: self.apis.clone(),
            messaging: self.messaging.clone(),
        }
    }

    pub fn has_item(&self, id: ItemId) -> bool {
        self.items
            .get(&id)
            .is_some_and(|item| item.total_count(None) > 0)
    }

    pub(crate) fn add_item(&mut self, id: ItemId, account_bound: bool, source: Source) {
        let item = self.items.entry(id).or_insert_with(|| Item::new(id));
        item.add(source);
        item.account_bound = account_bound;
    }

    pub(crate) fn broadcast(&self, message: &str) {
        self.messaging.broadcast(message);
    }
}

/// Cooperative cancellation for a running load.
#[derive(Clone)]
pub struct AbortHandle {
    apis: Vec<Arc<dyn AccountApi>>,
    messaging: Arc<Messaging>,
}

impl AbortHandle {
    pub fn abort(&self) {
        for api in &self.apis {
            api.abort();
        }
        self.messaging.abort();
    }
}
