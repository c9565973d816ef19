//! Metadata enrichment: item classification flags, market prices, recipe
//! resolution and the ecto reference price.

use std::collections::BTreeSet;

use crate::api::{AccountApi, ItemInfo};
use crate::error::AppResult;
use crate::model::Model;
use crate::model::tables::{
    COLLECTION_ONLY_DESCRIPTION, CRAFT_RECIPE_KINDS, ECTO_CHANCE, ECTO_ITEM_ID,
    EXTRA_DELETABLE_IDS, NON_STACKABLE_TYPES, RARE_SALVAGE_MIN_LEVEL, RARE_SALVAGE_TYPES,
    SALVAGE_COST, TRADING_POST_TAX,
};
use crate::models::{Ingredient, IngredientKind, Item, ItemId, Recipe};

impl Model {
    /// Batch-fetch metadata for every known id and derive the
    /// classification flags, then appraise everything marked rare-for-salvage.
    ///
    /// Ids the API does not return stay unenriched; rules that need their
    /// metadata skip them rather than failing.
    pub(crate) async fn enrich_items(&mut self, api: &dyn AccountApi) -> AppResult<()> {
        self.broadcast("Loading item details");
        let ids: BTreeSet<ItemId> = self.items.keys().copied().collect();
        let mut appraise = BTreeSet::new();

        for info in api.item_info(&ids).await? {
            let include_consumables = self.include_consumables();
            let Some(item) = self.items.get_mut(&info.id) else {
                continue;
            };
            apply_metadata(item, &info, include_consumables);
            if item.rare_for_salvage {
                appraise.insert(info.id);
            }
        }

        self.broadcast("Loading market prices");
        for price in api.item_prices(&appraise).await? {
            if let Some(item) = self.items.get_mut(&price.id) {
                item.price = Some(price.sells.unit_price);
            }
        }

        Ok(())
    }

    /// Keep the recipes whose kind is in the refinement/cooking set and
    /// whose item ingredients are satisfiable from the current aggregates (a
    /// snapshot check), and synthesize a metadata-only aggregate for each
    /// retained output id.
    pub(crate) async fn resolve_recipes(&mut self, api: &dyn AccountApi) -> AppResult<()> {
        self.broadcast("Loading recipes");
        let mut retained = Vec::new();
        for info in api.recipes().await? {
            if !CRAFT_RECIPE_KINDS.contains(&info.kind.as_str()) {
                continue;
            }
            let recipe = Recipe {
                kind: info.kind,
                output_item_id: info.output_item_id,
                ingredients: info
                    .ingredients
                    .into_iter()
                    .map(|ing| Ingredient {
                        kind: IngredientKind::from_api(&ing.kind),
                        id: ing.id,
                        count: ing.count,
                    })
                    .collect(),
            };
            if self.ingredients_satisfiable(&recipe) {
                retained.push(recipe);
            }
        }

        let output_ids: BTreeSet<ItemId> = retained.iter().map(|r| r.output_item_id).collect();
        if !output_ids.is_empty() {
            self.broadcast("Loading craft output details");
            for info in api.item_info(&output_ids).await? {
                let mut item = Item::new(info.id);
                apply_metadata(&mut item, &info, self.include_consumables());
                self.output_items.insert(info.id, item);
            }
        }

        self.recipes = retained;
        Ok(())
    }

    fn ingredients_satisfiable(&self, recipe: &Recipe) -> bool {
        recipe.ingredients.iter().all(|ing| match ing.item_id() {
            Some(id) => self
                .items
                .get(&id)
                .is_some_and(|item| item.total_count(None) >= ing.count),
            // Currencies and guild upgrades are not checked against storage.
            None => true,
        })
    }

    /// The break-even unit value of salvaging a rare into ectoplasm versus
    /// selling it outright, net of trading post tax and salvage cost.
    pub(crate) async fn build_ecto_price(&mut self, api: &dyn AccountApi) -> AppResult<()> {
        self.broadcast("Loading ecto price");
        let price = api.item_price(ECTO_ITEM_ID).await?;
        let sell = f64::from(price.sells.unit_price);
        self.ecto_salvage_price =
            Some((sell * TRADING_POST_TAX * ECTO_CHANCE - SALVAGE_COST) / TRADING_POST_TAX);
        Ok(())
    }
}

fn apply_metadata(item: &mut Item, info: &ItemInfo, include_consumables: bool) {
    item.name = Some(info.name.clone());
    item.icon = info.icon.clone();
    item.rarity = Some(info.rarity.clone());
    item.description = info.description.clone();
    item.wiki_link = Some(wiki_link(&info.name));

    if !NON_STACKABLE_TYPES.contains(&info.kind.as_str()) {
        item.stackable = true;
    } else if include_consumables
        && info.kind == "Consumable"
        && matches!(
            info.details.as_ref().and_then(|d| d.kind.as_deref()),
            Some("Food") | Some("Utility")
        )
    {
        item.stackable = true;
    }
    // Binds on pickup, not worth merging across accounts.
    if info.has_flag("SoulbindOnAcquire") {
        item.stackable = false;
    }

    if info.description.as_deref() == Some(COLLECTION_ONLY_DESCRIPTION)
        || EXTRA_DELETABLE_IDS.contains(&info.id)
    {
        item.deletable = true;
    }

    if RARE_SALVAGE_TYPES.contains(&info.kind.as_str())
        && info.rarity == "Rare"
        && info.level > RARE_SALVAGE_MIN_LEVEL
        && !info.has_flag("NoSalvage")
        && !info.has_flag("AccountBound")
    {
        item.rare_for_salvage = true;
    }
}

fn wiki_link(name: &str) -> String {
    format!("https://wiki.guildwars2.com/wiki/{}", name.replace(' ', "_"))
}
