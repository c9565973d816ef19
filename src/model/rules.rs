//! The advice rule battery.
//!
//! Every rule is a pure query over the frozen model; results are computed on
//! first use and memoized for the lifetime of the model instance, so a rule
//! may be evaluated repeatedly (or concurrently) at no extra cost.

use once_cell::sync::OnceCell;

use crate::model::Model;
use crate::model::tables::{
    ECTO_ITEM_ID, GOBBLES, IBS_ADVICE, IBS_CURRENCIES, KARMA_ADVICE, KARMA_CONSUMABLES,
    LS3_ADVICE, LS3_CURRENCIES, LS4_ADVICE, LS4_CURRENCIES, LUCK_ESSENCES, MISC_ADVICE,
    PLAY_TO_CONSUME, SALVAGE_ITEM_DESCRIPTION,
};
use crate::models::{Item, ItemForDisplay, STACK_SIZE};

#[derive(Default)]
pub(crate) struct RuleCache {
    stacks: OnceCell<Vec<ItemForDisplay>>,
    vendor: OnceCell<Vec<ItemForDisplay>>,
    rare_salvage: OnceCell<Vec<ItemForDisplay>>,
    craft_luck: OnceCell<Vec<ItemForDisplay>>,
    just_delete: OnceCell<Vec<ItemForDisplay>>,
    just_salvage: OnceCell<Vec<ItemForDisplay>>,
    play_to_consume: OnceCell<Vec<ItemForDisplay>>,
    gobble: OnceCell<Vec<ItemForDisplay>>,
    misc: OnceCell<Vec<ItemForDisplay>>,
    karma: OnceCell<Vec<ItemForDisplay>>,
    ls_currency: OnceCell<Vec<ItemForDisplay>>,
    craft: OnceCell<Vec<ItemForDisplay>>,
}

impl Model {
    /// Partial stacks that would free slots if merged.
    pub fn advice_stacks(&self) -> &[ItemForDisplay] {
        self.cache.stacks.get_or_init(|| {
            self.items
                .values()
                .filter_map(|item| {
                    let sources = item.advice_stacks(&self.material_storage_size);
                    (!sources.is_empty()).then(|| ItemForDisplay::with_sources(item, sources))
                })
                .collect()
        })
    }

    /// Junk rarity sells to any vendor.
    pub fn vendor_advice(&self) -> &[ItemForDisplay] {
        self.cache.vendor.get_or_init(|| {
            self.items
                .values()
                .filter(|item| item.rarity.as_deref() == Some("Junk"))
                .map(ItemForDisplay::new)
                .collect()
        })
    }

    /// Salvage-vs-sell triage for appraised rare equipment. Items whose
    /// price lookup never returned are omitted; account-bound items that are
    /// not worth salvaging cannot be sold either and drop out entirely.
    pub fn rare_salvage_advice(&self) -> &[ItemForDisplay] {
        self.cache.rare_salvage.get_or_init(|| {
            let Some(ecto_price) = self.ecto_salvage_price else {
                return Vec::new();
            };
            self.items
                .values()
                .filter(|item| item.rare_for_salvage)
                .filter_map(|item| {
                    let price = item.price?;
                    if f64::from(price) > ecto_price {
                        Some(ItemForDisplay::new(item).advised("Salvage!"))
                    } else if !item.account_bound {
                        Some(ItemForDisplay::new(item).advised("Sell!"))
                    } else {
                        None
                    }
                })
                .collect()
        })
    }

    /// More than a stack of luck essence on one account crafts up a tier.
    pub fn craft_luck_advice(&self) -> &[ItemForDisplay] {
        self.cache.craft_luck.get_or_init(|| {
            let mut advice = Vec::new();
            for luck_id in LUCK_ESSENCES {
                let Some(item) = self.items.get(&luck_id) else {
                    continue;
                };
                for account in &self.accounts {
                    if item.total_count(Some(account.as_str())) > STACK_SIZE {
                        advice.push(ItemForDisplay::with_sources(
                            item,
                            item.sources_for_account(account),
                        ));
                    }
                }
            }
            advice
        })
    }

    /// Collection leftovers with no remaining use.
    pub fn just_delete_advice(&self) -> &[ItemForDisplay] {
        self.cache.just_delete.get_or_init(|| {
            self.items
                .values()
                .filter(|item| item.deletable)
                .map(ItemForDisplay::new)
                .collect()
        })
    }

    /// Items that exist purely to be salvaged. Ectoplasm technically carries
    /// the same description but is kept as a material.
    pub fn just_salvage_advice(&self) -> &[ItemForDisplay] {
        self.cache.just_salvage.get_or_init(|| {
            self.items
                .values()
                .filter(|item| {
                    item.description.as_deref() == Some(SALVAGE_ITEM_DESCRIPTION)
                        && item.item_id != ECTO_ITEM_ID
                })
                .map(ItemForDisplay::new)
                .collect()
        })
    }

    /// Items used up by playing specific content.
    pub fn play_to_consume_advice(&self) -> &[ItemForDisplay] {
        self.cache.play_to_consume.get_or_init(|| {
            PLAY_TO_CONSUME
                .iter()
                .filter(|play| self.has_item(play.item_id))
                .filter_map(|play| {
                    let item = self.items.get(&play.item_id)?;
                    Some(ItemForDisplay::new(item).advised(play.text))
                })
                .collect()
        })
    }

    /// When a feeder material overflows an account's material storage and
    /// the matching gobbler is on hand, feed it.
    pub fn gobble_advice(&self) -> &[ItemForDisplay] {
        self.cache.gobble.get_or_init(|| {
            let mut advice = Vec::new();
            for gobble in &GOBBLES {
                let (Some(feeder), Some(gobbler)) = (
                    self.items.get(&gobble.feeder),
                    self.items.get(&gobble.gobbler),
                ) else {
                    continue;
                };
                if feeder.total_count(None) == 0 || gobbler.total_count(None) == 0 {
                    continue;
                }
                for account in &self.accounts {
                    let capacity = self.storage_capacity(account);
                    if feeder.total_count(Some(account.as_str())) > capacity {
                        advice.push(ItemForDisplay::with_sources(
                            gobbler,
                            feeder.sources_for_account(account),
                        ));
                    }
                }
            }
            advice
        })
    }

    /// Fixed per-item thresholds that do not fit any other rule.
    pub fn misc_advice(&self) -> &[ItemForDisplay] {
        self.cache.misc.get_or_init(|| {
            MISC_ADVICE
                .iter()
                .filter_map(|misc| {
                    let item = self.items.get(&misc.item_id)?;
                    (item.total_count(None) >= misc.min_count)
                        .then(|| ItemForDisplay::new(item).advised(misc.text))
                })
                .collect()
        })
    }

    /// Liquid karma bottles are pure wallet filler.
    pub fn karma_advice(&self) -> &[ItemForDisplay] {
        self.cache.karma.get_or_init(|| {
            KARMA_CONSUMABLES
                .iter()
                .filter(|id| self.has_item(**id))
                .filter_map(|id| {
                    let item = self.items.get(id)?;
                    Some(ItemForDisplay::new(item).advised(KARMA_ADVICE))
                })
                .collect()
        })
    }

    /// Living World and Icebrood Saga map currencies overflowing an
    /// account's material storage can be consumed into the wallet.
    pub fn ls_currency_advice(&self) -> &[ItemForDisplay] {
        self.cache.ls_currency.get_or_init(|| {
            let groups: [(&[crate::models::ItemId], &str); 3] = [
                (&LS3_CURRENCIES, LS3_ADVICE),
                (&LS4_CURRENCIES, LS4_ADVICE),
                (&IBS_CURRENCIES, IBS_ADVICE),
            ];

            let mut advice = Vec::new();
            for (ids, text) in groups {
                for id in ids {
                    let Some(item) = self.items.get(id) else {
                        continue;
                    };
                    for account in &self.accounts {
                        if item.total_count(Some(account.as_str())) > self.storage_capacity(account) {
                            advice.push(
                                ItemForDisplay::with_sources(
                                    item,
                                    item.sources_for_account(account),
                                )
                                .advised(text),
                            );
                        }
                    }
                }
            }
            advice
        })
    }

    /// Refinement/cooking recipes that are craftable right now and would
    /// consume down at least one oversized ingredient stack. Recipes with an
    /// account-bound ingredient are evaluated per account, the rest once
    /// across all accounts.
    pub fn craft_advice(&self) -> &[ItemForDisplay] {
        self.cache.craft.get_or_init(|| {
            let mut advice = Vec::new();

            'recipes: for recipe in &self.recipes {
                let Some(output) = self.output_items.get(&recipe.output_item_id) else {
                    continue;
                };

                let mut ingredients: Vec<(&Item, u32)> = Vec::new();
                for ingredient in &recipe.ingredients {
                    if let Some(id) = ingredient.item_id() {
                        match self.items.get(&id) {
                            Some(item) => ingredients.push((item, ingredient.count)),
                            None => continue 'recipes,
                        }
                    }
                }

                if ingredients.iter().any(|(item, _)| item.account_bound) {
                    for account in &self.accounts {
                        if let Some(found) =
                            craft_candidate(output, &ingredients, Some(account.as_str()))
                        {
                            advice.push(found);
                        }
                    }
                } else if let Some(found) = craft_candidate(output, &ingredients, None) {
                    advice.push(found);
                }
            }

            advice
        })
    }

    fn storage_capacity(&self, account: &str) -> u32 {
        self.material_storage_size
            .get(account)
            .copied()
            .unwrap_or(0)
    }
}

/// One craft suggestion, if the recipe is craftable within `account` (or
/// globally for `None`) and at least one ingredient stack exceeds 250. The
/// attributed sources are those oversized stacks.
fn craft_candidate(
    output: &Item,
    ingredients: &[(&Item, u32)],
    account: Option<&str>,
) -> Option<ItemForDisplay> {
    let craftable = ingredients
        .iter()
        .all(|(item, needed)| item.total_count(account) >= *needed);
    if !craftable {
        return None;
    }

    let oversized: Vec<&Item> = ingredients
        .iter()
        .map(|(item, _)| *item)
        .filter(|item| item.total_count(account) > STACK_SIZE)
        .collect();
    if oversized.is_empty() {
        return None;
    }

    let sources = oversized
        .iter()
        .flat_map(|item| match account {
            Some(account) => item.sources_for_account(account),
            None => item.sources.clone(),
        })
        .collect();
    Some(ItemForDisplay::with_sources(output, sources))
}
