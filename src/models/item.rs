use std::collections::BTreeMap;

use crate::models::source::{Place, Source};
use crate::models::types::ItemId;

/// A regular inventory slot holds at most this many units of a stackable item.
/// Material storage is the exception; its per-account capacity is tracked
/// separately.
pub const STACK_SIZE: u32 = 250;

/// Everything the advisor knows about a single item id, merged across all
/// accounts and storage locations.
///
/// Sources are appended in discovery order while the account data is walked.
/// The metadata fields are filled in once by enrichment and read-only after
/// that.
#[derive(Debug, Clone)]
pub struct Item {
    pub item_id: ItemId,
    pub sources: Vec<Source>,

    /// Last-write-wins across all sources seen for this id. In practice the
    /// binding is consistent per id, but that is not enforced.
    pub account_bound: bool,

    pub name: Option<String>,
    pub icon: Option<String>,
    pub rarity: Option<String>,
    pub description: Option<String>,
    pub wiki_link: Option<String>,
    pub stackable: bool,
    pub deletable: bool,
    pub rare_for_salvage: bool,
    /// Trading post sell unit price in copper. Absent until a market lookup
    /// succeeds, and absent forever for items that were never appraised.
    pub price: Option<u32>,
}

impl Item {
    pub fn new(item_id: ItemId) -> Self {
        Self {
            item_id,
            sources: Vec::new(),
            account_bound: false,
            name: None,
            icon: None,
            rarity: None,
            description: None,
            wiki_link: None,
            stackable: false,
            deletable: false,
            rare_for_salvage: false,
            price: None,
        }
    }

    pub fn add(&mut self, source: Source) {
        self.sources.push(source);
    }

    /// Sum of all source counts, optionally restricted to one account.
    pub fn total_count(&self, account: Option<&str>) -> u32 {
        self.sources
            .iter()
            .filter(|s| account.is_none_or(|a| s.account == a))
            .map(|s| s.count)
            .sum()
    }

    /// All sources belonging to `account`, in discovery order.
    pub fn sources_for_account(&self, account: &str) -> Vec<Source> {
        self.sources
            .iter()
            .filter(|s| s.account == account)
            .cloned()
            .collect()
    }

    /// Sources that are not a full stack: a regular slot below [`STACK_SIZE`],
    /// or a material storage entry below that account's storage capacity.
    /// Only sources of accounts present in `storage_size` are considered.
    pub fn partial_stacks(&self, storage_size: &BTreeMap<String, u32>) -> Vec<Source> {
        self.sources
            .iter()
            .filter(|s| match storage_size.get(&s.account) {
                Some(&capacity) => {
                    s.count < STACK_SIZE
                        || (s.place == Place::MaterialStorage && s.count < capacity)
                }
                None => false,
            })
            .cloned()
            .collect()
    }

    /// The stack-merge rule: partial stacks worth consolidating, or an empty
    /// list when merging would not free up any slots.
    ///
    /// Account-bound items are evaluated per account, since their stacks
    /// cannot leave the account; unbound items are evaluated once across all
    /// accounts combined.
    pub fn advice_stacks(&self, storage_size: &BTreeMap<String, u32>) -> Vec<Source> {
        if !self.stackable {
            return Vec::new();
        }

        if !self.account_bound {
            let partials = self.partial_stacks(storage_size);
            if merge_pays_off(partials.len(), self.total_count(None)) {
                partials
            } else {
                Vec::new()
            }
        } else {
            let mut merged = Vec::new();
            for (account, &capacity) in storage_size {
                let single = BTreeMap::from([(account.clone(), capacity)]);
                let partials = self.partial_stacks(&single);
                if merge_pays_off(partials.len(), self.total_count(Some(account.as_str()))) {
                    merged.extend(partials);
                }
            }
            merged
        }
    }
}

/// Merging is only advice when it reduces the number of occupied slots: more
/// than one partial stack, and more partials than the stacks the total would
/// occupy after consolidation.
fn merge_pays_off(partial_count: usize, total: u32) -> bool {
    partial_count > 1 && partial_count as u32 > total.div_ceil(STACK_SIZE)
}

/// Read view handed to the presentation layer: an item paired with the
/// sources a rule found relevant (all of them by default) and an optional
/// advice line.
#[derive(Debug, Clone)]
pub struct ItemForDisplay {
    pub item: Item,
    pub sources: Vec<Source>,
    pub advice: Option<String>,
}

impl ItemForDisplay {
    pub fn new(item: &Item) -> Self {
        Self {
            sources: item.sources.clone(),
            item: item.clone(),
            advice: None,
        }
    }

    pub fn with_sources(item: &Item, sources: Vec<Source>) -> Self {
        Self {
            item: item.clone(),
            sources,
            advice: None,
        }
    }

    pub fn advised(mut self, advice: impl Into<String>) -> Self {
        self.advice = Some(advice.into());
        self
    }
}
