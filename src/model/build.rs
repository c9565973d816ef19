//! Inventory walk: turns the raw per-account API payloads into Source
//! Records on the item aggregates.

use crate::api::{AccountApi, ItemSlot};
use crate::error::AppResult;
use crate::model::Model;
use crate::models::{Place, STACK_SIZE, Source};

impl Model {
    /// Size an account's material storage: the smallest multiple of 250
    /// covering the largest stack observed there (0 when empty).
    pub(crate) async fn build_storage_size(&mut self, api: &dyn AccountApi) -> AppResult<()> {
        let account = api.account_name().await?;
        let max_count = api
            .material_storage()
            .await?
            .iter()
            .map(|m| m.count)
            .max()
            .unwrap_or(0);

        self.material_storage_size
            .insert(account, max_count.div_ceil(STACK_SIZE) * STACK_SIZE);
        Ok(())
    }

    /// Walk character bags, material storage, bank and shared slots of one
    /// account. Empty slots are counted, occupied ones become sources.
    pub(crate) async fn build_inventory(&mut self, api: &dyn AccountApi) -> AppResult<()> {
        let account = api.account_name().await?;
        self.empty_slots.entry(account.clone()).or_insert(0);

        self.broadcast(&format!("Loading characters@{account}"));
        for character in api.characters().await? {
            self.broadcast(&format!("Loading character {character}@{account}"));
            let inventory = api.character_inventory(&character).await?;
            for bag in inventory.bags.into_iter().flatten() {
                for slot in bag.inventory {
                    match slot {
                        Some(slot) => {
                            self.add_slot(&slot, Place::Character(character.clone()), &account);
                        }
                        None => self.count_empty_slot(&account),
                    }
                }
            }
        }

        self.broadcast(&format!("Loading material storage@{account}"));
        for slot in api.material_storage().await? {
            self.add_slot(&slot, Place::MaterialStorage, &account);
        }

        self.broadcast(&format!("Loading bank@{account}"));
        for slot in api.bank().await? {
            match slot {
                Some(slot) => self.add_slot(&slot, Place::Bank, &account),
                None => self.count_empty_slot(&account),
            }
        }

        self.broadcast(&format!("Loading shared slots@{account}"));
        for slot in api.shared_slots().await? {
            match slot {
                Some(slot) => self.add_slot(&slot, Place::SharedSlot, &account),
                None => self.count_empty_slot(&account),
            }
        }

        Ok(())
    }

    fn add_slot(&mut self, slot: &ItemSlot, place: Place, account: &str) {
        self.add_item(
            slot.id,
            slot.is_account_bound(),
            Source::new(slot.count, place, account),
        );
    }

    fn count_empty_slot(&mut self, account: &str) {
        *self.empty_slots.entry(account.to_string()).or_insert(0) += 1;
    }
}
