use crate::models::types::ItemId;

/// What an ingredient slot of a recipe refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientKind {
    Item,
    Currency,
    Other,
}

impl IngredientKind {
    pub fn from_api(kind: &str) -> Self {
        match kind {
            "Item" => IngredientKind::Item,
            "Currency" => IngredientKind::Currency,
            _ => IngredientKind::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ingredient {
    pub kind: IngredientKind,
    pub id: u32,
    pub count: u32,
}

impl Ingredient {
    /// Item ingredients are the only ones checked against the inventory;
    /// currencies and guild upgrades are assumed available.
    pub fn item_id(&self) -> Option<ItemId> {
        (self.kind == IngredientKind::Item).then_some(ItemId(self.id))
    }
}

/// A recipe that survived the feasibility filter: its crafting kind is in the
/// refinement/cooking set and all item ingredients were satisfiable at
/// resolution time (a snapshot check, not a live one).
#[derive(Debug, Clone)]
pub struct Recipe {
    pub kind: String,
    pub output_item_id: ItemId,
    pub ingredients: Vec<Ingredient>,
}
