pub mod item;
pub mod recipe;
pub mod source;
pub mod types;

pub use item::{Item, ItemForDisplay, STACK_SIZE};
pub use recipe::{Ingredient, IngredientKind, Recipe};
pub use source::{Place, Source};
pub use types::ItemId;
