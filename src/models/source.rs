/// Where a stack of items was found within one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Place {
    /// A bag slot on the named character
    Character(String),
    /// Account bank tab slot
    Bank,
    /// Shared inventory slot
    SharedSlot,
    /// Account-wide material storage
    MaterialStorage,
}

impl core::fmt::Display for Place {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Place::Character(name) => write!(f, "{name}"),
            Place::Bank => write!(f, "Account Bank"),
            Place::SharedSlot => write!(f, "Shared Inventory Slot"),
            Place::MaterialStorage => write!(f, "Material Storage"),
        }
    }
}

/// One quantity of one item at one inventory location of one account.
///
/// Created once while walking the account data, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub count: u32,
    pub place: Place,
    pub account: String,
}

impl Source {
    pub fn new(count: u32, place: Place, account: impl Into<String>) -> Self {
        Self {
            count,
            place,
            account: account.into(),
        }
    }
}
