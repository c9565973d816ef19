//! Fixed lookup tables driving the advice rules.

use crate::models::ItemId;

/// Item types that occupy one slot each and never stack.
pub const NON_STACKABLE_TYPES: [&str; 9] = [
    "Armor",
    "Back",
    "Gathering",
    "Tool",
    "Trinket",
    "Weapon",
    "Bag",
    "Container",
    "Gizmo",
];

/// Equipment types worth appraising for the salvage-vs-sell decision.
pub const RARE_SALVAGE_TYPES: [&str; 4] = ["Armor", "Back", "Trinket", "Weapon"];

/// Rare equipment below this level salvages into lower-tier materials, not
/// ectoplasm.
pub const RARE_SALVAGE_MIN_LEVEL: u32 = 77;

/// Glob of Ectoplasm, the reference material for the salvage decision.
pub const ECTO_ITEM_ID: ItemId = ItemId(19721);

/// Trading post cut on a sale.
pub const TRADING_POST_TAX: f64 = 0.85;
/// Average globs per salvage of a level-capped rare.
pub const ECTO_CHANCE: f64 = 0.875;
/// Per-use cost of the salvage kit.
pub const SALVAGE_COST: f64 = 0.10496;

pub const COLLECTION_ONLY_DESCRIPTION: &str =
    "This item only has value as part of a collection.";

pub const SALVAGE_ITEM_DESCRIPTION: &str = "Salvage Item";

/// Leftover collection trophies the description heuristic misses.
pub const EXTRA_DELETABLE_IDS: [ItemId; 2] = [ItemId(43319), ItemId(73268)];

/// Essences of Luck (fine, masterwork, rare); a surplus can be crafted into
/// higher tiers that take less space.
pub const LUCK_ESSENCES: [ItemId; 3] = [ItemId(45175), ItemId(45176), ItemId(45177)];

/// A feeder material and the gobbler that consumes it daily.
pub struct Gobble {
    pub feeder: ItemId,
    pub gobbler: ItemId,
    /// Units consumed per gobble.
    pub gobble_size: u32,
}

pub const GOBBLES: [Gobble; 5] = [
    // Pile of Bloodstone Dust -> Herta
    Gobble { feeder: ItemId(46731), gobbler: ItemId(77093), gobble_size: 250 },
    // Pile of Bloodstone Dust -> Mawdrey II
    Gobble { feeder: ItemId(46731), gobbler: ItemId(66999), gobble_size: 50 },
    // Dragonite Ore -> Princess
    Gobble { feeder: ItemId(46733), gobbler: ItemId(69887), gobble_size: 50 },
    // Empyreal Fragment -> Star of Gratitude
    Gobble { feeder: ItemId(46735), gobbler: ItemId(68369), gobble_size: 50 },
    // Unbound Magic -> Spearmarshal's Plea
    Gobble { feeder: ItemId(83103), gobbler: ItemId(83305), gobble_size: 25 },
];

pub struct MiscAdvice {
    pub item_id: ItemId,
    pub min_count: u32,
    pub text: &'static str,
}

pub const MISC_ADVICE: [MiscAdvice; 3] = [
    MiscAdvice {
        item_id: ItemId(43773), // Quartz Crystal
        min_count: 25,
        text: "Transform Quartz Crystals into a Charged Quartz Crystal at a place of power.",
    },
    MiscAdvice {
        item_id: ItemId(66608), // Pile of Silky Sand
        min_count: 100,
        text: "Sift throught silky sand.",
    },
    MiscAdvice {
        item_id: ItemId(48717), // Aetherkey Piece
        min_count: 4,
        text: "Craft 'Completed Aetherkey'.",
    },
];

pub struct PlayAdvice {
    pub item_id: ItemId,
    pub text: &'static str,
}

/// Items that are only used up by going out and playing specific content.
pub const PLAY_TO_CONSUME: [PlayAdvice; 23] = [
    PlayAdvice { item_id: ItemId(78758), text: "Trade to get bounty for bandit leader." },
    PlayAdvice {
        item_id: ItemId(78886),
        text: "Have in inventory while defeating a bandit leader to spawn the Legendary Bandit Executioner",
    },
    PlayAdvice {
        item_id: ItemId(84335),
        text: "Use during a treasure hunt meta in Desert Highlands to spawn chests",
    },
    PlayAdvice {
        item_id: ItemId(67826),
        text: "Use in the Silverwastes after a meta completes to spawn chests. Make sure you have required keys.",
    },
    PlayAdvice {
        item_id: ItemId(67979),
        text: "Open a greater nightmare pod in the Silverwastes after completing meta.",
    },
    PlayAdvice { item_id: ItemId(67818), text: "Use during breach event in Silverwastes." },
    PlayAdvice { item_id: ItemId(67780), text: "Open Tarnished chest in Silverwastes." },
    PlayAdvice {
        item_id: ItemId(93407),
        text: "Use in the Drizzlewood Coast to spawn chests. Make sure you have required keys.",
    },
    PlayAdvice {
        item_id: ItemId(87517),
        text: "Open krait Sunken Chests to progress a Master Diver achievement.",
    },
    PlayAdvice {
        item_id: ItemId(48716),
        text: "Open chests in the Aetherpath of the Twilight Arbor dungeon.",
    },
    PlayAdvice { item_id: ItemId(78782), text: "Complete this bounty." },
    PlayAdvice { item_id: ItemId(78754), text: "Complete this bounty." },
    PlayAdvice { item_id: ItemId(78786), text: "Complete this bounty." },
    PlayAdvice { item_id: ItemId(78784), text: "Complete this bounty." },
    PlayAdvice { item_id: ItemId(78781), text: "Complete this bounty." },
    PlayAdvice { item_id: ItemId(78883), text: "Complete this bounty." },
    PlayAdvice { item_id: ItemId(78859), text: "Complete this bounty." },
    PlayAdvice { item_id: ItemId(78988), text: "Complete this bounty." },
    PlayAdvice { item_id: ItemId(78867), text: "Complete this bounty." },
    PlayAdvice { item_id: ItemId(78954), text: "Complete this bounty." },
    PlayAdvice { item_id: ItemId(71627), text: "Complete events in the Verdant Brink." },
    PlayAdvice { item_id: ItemId(75024), text: "Complete events in the Auric Basin." },
    PlayAdvice { item_id: ItemId(71207), text: "Complete events in the Tangled Depths." },
];

/// Liquid karma consumables from daily rewards.
pub const KARMA_CONSUMABLES: [ItemId; 4] =
    [ItemId(78601), ItemId(79044), ItemId(79163), ItemId(79222)];

pub const KARMA_ADVICE: &str = "Consume for karma.";

/// Living World season 3 map currencies: Blood Ruby, Petrified Wood, Fresh
/// Winterberry, Jade Shard, Fire Orchid Blossom, Orrian Pearl.
pub const LS3_CURRENCIES: [ItemId; 6] = [
    ItemId(79280),
    ItemId(79469),
    ItemId(79899),
    ItemId(80332),
    ItemId(81127),
    ItemId(81706),
];

pub const LS3_ADVICE: &str =
    "Consume to move LS3 currency into the account wallet. Consider keeping some for ascended trinkets.";

/// Living World season 4 map currencies: Kralkatite Ore, Difluorite Crystal,
/// Inscribed Shard, Lump of Mistonium, Branded Mass, Mistborn Mote.
pub const LS4_CURRENCIES: [ItemId; 6] = [
    ItemId(86069),
    ItemId(86977),
    ItemId(87645),
    ItemId(88955),
    ItemId(89537),
    ItemId(90783),
];

pub const LS4_ADVICE: &str =
    "Consume to move LS4 currency into the account wallet. Also used for LS4 legendary trinkets.";

/// Icebrood Saga map currencies: Hatched Chili, Eternal Ice Shard, Tyrian
/// Defense Seal, War Supplies.
pub const IBS_CURRENCIES: [ItemId; 4] =
    [ItemId(92072), ItemId(92272), ItemId(93146), ItemId(93322)];

pub const IBS_ADVICE: &str = "Consume to move Icebrood Saga currency into the account wallet.";

/// Recipe kinds worth crafting purely to consume down ingredient stacks:
/// refinement of raw materials and basic cooking ingredients.
pub const CRAFT_RECIPE_KINDS: [&str; 4] = [
    "Refinement",
    "RefinementEctoplasm",
    "RefinementObsidian",
    "IngredientCooking",
];
