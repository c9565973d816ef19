mod common;

use std::sync::Arc;

use common::{MockApi, bound_slot, info, material, price, recipe, slot, with_description};
use restack::messaging::Messaging;
use restack::model::Model;
use restack::model::tables::{ECTO_ITEM_ID, GOBBLES, LS3_CURRENCIES, LUCK_ESSENCES, MISC_ADVICE, PLAY_TO_CONSUME};
use restack::models::{ItemForDisplay, ItemId};

async fn load(api: MockApi) -> Model {
    load_many(vec![api]).await
}

async fn load_many(apis: Vec<MockApi>) -> Model {
    let apis = apis
        .into_iter()
        .map(|api| Arc::new(api) as Arc<dyn restack::api::AccountApi>)
        .collect();
    let mut model = Model::new(apis, Arc::new(Messaging::new()), false);
    model.load().await.expect("load should succeed");
    model
}

fn ids(advices: &[ItemForDisplay]) -> Vec<ItemId> {
    advices.iter().map(|a| a.item.item_id).collect()
}

#[tokio::test]
async fn stacks_rule_selects_only_profitable_merges() {
    let mut api = MockApi::new("main.1001").with_character(
        "Nova",
        vec![Some(slot(19697, 100)), Some(slot(19699, 150))],
    );
    api.bank = vec![
        Some(slot(19697, 100)),
        Some(slot(19699, 150)),
        Some(slot(19697, 100)),
    ];
    api.item_infos = vec![material(19697, "Copper Ore"), material(19699, "Iron Ore")];

    let model = load(api).await;
    let advices = model.advice_stacks();

    // 3 x 100 consolidates into 2 stacks; 2 x 150 is already minimal.
    assert_eq!(ids(advices), vec![ItemId(19697)]);
    assert_eq!(advices[0].sources.len(), 3);
}

#[tokio::test]
async fn vendor_rule_picks_junk() {
    let mut api = MockApi::new("main.1001");
    api.bank = vec![Some(slot(24, 13)), Some(slot(19697, 5))];
    api.item_infos = vec![
        info(24, "Broken Spike", "Trophy", "Junk", 0),
        material(19697, "Copper Ore"),
    ];

    let model = load(api).await;
    assert_eq!(ids(model.vendor_advice()), vec![ItemId(24)]);
}

#[tokio::test]
async fn rare_salvage_rule_triages_by_price_and_binding() {
    let mut api = MockApi::new("main.1001");
    api.bank = vec![
        Some(slot(40001, 1)),       // price above break-even -> Salvage!
        Some(slot(40002, 1)),       // below break-even, tradeable -> Sell!
        Some(bound_slot(40003, 1)), // below break-even, bound -> dropped
        Some(slot(40004, 1)),       // never appraised -> dropped
    ];
    api.item_infos = vec![
        info(40001, "Krait Slayer", "Weapon", "Rare", 80),
        info(40002, "Bandit Blade", "Weapon", "Rare", 80),
        info(40003, "Heirloom Blade", "Weapon", "Rare", 80),
        info(40004, "Unlisted Blade", "Weapon", "Rare", 80),
    ];
    // Break-even is just under 88 copper at an ecto sell price of 100.
    api.unit_prices.insert(ECTO_ITEM_ID, 100);
    api.prices = vec![price(40001, 100), price(40002, 80), price(40003, 80)];

    let model = load(api).await;
    let advices = model.rare_salvage_advice();

    assert_eq!(ids(advices), vec![ItemId(40001), ItemId(40002)]);
    assert_eq!(advices[0].advice.as_deref(), Some("Salvage!"));
    assert_eq!(advices[1].advice.as_deref(), Some("Sell!"));
}

#[tokio::test]
async fn craft_luck_rule_checks_each_account_separately() {
    let luck = LUCK_ESSENCES[0];
    let mut first = MockApi::new("main.1001");
    first.bank = vec![Some(slot(luck.0, 200)), Some(slot(luck.0, 150))];
    let mut second = MockApi::new("alt.2002");
    second.bank = vec![Some(slot(luck.0, 200))];
    first.item_infos = vec![material(luck.0, "Essence of Luck")];

    let model = load_many(vec![first, second]).await;
    let advices = model.craft_luck_advice();

    assert_eq!(advices.len(), 1);
    assert!(advices[0].sources.iter().all(|s| s.account == "main.1001"));
    assert_eq!(advices[0].sources.len(), 2);
}

#[tokio::test]
async fn just_delete_rule_lists_collection_leftovers() {
    let mut api = MockApi::new("main.1001");
    api.bank = vec![Some(slot(30003, 1))];
    api.item_infos = vec![with_description(
        info(30003, "Old Token", "Trophy", "Basic", 0),
        "This item only has value as part of a collection.",
    )];

    let model = load(api).await;
    assert_eq!(ids(model.just_delete_advice()), vec![ItemId(30003)]);
}

#[tokio::test]
async fn just_salvage_rule_excludes_ectoplasm_itself() {
    let mut api = MockApi::new("main.1001");
    api.bank = vec![Some(slot(68, 1)), Some(slot(ECTO_ITEM_ID.0, 250))];
    api.item_infos = vec![
        with_description(info(68, "Bag of Jewels", "Trophy", "Fine", 0), "Salvage Item"),
        with_description(
            material(ECTO_ITEM_ID.0, "Glob of Ectoplasm"),
            "Salvage Item",
        ),
    ];

    let model = load(api).await;
    assert_eq!(ids(model.just_salvage_advice()), vec![ItemId(68)]);
}

#[tokio::test]
async fn play_to_consume_rule_uses_the_lookup_table() {
    let play = &PLAY_TO_CONSUME[0];
    let mut api = MockApi::new("main.1001");
    api.bank = vec![Some(slot(play.item_id.0, 2))];
    api.item_infos = vec![info(play.item_id.0, "Bandit Skeleton Key", "Trophy", "Fine", 0)];

    let model = load(api).await;
    let advices = model.play_to_consume_advice();

    assert_eq!(ids(advices), vec![play.item_id]);
    assert_eq!(advices[0].advice.as_deref(), Some(play.text));
}

#[tokio::test]
async fn gobble_rule_fires_when_feeder_overflows_storage() {
    let gobble = &GOBBLES[0];
    let mut api = MockApi::new("main.1001");
    // Storage capacity rounds to 250; another 400 in the bank overflows it.
    api.materials = vec![slot(gobble.feeder.0, 250)];
    api.bank = vec![Some(slot(gobble.feeder.0, 400))];
    api.shared = vec![Some(slot(gobble.gobbler.0, 1))];
    api.item_infos = vec![
        material(gobble.feeder.0, "Pile of Bloodstone Dust"),
        info(gobble.gobbler.0, "Herta", "Gizmo", "Rare", 80),
    ];

    let model = load(api).await;
    let advices = model.gobble_advice();

    assert_eq!(ids(advices), vec![gobble.gobbler]);
    // Sources point at the feeder stacks to consume.
    assert_eq!(advices[0].sources.len(), 2);
    assert_eq!(
        advices[0].sources.iter().map(|s| s.count).sum::<u32>(),
        650
    );
}

#[tokio::test]
async fn gobble_rule_needs_the_gobbler_on_hand() {
    let gobble = &GOBBLES[0];
    let mut api = MockApi::new("main.1001");
    api.bank = vec![Some(slot(gobble.feeder.0, 400))];
    api.item_infos = vec![material(gobble.feeder.0, "Pile of Bloodstone Dust")];

    let model = load(api).await;
    assert!(model.gobble_advice().is_empty());
}

#[tokio::test]
async fn misc_rule_applies_minimum_quantities() {
    let misc = &MISC_ADVICE[0];
    let mut api = MockApi::new("main.1001");
    api.bank = vec![Some(slot(misc.item_id.0, misc.min_count))];
    api.item_infos = vec![material(misc.item_id.0, "Quartz Crystal")];

    let model = load(api).await;
    let advices = model.misc_advice();
    assert_eq!(ids(advices), vec![misc.item_id]);
    assert_eq!(advices[0].advice.as_deref(), Some(misc.text));

    let mut short = MockApi::new("main.1001");
    short.bank = vec![Some(slot(misc.item_id.0, misc.min_count - 1))];
    short.item_infos = vec![material(misc.item_id.0, "Quartz Crystal")];
    let model = load(short).await;
    assert!(model.misc_advice().is_empty());
}

#[tokio::test]
async fn karma_rule_fires_on_any_held_consumable() {
    let karma = restack::model::tables::KARMA_CONSUMABLES[0];
    let mut api = MockApi::new("main.1001");
    api.bank = vec![Some(slot(karma.0, 1))];
    api.item_infos = vec![info(karma.0, "Swig of Liquid Karma", "Consumable", "Fine", 0)];

    let model = load(api).await;
    let advices = model.karma_advice();
    assert_eq!(ids(advices), vec![karma]);
    assert_eq!(advices[0].advice.as_deref(), Some("Consume for karma."));
}

#[tokio::test]
async fn ls_currency_rule_compares_against_storage_capacity() {
    let ruby = LS3_CURRENCIES[0];
    let mut api = MockApi::new("main.1001");
    api.materials = vec![slot(ruby.0, 250)];
    api.bank = vec![Some(slot(ruby.0, 100))];
    api.item_infos = vec![material(ruby.0, "Blood Ruby")];

    let model = load(api).await;
    let advices = model.ls_currency_advice();

    // 350 held against a capacity of 250.
    assert_eq!(ids(advices), vec![ruby]);
    assert!(advices[0].advice.is_some());

    let mut fits = MockApi::new("main.1001");
    fits.materials = vec![slot(ruby.0, 200)];
    fits.item_infos = vec![material(ruby.0, "Blood Ruby")];
    let model = load(fits).await;
    assert!(model.ls_currency_advice().is_empty());
}

#[tokio::test]
async fn craft_rule_wants_craftable_and_an_oversized_stack() {
    let mut api = MockApi::new("main.1001");
    api.bank = vec![Some(slot(19697, 300))];
    api.item_infos = vec![material(19697, "Copper Ore"), material(19680, "Copper Ingot")];
    api.recipes = vec![recipe("Refinement", 19680, &[(19697, 50)])];

    let model = load(api).await;
    let advices = model.craft_advice();

    assert_eq!(ids(advices), vec![ItemId(19680)]);
    assert_eq!(advices[0].sources.len(), 1);
    assert_eq!(advices[0].sources[0].count, 300);
}

#[tokio::test]
async fn craft_rule_skips_recipes_without_an_oversized_stack() {
    let mut api = MockApi::new("main.1001");
    api.bank = vec![Some(slot(19697, 200))];
    api.item_infos = vec![material(19697, "Copper Ore"), material(19680, "Copper Ingot")];
    api.recipes = vec![recipe("Refinement", 19680, &[(19697, 50)])];

    let model = load(api).await;
    assert!(model.craft_advice().is_empty());
}

#[tokio::test]
async fn craft_rule_evaluates_bound_ingredients_per_account() {
    let mut first = MockApi::new("main.1001");
    first.bank = vec![Some(bound_slot(19700, 300))];
    first.item_infos = vec![
        material(19700, "Bloodstone Brick"),
        material(19701, "Bloodstone Block"),
    ];
    first.recipes = vec![recipe("Refinement", 19701, &[(19700, 50)])];

    let mut second = MockApi::new("alt.2002");
    second.bank = vec![Some(bound_slot(19700, 100))];

    let model = load_many(vec![first, second]).await;
    let advices = model.craft_advice();

    // Only the first account holds more than a stack of the bound ingredient.
    assert_eq!(advices.len(), 1);
    assert!(advices[0].sources.iter().all(|s| s.account == "main.1001"));
}

#[tokio::test]
async fn rules_are_memoized_per_model_instance() {
    let mut api = MockApi::new("main.1001");
    api.bank = vec![Some(slot(24, 13))];
    api.item_infos = vec![info(24, "Broken Spike", "Trophy", "Junk", 0)];

    let model = load(api).await;
    let first = model.vendor_advice();
    let second = model.vendor_advice();

    assert_eq!(first.as_ptr(), second.as_ptr());
    assert_eq!(first.len(), second.len());
}

#[tokio::test]
async fn rules_skip_items_without_metadata() {
    let mut api = MockApi::new("main.1001");
    // Three partial stacks, but the id never resolves to metadata.
    api.bank = vec![
        Some(slot(55555, 100)),
        Some(slot(55555, 100)),
        Some(slot(55555, 100)),
    ];

    let model = load(api).await;
    assert!(model.advice_stacks().is_empty());
    assert!(model.vendor_advice().is_empty());
    assert!(model.rare_salvage_advice().is_empty());
}
