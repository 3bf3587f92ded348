//! Effect interpreter integration tests.
//!
//! These tests run effect lists against a `Table` and verify:
//! - Ordering and composite effects
//! - Selection effects with scripted and policy choosers
//! - Outpost-first targeting and the forced discard re-prompt
//! - Graceful handling of unknown effects and bad picks

use std::sync::Arc;

use realm_rules::cards::{Ability, CardDefinition, CardId, CardKind, Faction, Trigger};
use realm_rules::choice::{Answer, NotificationLog, Pile, ScriptedChooser};
use realm_rules::core::{EngineConfig, InstanceId, PlayerId};
use realm_rules::effects::{
    CardFilter, ChoiceOption, CountZone, Destination, Effect, EffectResolver, ResolverContext, ScrapSource,
};
use realm_rules::rules::RulesState;
use realm_rules::triggers::Condition;
use realm_rules::zones::{Board, Table, Zone};

const P0: PlayerId = PlayerId::FIRST;
const P1: PlayerId = PlayerId::SECOND;

fn card(name: &str, kind: CardKind) -> Arc<CardDefinition> {
    Arc::new(CardDefinition::new(CardId(0), name, kind))
}

fn base(name: &str, outpost: bool) -> Arc<CardDefinition> {
    let def = CardDefinition::new(CardId(0), name, CardKind::Base).with_defense(4);
    Arc::new(if outpost { def.as_outpost() } else { def })
}

fn fill(table: &mut Table, owner: PlayerId, zone: Zone, names: &[&str]) -> Vec<InstanceId> {
    names
        .iter()
        .map(|name| table.spawn_into(card(name, CardKind::Ship), owner, zone))
        .collect()
}

/// Test that effects apply in order and stay visible to later effects.
#[test]
fn test_sequential_resources() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[
        Effect::trade(2),
        Effect::combat(3),
        Effect::authority(4),
        Effect::combat(-1),
    ]);

    assert_eq!(table.trade(P0), 2);
    assert_eq!(table.combat(P0), 2);
    assert_eq!(table.authority(P0), 54);
    assert_eq!(table.combat(P1), 0);
}

/// Test that an unknown effect is reported and the rest still runs.
#[test]
fn test_unknown_effect_is_skipped() {
    let effects: Vec<Effect> = serde_json::from_str(
        r#"[{"type": "combat", "amount": 1}, {"type": "warp_drive", "amount": 9}, {"type": "trade", "amount": 2}]"#,
    )
    .unwrap();
    assert_eq!(effects[1], Effect::Unknown);

    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);
    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&effects);

    assert_eq!(table.combat(P0), 1);
    assert_eq!(table.trade(P0), 2);
    assert!(log.contains("Unknown effect type skipped."));
}

/// Test the composite effects: choose_one, if, repeat and count.
#[test]
fn test_composite_effects() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut me = ScriptedChooser::indices([1]);
    let mut ctx = ResolverContext::new(&mut log).with_chooser(P0, &mut me);

    let blob = Arc::new(
        CardDefinition::new(CardId(0), "Blob Fighter", CardKind::Ship).with_faction(Faction::Blob),
    );
    let fighter = table.spawn_into(Arc::clone(&blob), P0, Zone::InPlay);
    table.spawn_into(blob, P0, Zone::InPlay);
    rules.ledger.record_played(P0, fighter);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[
        Effect::choose_one([
            ChoiceOption::new("Trade", vec![Effect::trade(5)]),
            ChoiceOption::new("Combat", vec![Effect::combat(5)]),
        ]),
        Effect::when(
            Condition::faction_played(Faction::Blob, 1),
            vec![Effect::authority(1)],
            vec![Effect::authority(-1)],
        ),
        Effect::when(
            Condition::faction_played(Faction::StarEmpire, 1),
            vec![Effect::trade(100)],
            vec![Effect::trade(1)],
        ),
        Effect::repeat(3, vec![Effect::combat(1)]),
        Effect::Count {
            zone: CountZone::InPlay,
            filter: CardFilter::any().with_faction(Faction::Blob),
            effects: vec![Effect::trade(2)],
        },
        Effect::Count {
            zone: CountZone::PlayedThisTurn,
            filter: CardFilter::any(),
            effects: vec![Effect::authority(10)],
        },
    ]);

    assert_eq!(table.combat(P0), 8);
    assert_eq!(table.trade(P0), 5);
    assert_eq!(table.authority(P0), 61);
}

/// Test that a bad choose_one answer is a no-op.
#[test]
fn test_choose_one_out_of_range() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut me = ScriptedChooser::indices([7]);
    let mut ctx = ResolverContext::new(&mut log).with_chooser(P0, &mut me);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[
        Effect::choose_one([ChoiceOption::new("Trade", vec![Effect::trade(5)])]),
        Effect::combat(1),
    ]);

    assert_eq!(table.trade(P0), 0);
    assert_eq!(table.combat(P0), 1);
    assert!(log.contains("Invalid option"));
}

/// Test that a non-outpost base cannot be destroyed while an outpost stands.
#[test]
fn test_destroy_base_outpost_first() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut me = ScriptedChooser::indices([0, 1]);
    let mut ctx = ResolverContext::new(&mut log).with_chooser(P0, &mut me);

    let plain = table.spawn_into(base("Trading Post", false), P1, Zone::Bases);
    let outpost = table.spawn_into(base("Space Station", true), P1, Zone::Bases);

    // First pick: the plain base. Rejected.
    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::DestroyBase]);
    assert_eq!(table.list_zone(P1, Zone::Bases), vec![plain, outpost]);

    // Second pick: the outpost.
    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::DestroyBase]);
    assert_eq!(table.list_zone(P1, Zone::Bases), vec![plain]);
    assert_eq!(table.list_zone(P1, Zone::Discard), vec![outpost]);

    assert!(log.contains("Illegal target"));
}

/// Test that the policy chooser only offers legal bases.
#[test]
fn test_policy_destroys_outpost() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    table.spawn_into(base("Barter World", false), P1, Zone::Bases);
    let outpost = table.spawn_into(base("War World", true), P1, Zone::Bases);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::DestroyBase]);

    assert_eq!(table.list_zone(P1, Zone::Discard), vec![outpost]);
}

/// Test that a destroyed base's hooks are gone.
#[test]
fn test_destroy_base_drops_hooks() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    let hq = table.spawn_into(base("Fleet HQ", false), P1, Zone::Bases);
    rules
        .hooks
        .register(P1, realm_rules::triggers::HookEvent::UnitPlayed, hq, vec![Effect::combat(1)]);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::DestroyBase]);

    assert!(rules.hooks.is_empty());
    assert_eq!(table.list_zone(P1, Zone::Discard), vec![hq]);
}

/// Test that a forced discard re-prompts until a legal card is chosen.
#[test]
fn test_forced_discard_reprompts() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut opponent = ScriptedChooser::new([Answer::Index(9), Answer::Cancel, Answer::Index(1)]);
    let mut ctx = ResolverContext::new(&mut log).with_chooser(P1, &mut opponent);

    let hand = fill(&mut table, P1, Zone::Hand, &["Scout", "Viper", "Scout"]);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::opponent_discards(1)]);

    assert_eq!(table.list_zone(P1, Zone::Discard), vec![hand[1]]);
    assert_eq!(table.list_zone(P1, Zone::Hand), vec![hand[0], hand[2]]);
    assert_eq!(opponent.prompts().len(), 3);
    assert_eq!(log.messages().iter().filter(|m| m.contains("must choose")).count(), 2);
}

/// Test the re-prompt limit falls back to the first card.
#[test]
fn test_forced_discard_reprompt_limit() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut opponent = ScriptedChooser::default();
    let mut ctx = ResolverContext::new(&mut log)
        .with_chooser(P1, &mut opponent)
        .with_reprompt_limit(2);

    let hand = fill(&mut table, P1, Zone::Hand, &["Scout", "Viper"]);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::opponent_discards(1)]);

    assert_eq!(table.list_zone(P1, Zone::Discard), vec![hand[0]]);
    assert_eq!(opponent.prompts().len(), 3);
}

/// Test a forced discard against an empty hand.
#[test]
fn test_forced_discard_empty_hand() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::opponent_discards(2), Effect::trade(1)]);

    assert_eq!(table.trade(P0), 1);
    assert!(log.contains("no cards to discard"));
}

/// Test scrapping from a chosen pile with a follow-up per card.
#[test]
fn test_scrap_with_follow_up() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut me = ScriptedChooser::new([Answer::Pile(Pile::Hand), Answer::Index(1), Answer::Cancel]);
    let mut ctx = ResolverContext::new(&mut log).with_chooser(P0, &mut me);

    let hand = fill(&mut table, P0, Zone::Hand, &["Scout", "Viper"]);
    fill(&mut table, P0, Zone::Discard, &["Scout"]);
    let deck = fill(&mut table, P0, Zone::Deck, &["Explorer"]);

    let scrap = Effect::Scrap {
        amount: 2,
        from: ScrapSource::HandOrDiscard,
        then: vec![Effect::draw(1)],
    };
    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[scrap]);

    // One card scrapped, then the second pick was cancelled.
    assert_eq!(table.scrap_heap(), vec![hand[1]]);
    assert_eq!(table.list_zone(P0, Zone::Hand), vec![hand[0], deck[0]]);
    assert_eq!(table.list_zone(P0, Zone::Discard).len(), 1);
}

/// Test that a single eligible pile is used without asking.
#[test]
fn test_scrap_single_pile_skips_pile_prompt() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut me = ScriptedChooser::indices([0]);
    let mut ctx = ResolverContext::new(&mut log).with_chooser(P0, &mut me);

    let discard = fill(&mut table, P0, Zone::Discard, &["Viper"]);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::scrap(1, ScrapSource::HandOrDiscard)]);

    assert_eq!(table.scrap_heap(), discard);
    assert_eq!(me.prompts().len(), 1);
}

/// Test scrapping with nothing to scrap.
#[test]
fn test_scrap_nothing_available() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    fill(&mut table, P0, Zone::Hand, &["Scout"]);
    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::scrap(1, ScrapSource::Discard)]);

    assert!(table.scrap_heap().is_empty());
    assert!(log.contains("No cards available to scrap."));
}

/// Test discard-then-draw stops at a cancel and draws what was discarded.
#[test]
fn test_discard_then_draw() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut me = ScriptedChooser::new([Answer::Index(0), Answer::Cancel]);
    let mut ctx = ResolverContext::new(&mut log).with_chooser(P0, &mut me);

    let hand = fill(&mut table, P0, Zone::Hand, &["Viper", "Scout"]);
    let deck = fill(&mut table, P0, Zone::Deck, &["Explorer", "Cutter"]);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::DiscardThenDraw { amount: 2 }]);

    assert_eq!(table.list_zone(P0, Zone::Discard), vec![hand[0]]);
    assert_eq!(table.list_zone(P0, Zone::Hand), vec![hand[1], deck[1]]);
}

/// Test trade row effects honour their filters.
#[test]
fn test_trade_row_filters() {
    let mut table = Table::new(&EngineConfig::default().with_trade_row_slots(2));
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    let cheap_base = table.spawn_trade_card(Arc::new(
        CardDefinition::new(CardId(0), "Outpost", CardKind::Base).with_defense(3).with_cost(2),
    ));
    let big_ship = table.spawn_trade_card(Arc::new(
        CardDefinition::new(CardId(0), "Dreadnaught", CardKind::Ship).with_cost(7),
    ));
    table.refill_trade_row();
    assert_eq!(table.trade_row(), vec![Some(big_ship), Some(cheap_base)]);

    // Only ships may be taken; it goes on top of the deck.
    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::AcquireFree {
        filter: CardFilter::any().with_kind(CardKind::Ship),
        destination: Destination::DeckTop,
    }]);
    assert_eq!(table.list_zone(P0, Zone::Deck), vec![big_ship]);

    // Nothing left qualifies under a cost cap of 1.
    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::DestroyTradeRow {
        filter: CardFilter::any().with_max_cost(1),
    }]);
    assert!(table.scrap_heap().is_empty());

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::DestroyTradeRow {
        filter: CardFilter::any(),
    }]);
    assert_eq!(table.scrap_heap(), vec![cheap_base]);
    assert!(log.contains("No trade row card qualifies."));
}

/// Test copying another ship's on-play effects, never the copier itself.
#[test]
fn test_copy_unit_excludes_source() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    let needle_def = Arc::new(
        CardDefinition::new(CardId(0), "Stealth Needle", CardKind::Ship)
            .with_ability(Ability::new(Trigger::OnPlay).with_effect(Effect::CopyUnit)),
    );
    let needle = table.spawn_into(needle_def, P0, Zone::InPlay);

    // Alone in play: nothing to copy.
    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0)
        .with_source(needle)
        .run(&[Effect::CopyUnit]);
    assert_eq!(table.combat(P0), 0);

    let ram = Arc::new(
        CardDefinition::new(CardId(0), "Ram", CardKind::Ship)
            .with_ability(Ability::new(Trigger::OnPlay).with_effect(Effect::combat(5)))
            .with_ability(Ability::new(Trigger::ScrapActivated).with_effect(Effect::trade(3))),
    );
    table.spawn_into(ram, P0, Zone::InPlay);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0)
        .with_source(needle)
        .run(&[Effect::CopyUnit]);
    drop(ctx);

    assert_eq!(table.combat(P0), 5);
    assert_eq!(table.trade(P0), 0);
    assert!(log.contains("No other ship in play to copy."));
}

/// Test that copy chains terminate.
#[test]
fn test_copy_chain_is_bounded() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    let needle_def = Arc::new(
        CardDefinition::new(CardId(0), "Stealth Needle", CardKind::Ship)
            .with_ability(Ability::new(Trigger::OnPlay).with_effect(Effect::combat(1)).with_effect(Effect::CopyUnit)),
    );
    let first = table.spawn_into(Arc::clone(&needle_def), P0, Zone::InPlay);
    table.spawn_into(needle_def, P0, Zone::InPlay);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0)
        .with_source(first)
        .run(&[Effect::CopyUnit]);

    assert!(log.contains("Copy chain too deep"));
    assert!(table.combat(P0) > 0);
}

/// Test hook effects without a source card.
#[test]
fn test_hook_effects_need_source() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::PerUnitCombat { amount: 1 }]);

    assert!(rules.hooks.is_empty());
    assert!(log.contains("without a source card"));
}

/// Test the top-deck flag.
#[test]
fn test_topdeck_next_purchase() {
    let mut table = Table::new(&EngineConfig::default());
    let mut rules = RulesState::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    EffectResolver::new(&mut table, &mut rules, &mut ctx, P0).run(&[Effect::TopdeckNextPurchase]);

    assert!(table.topdeck_pending(P0));
    assert!(!table.topdeck_pending(P1));
}
