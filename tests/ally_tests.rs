//! Ally resolution tests.
//!
//! These tests verify the whole-board ally re-scan:
//! - Retroactive allies (the second copy enables the first)
//! - At most one firing per card copy per turn
//! - Ally tiers on bases, reset at the owner's turn start
//! - The wildcard aura and the turn-scoped wildcard

use std::sync::Arc;

use realm_rules::cards::{Ability, CardDefinition, CardId, CardKind, Faction, Trigger};
use realm_rules::choice::NotificationLog;
use realm_rules::core::{EngineConfig, InstanceId, PlayerId};
use realm_rules::effects::{Effect, ResolverContext};
use realm_rules::rules::AllyResolver;
use realm_rules::triggers::Dispatcher;
use realm_rules::zones::{Board, Table, Zone};

const P0: PlayerId = PlayerId::FIRST;

fn ally_ship(name: &str, faction: Faction, combat: i64) -> Arc<CardDefinition> {
    Arc::new(
        CardDefinition::new(CardId(0), name, CardKind::Ship)
            .with_faction(faction)
            .with_ability(Ability::new(Trigger::Ally).with_effect(Effect::combat(combat))),
    )
}

fn plain_ship(name: &str, faction: Faction) -> Arc<CardDefinition> {
    Arc::new(CardDefinition::new(CardId(0), name, CardKind::Ship).with_faction(faction))
}

fn mech_world() -> Arc<CardDefinition> {
    Arc::new(
        CardDefinition::new(CardId(0), "Mech World", CardKind::Base)
            .with_faction(Faction::MachineCult)
            .with_defense(6)
            .as_outpost()
            .with_ability(
                Ability::new("continuous:modify_ally_checks".parse().unwrap()).with_effect(Effect::AllyAnyFaction),
            ),
    )
}

fn enter(
    table: &mut Table,
    dispatcher: &mut Dispatcher,
    ctx: &mut ResolverContext<'_>,
    owner: PlayerId,
    definition: &Arc<CardDefinition>,
) -> InstanceId {
    let zone = if definition.is_base() { Zone::Bases } else { Zone::InPlay };
    let id = table.spawn_into(Arc::clone(definition), owner, zone);
    dispatcher.on_card_enter_play(table, ctx, owner, id);
    id
}

/// Test the two-ship scenario: the second copy enables both.
#[test]
fn test_second_copy_fires_both_allies() {
    let mut table = Table::new(&EngineConfig::default());
    let mut dispatcher = Dispatcher::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);
    let fighter = ally_ship("Fighter", Faction::Blob, 2);

    let first = enter(&mut table, &mut dispatcher, &mut ctx, P0, &fighter);
    assert_eq!(table.combat(P0), 0);
    assert!(!dispatcher.ledger().has_ally_fired(P0, first));

    let second = enter(&mut table, &mut dispatcher, &mut ctx, P0, &fighter);
    assert_eq!(table.combat(P0), 4);
    assert!(dispatcher.ledger().has_ally_fired(P0, first));
    assert!(dispatcher.ledger().has_ally_fired(P0, second));
}

/// Test that re-scanning never fires an ally twice.
#[test]
fn test_rescan_is_idempotent() {
    let mut table = Table::new(&EngineConfig::default());
    let mut dispatcher = Dispatcher::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);
    let fighter = ally_ship("Fighter", Faction::Blob, 2);

    enter(&mut table, &mut dispatcher, &mut ctx, P0, &fighter);
    enter(&mut table, &mut dispatcher, &mut ctx, P0, &fighter);
    enter(&mut table, &mut dispatcher, &mut ctx, P0, &plain_ship("Pod", Faction::Blob));

    // The third Blob card fires nothing new for the first two.
    assert_eq!(table.combat(P0), 4);

    let mut rules = dispatcher.state().clone();
    assert_eq!(AllyResolver::resolve(&mut table, &mut rules, &mut ctx, P0), 0);
    assert_eq!(table.combat(P0), 4);
}

/// Test that different factions do not ally.
#[test]
fn test_other_faction_does_not_ally() {
    let mut table = Table::new(&EngineConfig::default());
    let mut dispatcher = Dispatcher::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    enter(&mut table, &mut dispatcher, &mut ctx, P0, &ally_ship("Fighter", Faction::Blob, 2));
    enter(&mut table, &mut dispatcher, &mut ctx, P0, &ally_ship("Corvette", Faction::StarEmpire, 2));
    enter(&mut table, &mut dispatcher, &mut ctx, P0, &plain_ship("Scout", Faction::Unaligned));

    assert_eq!(table.combat(P0), 0);
}

/// Test that opponents' cards never count as allies.
#[test]
fn test_opponent_cards_are_not_allies() {
    let mut table = Table::new(&EngineConfig::default());
    let mut dispatcher = Dispatcher::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);
    let fighter = ally_ship("Fighter", Faction::Blob, 2);

    enter(&mut table, &mut dispatcher, &mut ctx, P0, &fighter);
    enter(&mut table, &mut dispatcher, &mut ctx, PlayerId::SECOND, &fighter);

    assert_eq!(table.combat(P0), 0);
    assert_eq!(table.combat(PlayerId::SECOND), 0);
}

/// Test a base with two ally tiers across a turn reset.
#[test]
fn test_base_ally_tiers() {
    let mut table = Table::new(&EngineConfig::default());
    let mut dispatcher = Dispatcher::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    let outpost = Arc::new(
        CardDefinition::new(CardId(0), "Tiered Outpost", CardKind::Base)
            .with_faction(Faction::TradeFederation)
            .with_defense(5)
            .with_ability(Ability::new(Trigger::Ally).with_effect(Effect::trade(2)))
            .with_ability(
                Ability::new(Trigger::Ally)
                    .with_min_allies(2)
                    .with_effect(Effect::combat(3)),
            ),
    );
    let shuttle = plain_ship("Shuttle", Faction::TradeFederation);

    // No other Trade Federation card: nothing fires.
    let base = enter(&mut table, &mut dispatcher, &mut ctx, P0, &outpost);
    assert_eq!((table.trade(P0), table.combat(P0)), (0, 0));

    // One ally: only the first tier.
    enter(&mut table, &mut dispatcher, &mut ctx, P0, &shuttle);
    assert_eq!((table.trade(P0), table.combat(P0)), (2, 0));
    assert!(dispatcher.ledger().has_ally_fired(P0, base));

    // The flag holds for the rest of the turn.
    enter(&mut table, &mut dispatcher, &mut ctx, P0, &shuttle);
    assert_eq!((table.trade(P0), table.combat(P0)), (2, 0));

    // New turn: the base flag resets; two allies in play fire both tiers on
    // the next entry.
    dispatcher.on_turn_start(&mut table, &mut ctx, P0);
    assert!(!dispatcher.ledger().has_ally_fired(P0, base));
    enter(&mut table, &mut dispatcher, &mut ctx, P0, &plain_ship("Pod", Faction::Blob));
    assert_eq!((table.trade(P0), table.combat(P0)), (4, 3));
}

/// Test that the wildcard aura satisfies every faction while in play.
#[test]
fn test_wildcard_aura() {
    let mut table = Table::new(&EngineConfig::default());
    let mut dispatcher = Dispatcher::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    let mech = enter(&mut table, &mut dispatcher, &mut ctx, P0, &mech_world());
    assert_eq!(dispatcher.ledger().wildcard_count(P0), 1);

    // A lone Blob ship allies through the wildcard.
    enter(&mut table, &mut dispatcher, &mut ctx, P0, &ally_ship("Fighter", Faction::Blob, 2));
    assert_eq!(table.combat(P0), 2);

    // Mech World leaves: the counter returns to zero and true counts apply.
    dispatcher.on_card_leave_play(&table, P0, mech);
    table.destroy_enemy_base(P0, 0);
    assert_eq!(dispatcher.ledger().wildcard_count(P0), 0);
    assert!(!dispatcher.ledger().wildcard_active(P0));

    enter(&mut table, &mut dispatcher, &mut ctx, P0, &ally_ship("Corvette", Faction::StarEmpire, 5));
    assert_eq!(table.combat(P0), 2);
}

/// Test that the wildcard counter tracks sources, not entry calls.
#[test]
fn test_wildcard_counter_is_per_source() {
    let mut table = Table::new(&EngineConfig::default());
    let mut dispatcher = Dispatcher::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    let first = enter(&mut table, &mut dispatcher, &mut ctx, P0, &mech_world());
    dispatcher.on_card_enter_play(&mut table, &mut ctx, P0, first);
    let second = enter(&mut table, &mut dispatcher, &mut ctx, P0, &mech_world());
    assert_eq!(dispatcher.ledger().wildcard_count(P0), 2);

    dispatcher.on_card_leave_play(&table, P0, first);
    dispatcher.on_card_leave_play(&table, P0, first);
    assert_eq!(dispatcher.ledger().wildcard_count(P0), 1);

    dispatcher.on_card_leave_play(&table, P0, second);
    assert_eq!(dispatcher.ledger().wildcard_count(P0), 0);
}

/// Test that an on-play wildcard lasts until the end of the turn.
#[test]
fn test_turn_scoped_wildcard() {
    let mut table = Table::new(&EngineConfig::default());
    let mut dispatcher = Dispatcher::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    let fighter = ally_ship("Fighter", Faction::Blob, 2);
    let envoy = Arc::new(
        CardDefinition::new(CardId(0), "Envoy", CardKind::Ship)
            .with_ability(Ability::new(Trigger::OnPlay).with_effect(Effect::AllyAnyFaction)),
    );

    enter(&mut table, &mut dispatcher, &mut ctx, P0, &fighter);
    assert_eq!(table.combat(P0), 0);

    // The already-played Fighter qualifies as soon as the wildcard lands.
    enter(&mut table, &mut dispatcher, &mut ctx, P0, &envoy);
    assert_eq!(table.combat(P0), 2);
    assert!(dispatcher.ledger().wildcard_active(P0));
    assert_eq!(dispatcher.ledger().wildcard_count(P0), 0);

    dispatcher.on_turn_end(&table, P0);
    assert!(!dispatcher.ledger().wildcard_active(P0));
}

/// Test a multi-faction card allying through either faction.
#[test]
fn test_multi_faction_card() {
    let mut table = Table::new(&EngineConfig::default());
    let mut dispatcher = Dispatcher::new();
    let mut log = NotificationLog::new();
    let mut ctx = ResolverContext::new(&mut log);

    let dual = Arc::new(
        CardDefinition::new(CardId(0), "Alliance Frigate", CardKind::Ship)
            .with_factions([Faction::TradeFederation, Faction::StarEmpire])
            .with_ability(Ability::new(Trigger::Ally).with_effect(Effect::combat(3))),
    );

    enter(&mut table, &mut dispatcher, &mut ctx, P0, &dual);
    enter(&mut table, &mut dispatcher, &mut ctx, P0, &plain_ship("Corvette", Faction::StarEmpire));
    assert_eq!(table.combat(P0), 3);
}
