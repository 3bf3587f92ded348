//! Whole-board ally re-scan cost as the play area grows.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use realm_rules::cards::{Ability, CardDefinition, CardId, CardKind, Faction, Trigger};
use realm_rules::choice::NotificationLog;
use realm_rules::core::{EngineConfig, PlayerId};
use realm_rules::effects::{Effect, ResolverContext};
use realm_rules::rules::{AllyResolver, RulesState};
use realm_rules::zones::{Table, Zone};

const FACTIONS: [Faction; 4] = [
    Faction::Blob,
    Faction::TradeFederation,
    Faction::MachineCult,
    Faction::StarEmpire,
];

fn board(size: usize) -> Table {
    let mut table = Table::new(&EngineConfig::default());
    for i in 0..size {
        let ship = CardDefinition::new(CardId(0), "Bench Ship", CardKind::Ship)
            .with_faction(FACTIONS[i % FACTIONS.len()])
            .with_ability(Ability::new(Trigger::Ally).with_effect(Effect::combat(1)))
            .with_ability(
                Ability::new(Trigger::Ally)
                    .with_min_allies(3)
                    .with_effect(Effect::trade(1)),
            );
        table.spawn_into(Arc::new(ship), PlayerId::FIRST, Zone::InPlay);
    }
    table
}

fn bench_ally_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("ally_scan");
    for size in [4usize, 16, 64] {
        let table = board(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| {
                let mut table = table.clone();
                let mut rules = RulesState::new();
                let mut log = NotificationLog::new();
                let mut ctx = ResolverContext::new(&mut log);
                black_box(AllyResolver::resolve(&mut table, &mut rules, &mut ctx, PlayerId::FIRST))
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ally_scan);
criterion_main!(benches);
