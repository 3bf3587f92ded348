//! Built-in card catalog.
//!
//! A representative card pool covering every effect family, loaded through
//! the same JSON path as external card data. Copy counts for the starting
//! decks and the trade deck live here, outside the card records.

use super::registry::CardRegistry;
use crate::core::LoadError;

const CATALOG_JSON: &str = include_str!("catalog.json");

/// Name of the card sold from the always-available explorer pile.
pub const EXPLORER: &str = "Explorer";

/// Copies in each player's starting deck.
pub const STARTER_DECK: &[(&str, usize)] = &[("Scout", 8), ("Viper", 2)];

/// Copies shuffled into the trade deck.
pub const TRADE_DECK: &[(&str, usize)] = &[
    ("Blob Fighter", 3),
    ("Trade Pod", 3),
    ("Battle Pod", 2),
    ("Ram", 2),
    ("Blob Destroyer", 2),
    ("Blob Carrier", 1),
    ("Mothership", 1),
    ("Blob Wheel", 3),
    ("The Hive", 1),
    ("Blob World", 1),
    ("Federation Shuttle", 3),
    ("Cutter", 3),
    ("Freighter", 2),
    ("Trade Escort", 1),
    ("Command Ship", 1),
    ("Trading Post", 2),
    ("Barter World", 2),
    ("Defense Center", 1),
    ("Port of Call", 1),
    ("Central Office", 1),
    ("Imperial Fighter", 3),
    ("Corvette", 2),
    ("Survey Ship", 3),
    ("Imperial Frigate", 3),
    ("Space Station", 2),
    ("Recycling Station", 2),
    ("War World", 1),
    ("Royal Redoubt", 1),
    ("Fleet HQ", 1),
    ("Trade Bot", 3),
    ("Missile Bot", 3),
    ("Supply Bot", 3),
    ("Patrol Mech", 2),
    ("Stealth Needle", 1),
    ("Battle Mech", 1),
    ("Battle Station", 2),
    ("Mech World", 1),
    ("Junkyard", 1),
    ("Machine Base", 1),
    ("Brain World", 1),
];

/// Load the built-in catalog into a fresh registry.
pub fn standard_registry() -> Result<CardRegistry, LoadError> {
    CardRegistry::from_json(CATALOG_JSON)
}
