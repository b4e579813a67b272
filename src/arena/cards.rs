//! Card catalog - units and spells with their combat stats
//!
//! The catalog is a closed enum with an exhaustive stats table, so a lookup
//! of an unknown card cannot be expressed at all.

use serde::{Deserialize, Serialize};

/// A castable card: either a deployable unit or an instantaneous area spell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Knight,    // Melee, durable
    Archer,    // Fragile, attacks from range
    Giant,     // Slow tank, only ever attacks towers
    Skeletons, // Cheap swarm fodder
    Fireball,  // Large blast, heavy damage
    Zap,       // Small blast, light damage
}

/// Combat stats for a card
///
/// Spells carry hp 0 and cadence 0; their `range` is the blast radius and
/// their `damage` is applied once to everything inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardStats {
    pub name: &'static str,
    pub cost: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub damage: f32,
    /// Field-percent moved per tick
    pub speed: f32,
    /// Engagement range, or blast radius for spells (field-percent)
    pub range: f32,
    /// Minimum ticks between attacks (0 for instantaneous spells)
    pub attack_speed: u32,
    pub is_spell: bool,
}

impl CardKind {
    /// Every card in deck order
    pub const ALL: [CardKind; 6] = [
        CardKind::Knight,
        CardKind::Archer,
        CardKind::Giant,
        CardKind::Skeletons,
        CardKind::Fireball,
        CardKind::Zap,
    ];

    /// Stats for this card
    pub fn stats(&self) -> CardStats {
        match self {
            CardKind::Knight => CardStats {
                name: "Knight",
                cost: 3.0,
                hp: 700.0,
                max_hp: 700.0,
                damage: 85.0,
                speed: 0.35,
                range: 6.0,
                attack_speed: 30,
                is_spell: false,
            },
            CardKind::Archer => CardStats {
                name: "Archer",
                cost: 3.0,
                hp: 250.0,
                max_hp: 250.0,
                damage: 65.0,
                speed: 0.4,
                range: 25.0,
                attack_speed: 20,
                is_spell: false,
            },
            CardKind::Giant => CardStats {
                name: "Giant",
                cost: 5.0,
                hp: 2500.0,
                max_hp: 2500.0,
                damage: 150.0,
                speed: 0.15,
                range: 6.0,
                attack_speed: 45,
                is_spell: false,
            },
            CardKind::Skeletons => CardStats {
                name: "Skeletons",
                cost: 1.0,
                hp: 80.0,
                max_hp: 80.0,
                damage: 40.0,
                speed: 0.5,
                range: 4.0,
                attack_speed: 15,
                is_spell: false,
            },
            CardKind::Fireball => CardStats {
                name: "Fireball",
                cost: 4.0,
                hp: 0.0,
                max_hp: 0.0,
                damage: 350.0,
                speed: 0.0,
                range: 15.0,
                attack_speed: 0,
                is_spell: true,
            },
            CardKind::Zap => CardStats {
                name: "Zap",
                cost: 2.0,
                hp: 0.0,
                max_hp: 0.0,
                damage: 120.0,
                speed: 0.0,
                range: 10.0,
                attack_speed: 0,
                is_spell: true,
            },
        }
    }

    /// Is this an instantaneous area spell?
    pub fn is_spell(&self) -> bool {
        self.stats().is_spell
    }

    /// Does this unit only ever engage towers, ignoring enemy units?
    pub fn targets_towers_only(&self) -> bool {
        matches!(self, CardKind::Giant)
    }

    /// Parse a card name as typed at the CLI (case-insensitive)
    pub fn parse(name: &str) -> Option<CardKind> {
        match name.to_ascii_lowercase().as_str() {
            "knight" => Some(CardKind::Knight),
            "archer" => Some(CardKind::Archer),
            "giant" => Some(CardKind::Giant),
            "skeletons" => Some(CardKind::Skeletons),
            "fireball" => Some(CardKind::Fireball),
            "zap" => Some(CardKind::Zap),
            _ => None,
        }
    }
}
