//! Live battlefield entities and transient spell effects

use serde::{Deserialize, Serialize};

use crate::arena::cards::CardKind;
use crate::arena::constants::LAST_ATTACK_SENTINEL;
use crate::core::types::{EntityId, Lane, Owner, Tick};

/// Behavioral state of an entity
///
/// `Dying` is a terminal tag applied the instant hp reaches 0; the entity is
/// removed at the end of the tick, so the tag exists for presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    Moving,
    Attacking,
    Dying,
}

/// A live unit on the battlefield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: CardKind,
    pub owner: Owner,
    pub lane: Lane,
    /// Vertical position, 0-100, decreasing toward the enemy side
    pub y: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// Tick of the most recent attack; starts at a sentinel far in the past
    /// so the first eligible attack is never blocked by cadence
    pub last_attack_tick: i64,
    pub state: EntityState,
}

impl Entity {
    /// Spawn a fresh unit at the given vertical position
    pub fn spawn(kind: CardKind, owner: Owner, lane: Lane, y: f32) -> Self {
        let stats = kind.stats();
        Self {
            id: EntityId::new(),
            kind,
            owner,
            lane,
            y,
            hp: stats.hp,
            max_hp: stats.max_hp,
            last_attack_tick: LAST_ATTACK_SENTINEL,
            state: EntityState::Moving,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Horizontal position, fixed by lane
    pub fn x(&self) -> f32 {
        self.lane.anchor_x()
    }

    /// Has the attack cadence elapsed since the last attack?
    pub fn cadence_ready(&self, tick: Tick) -> bool {
        tick as i64 - self.last_attack_tick >= self.kind.stats().attack_speed as i64
    }

    /// Apply damage; at 0 hp the entity is tagged dying and clamped
    /// (removal happens at end of tick, not here)
    pub fn take_damage(&mut self, damage: f32) {
        self.hp -= damage;
        if self.hp <= 0.0 {
            self.hp = 0.0;
            self.state = EntityState::Dying;
        }
    }
}

/// Spell flavors with a visual marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectKind {
    Explosion,
    Zap,
}

/// Transient marker left behind by a spell cast, for presentation only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualEffect {
    pub id: EntityId,
    pub kind: EffectKind,
    pub x: f32,
    pub y: f32,
    pub created_at: Tick,
}

impl VisualEffect {
    pub fn new(kind: EffectKind, x: f32, y: f32, created_at: Tick) -> Self {
        Self {
            id: EntityId::new(),
            kind,
            x,
            y,
            created_at,
        }
    }
}
