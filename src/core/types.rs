//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for battlefield entities and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Which side a card, entity, or tower belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    Player,
    Enemy,
}

impl Owner {
    /// The opposing side
    pub fn opponent(&self) -> Owner {
        match self {
            Owner::Player => Owner::Enemy,
            Owner::Enemy => Owner::Player,
        }
    }

    /// Forward movement direction along the y axis.
    /// Player units advance toward decreasing y, enemy units toward increasing y.
    pub fn forward(&self) -> f32 {
        match self {
            Owner::Player => -1.0,
            Owner::Enemy => 1.0,
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::Player => write!(f, "Player"),
            Owner::Enemy => write!(f, "Enemy"),
        }
    }
}

/// One of the two fixed tracks constraining movement and targeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Lane {
    Left,
    Right,
}

impl Lane {
    /// Fixed horizontal position of this lane (field percent)
    pub fn anchor_x(&self) -> f32 {
        match self {
            Lane::Left => crate::arena::constants::LANE_LEFT_X,
            Lane::Right => crate::arena::constants::LANE_RIGHT_X,
        }
    }

    /// Lane containing a horizontal field position
    pub fn from_x(x: f32) -> Lane {
        if x < 50.0 {
            Lane::Left
        } else {
            Lane::Right
        }
    }
}
