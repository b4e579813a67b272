//! Root game state aggregate
//!
//! `GameState` is pure data. The engine mutates a private working copy and
//! publishes clones as immutable snapshots; nothing outside the engine and
//! cast intake ever holds a mutable reference.

use serde::{Deserialize, Serialize};

use crate::arena::constants::{INITIAL_ELIXIR, MAX_ELIXIR, TOWER_MAX_HP};
use crate::arena::entities::{Entity, VisualEffect};
use crate::core::types::{Owner, Tick};

/// Complete simulation state for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub is_playing: bool,
    pub game_over: bool,
    pub winner: Option<Owner>,
    pub tick: Tick,
    pub player_elixir: f32,
    pub enemy_elixir: f32,
    pub player_tower_hp: f32,
    pub enemy_tower_hp: f32,
    pub entities: Vec<Entity>,
    pub effects: Vec<VisualEffect>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            is_playing: false,
            game_over: false,
            winner: None,
            tick: 0,
            player_elixir: INITIAL_ELIXIR,
            enemy_elixir: INITIAL_ELIXIR,
            player_tower_hp: TOWER_MAX_HP,
            enemy_tower_hp: TOWER_MAX_HP,
            entities: Vec::new(),
            effects: Vec::new(),
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elixir held by one side
    pub fn elixir(&self, owner: Owner) -> f32 {
        match owner {
            Owner::Player => self.player_elixir,
            Owner::Enemy => self.enemy_elixir,
        }
    }

    /// Deduct elixir from one side
    pub fn spend_elixir(&mut self, owner: Owner, amount: f32) {
        match owner {
            Owner::Player => self.player_elixir -= amount,
            Owner::Enemy => self.enemy_elixir -= amount,
        }
    }

    /// Regenerate both sides toward the cap
    pub fn regen_elixir(&mut self) {
        self.player_elixir = (self.player_elixir + crate::arena::constants::ELIXIR_REGEN_PER_TICK)
            .min(MAX_ELIXIR);
        self.enemy_elixir = (self.enemy_elixir + crate::arena::constants::ELIXIR_REGEN_PER_TICK)
            .min(MAX_ELIXIR);
    }

    /// Hit points of one side's tower
    pub fn tower_hp(&self, owner: Owner) -> f32 {
        match owner {
            Owner::Player => self.player_tower_hp,
            Owner::Enemy => self.enemy_tower_hp,
        }
    }

    /// Damage one side's tower
    pub fn damage_tower(&mut self, owner: Owner, damage: f32) {
        match owner {
            Owner::Player => self.player_tower_hp -= damage,
            Owner::Enemy => self.enemy_tower_hp -= damage,
        }
    }

    /// Live units owned by one side
    pub fn units_of(&self, owner: Owner) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |e| e.owner == owner && e.is_alive())
    }

    /// Is the match running?
    pub fn active(&self) -> bool {
        self.is_playing && !self.game_over
    }

    /// End the match. Ending is terminal for this session.
    pub fn end_match(&mut self, winner: Owner) {
        self.game_over = true;
        self.winner = Some(winner);
        self.is_playing = false;
    }

    /// Fully reset for a new match: entities, effects, elixir, and towers
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
