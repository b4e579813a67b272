//! Scripted opponent - the built-in enemy commander
//!
//! Deliberately simple: it acts on a fixed cadence, hoards elixir below a
//! floor, and aims its spells at a fixed point rather than at actual units.
//! The weak aim is intentional tuning, not an oversight.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::arena::ai::OpponentStrategy;
use crate::arena::cards::CardKind;
use crate::arena::cast::CastIntent;
use crate::arena::constants::{
    OPPONENT_DECISION_INTERVAL, OPPONENT_ELIXIR_FLOOR, OPPONENT_SPAWN_Y, OPPONENT_SPELL_CHANCE,
    OPPONENT_SPELL_TARGET_X, OPPONENT_SPELL_TARGET_Y,
};
use crate::arena::state::GameState;
use crate::core::types::{Lane, Owner};

pub struct ScriptedOpponent {
    rng: StdRng,
}

impl ScriptedOpponent {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    /// Create with a specific RNG seed for deterministic behavior
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn random_spell(&mut self) -> CardKind {
        if self.rng.gen_bool(0.5) {
            CardKind::Fireball
        } else {
            CardKind::Zap
        }
    }

    fn random_lane(&mut self) -> Lane {
        if self.rng.gen_bool(0.5) {
            Lane::Left
        } else {
            Lane::Right
        }
    }
}

impl Default for ScriptedOpponent {
    fn default() -> Self {
        Self::new()
    }
}

impl OpponentStrategy for ScriptedOpponent {
    fn decide(&mut self, state: &GameState) -> Option<CastIntent> {
        if state.tick % OPPONENT_DECISION_INTERVAL != 0 {
            return None;
        }
        if state.enemy_elixir <= OPPONENT_ELIXIR_FLOOR {
            return None;
        }

        if self.rng.gen::<f32>() < OPPONENT_SPELL_CHANCE {
            // Unaimed spell at a fixed point on the player's left approach
            let spell = self.random_spell();
            tracing::debug!(tick = state.tick, card = ?spell, "opponent casts spell");
            return Some(CastIntent {
                card: spell,
                owner: Owner::Enemy,
                lane: Lane::Left,
                x: OPPONENT_SPELL_TARGET_X,
                y: OPPONENT_SPELL_TARGET_Y,
            });
        }

        let lane = self.random_lane();
        let affordable: Vec<CardKind> = CardKind::ALL
            .iter()
            .copied()
            .filter(|c| !c.is_spell() && c.stats().cost <= state.enemy_elixir)
            .collect();
        let card = *affordable.choose(&mut self.rng)?;
        tracing::debug!(tick = state.tick, card = ?card, lane = ?lane, "opponent deploys unit");
        Some(CastIntent {
            card,
            owner: Owner::Enemy,
            lane,
            x: lane.anchor_x(),
            y: OPPONENT_SPAWN_Y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_action_off_cadence() {
        let mut ai = ScriptedOpponent::with_seed(1);
        let mut state = GameState::new();
        state.enemy_elixir = 10.0;
        state.tick = 61;
        assert!(ai.decide(&state).is_none());
    }

    #[test]
    fn test_no_action_at_or_below_elixir_floor() {
        let mut ai = ScriptedOpponent::with_seed(1);
        let mut state = GameState::new();
        state.tick = 60;
        state.enemy_elixir = OPPONENT_ELIXIR_FLOOR;
        assert!(ai.decide(&state).is_none());
    }

    #[test]
    fn test_decisions_are_enemy_owned_and_legal() {
        let mut ai = ScriptedOpponent::with_seed(9);
        let mut state = GameState::new();
        state.enemy_elixir = 8.0;

        let mut decided = 0;
        for cycle in 1..200u64 {
            state.tick = cycle * OPPONENT_DECISION_INTERVAL;
            if let Some(intent) = ai.decide(&state) {
                decided += 1;
                assert_eq!(intent.owner, Owner::Enemy);
                let stats = intent.card.stats();
                assert!(stats.cost <= state.enemy_elixir);
                if stats.is_spell {
                    assert_eq!(intent.lane, Lane::Left);
                    assert_eq!(intent.x, OPPONENT_SPELL_TARGET_X);
                    assert_eq!(intent.y, OPPONENT_SPELL_TARGET_Y);
                } else {
                    assert_eq!(intent.x, intent.lane.anchor_x());
                    assert_eq!(intent.y, OPPONENT_SPAWN_Y);
                }
            }
        }
        assert!(decided > 0, "opponent should act on its cadence");
    }

    #[test]
    fn test_spell_rate_is_roughly_one_in_five() {
        let mut ai = ScriptedOpponent::with_seed(1234);
        let mut state = GameState::new();
        state.enemy_elixir = 10.0;

        let mut spells = 0;
        let rounds = 1000u64;
        for cycle in 1..=rounds {
            state.tick = cycle * OPPONENT_DECISION_INTERVAL;
            if let Some(intent) = ai.decide(&state) {
                if intent.card.is_spell() {
                    spells += 1;
                }
            }
        }
        let rate = spells as f32 / rounds as f32;
        assert!(rate > 0.1 && rate < 0.3, "spell rate {rate} far from 0.2");
    }
}
