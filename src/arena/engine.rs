//! Simulation engine - the fixed-tick update loop
//!
//! `Arena` owns the working `GameState` exclusively. Each `run_tick` applies
//! the fixed phase order and then publishes an immutable snapshot; readers
//! (CLI, narrator) only ever see published snapshots, never the working copy.
//!
//! Targeting and blocking decisions use entity positions captured at the
//! start of the entity phase, so no unit reacts to another unit's same-tick
//! movement. Hit points are read live, so a unit killed earlier in the tick
//! is no longer a valid target.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::arena::ai::{OpponentStrategy, ScriptedOpponent};
use crate::arena::cast::{cast_card, CastIntent};
use crate::arena::constants::{
    EFFECT_EXPIRY_TICKS, ENEMY_TOWER_ENGAGE_Y, FRIENDLY_BLOCK_DISTANCE, PLAYER_TOWER_ENGAGE_Y,
};
use crate::arena::entities::EntityState;
use crate::arena::events::{MatchEvent, MatchEventLog};
use crate::arena::state::GameState;
use crate::core::types::{Lane, Owner};

/// The simulation engine for one match session
pub struct Arena {
    state: GameState,
    published: Arc<GameState>,
    rng: StdRng,
    opponent: Box<dyn OpponentStrategy>,
}

impl Arena {
    /// Engine with the built-in scripted opponent
    pub fn new() -> Self {
        Self::with_opponent(Box::new(ScriptedOpponent::new()))
    }

    /// Engine with a specific RNG seed for deterministic runs
    pub fn with_seed(seed: u64) -> Self {
        let mut arena = Self::with_opponent(Box::new(ScriptedOpponent::with_seed(seed)));
        arena.rng = StdRng::seed_from_u64(seed);
        arena
    }

    /// Engine with a substituted opponent strategy
    pub fn with_opponent(opponent: Box<dyn OpponentStrategy>) -> Self {
        let state = GameState::new();
        let published = Arc::new(state.clone());
        Self {
            state,
            published,
            rng: StdRng::seed_from_u64(42),
            opponent,
        }
    }

    /// The most recently published snapshot
    pub fn snapshot(&self) -> Arc<GameState> {
        Arc::clone(&self.published)
    }

    fn publish(&mut self) {
        self.published = Arc::new(self.state.clone());
    }

    /// Begin a new match, fully resetting entities, effects, elixir and towers
    pub fn start(&mut self) -> MatchEventLog {
        let mut events = MatchEventLog::new();
        self.state.reset();
        self.state.is_playing = true;
        tracing::info!("match started");
        events.push(MatchEvent::MatchStarted, "The match has begun!".into(), 0);
        self.publish();
        events
    }

    /// Human input path: apply a cast intent against the working state
    pub fn cast(&mut self, intent: CastIntent) -> MatchEventLog {
        let mut events = MatchEventLog::new();
        if !self.state.active() {
            return events;
        }
        cast_card(&mut self.state, &mut self.rng, intent, &mut events);
        self.publish();
        events
    }

    /// Advance the simulation by one tick
    pub fn run_tick(&mut self) -> MatchEventLog {
        let mut events = MatchEventLog::new();

        if !self.state.active() {
            return events;
        }

        self.state.tick += 1;

        // ===== PHASE 1: ELIXIR REGEN =====
        self.state.regen_elixir();

        // ===== PHASE 2: EFFECT EXPIRY =====
        let tick = self.state.tick;
        self.state
            .effects
            .retain(|ef| tick - ef.created_at < EFFECT_EXPIRY_TICKS);

        // ===== PHASE 3: OPPONENT DECISION =====
        if let Some(intent) = self.opponent.decide(&self.state) {
            cast_card(&mut self.state, &mut self.rng, intent, &mut events);
        }

        // ===== PHASE 4: ENTITY TARGETING & COMBAT =====
        self.phase_entities(&mut events);

        // ===== PHASE 5: CLEANUP =====
        self.state.entities.retain(|e| e.hp > 0.0);

        // ===== PHASE 6: TERMINATION CHECK =====
        self.phase_termination(&mut events);

        self.publish();
        events
    }

    fn phase_entities(&mut self, events: &mut MatchEventLog) {
        // Start-of-tick positions: every decision below reads these, not the
        // positions being written this phase
        let positions: Vec<(Owner, Lane, f32)> = self
            .state
            .entities
            .iter()
            .map(|e| (e.owner, e.lane, e.y))
            .collect();

        for i in 0..self.state.entities.len() {
            if !self.state.entities[i].is_alive() {
                continue;
            }

            let (owner, lane, y) = positions[i];
            let kind = self.state.entities[i].kind;
            let stats = kind.stats();

            // Nearest same-lane opposing unit by vertical distance
            let mut target: Option<usize> = None;
            let mut min_dist = f32::INFINITY;
            for (j, &(other_owner, other_lane, other_y)) in positions.iter().enumerate() {
                if j == i
                    || other_owner == owner
                    || other_lane != lane
                    || !self.state.entities[j].is_alive()
                {
                    continue;
                }
                let dist = (y - other_y).abs();
                if dist < min_dist {
                    min_dist = dist;
                    target = Some(j);
                }
            }

            // The siege variant ignores units outright; min_dist is still
            // computed above and deliberately discarded
            if kind.targets_towers_only() {
                target = None;
            }

            let tower_engage_y = match owner {
                Owner::Player => ENEMY_TOWER_ENGAGE_Y,
                Owner::Enemy => PLAYER_TOWER_ENGAGE_Y,
            };
            let dist_to_tower = (y - tower_engage_y).abs();

            // Blocked when a live friend is strictly ahead within blocking distance
            let blocked = positions.iter().enumerate().any(|(j, &(o, l, fy))| {
                j != i
                    && o == owner
                    && l == lane
                    && self.state.entities[j].is_alive()
                    && (match owner {
                        Owner::Player => fy < y,
                        Owner::Enemy => fy > y,
                    })
                    && (fy - y).abs() < FRIENDLY_BLOCK_DISTANCE
            });

            let tick = self.state.tick;

            if let Some(t) = target.filter(|_| min_dist <= stats.range) {
                // Engage the unit target
                self.state.entities[i].state = EntityState::Attacking;
                if self.state.entities[i].cadence_ready(tick) {
                    self.state.entities[i].last_attack_tick = tick as i64;
                    self.state.entities[t].take_damage(stats.damage);
                }
            } else if dist_to_tower <= stats.range {
                // Engage the tower
                self.state.entities[i].state = EntityState::Attacking;
                if self.state.entities[i].cadence_ready(tick) {
                    self.state.entities[i].last_attack_tick = tick as i64;
                    let defender = owner.opponent();
                    self.state.damage_tower(defender, stats.damage);
                    if self.state.tower_hp(defender) <= 0.0 {
                        self.end_match(owner, events);
                    }
                }
            } else {
                // Advance, unless a friend is in the way (blocked units keep
                // the moving tag for animation without changing position)
                let entity = &mut self.state.entities[i];
                entity.state = EntityState::Moving;
                if !blocked {
                    entity.y += owner.forward() * stats.speed;
                }

                // Boundary clamp: failsafe against walking past the tower
                match owner {
                    Owner::Player if entity.y < ENEMY_TOWER_ENGAGE_Y => {
                        entity.y = ENEMY_TOWER_ENGAGE_Y;
                        entity.state = EntityState::Attacking;
                    }
                    Owner::Enemy if entity.y > PLAYER_TOWER_ENGAGE_Y => {
                        entity.y = PLAYER_TOWER_ENGAGE_Y;
                        entity.state = EntityState::Attacking;
                    }
                    _ => {}
                }
            }
        }
    }

    fn phase_termination(&mut self, events: &mut MatchEventLog) {
        self.state.enemy_tower_hp = self.state.enemy_tower_hp.max(0.0);
        self.state.player_tower_hp = self.state.player_tower_hp.max(0.0);

        // Enemy tower is checked first: if both fall in the same tick,
        // the player takes the match
        if self.state.enemy_tower_hp <= 0.0 {
            self.end_match(Owner::Player, events);
        }
        if self.state.player_tower_hp <= 0.0 {
            self.end_match(Owner::Enemy, events);
        }
    }

    fn end_match(&mut self, winner: Owner, events: &mut MatchEventLog) {
        if self.state.game_over {
            return;
        }
        self.state.end_match(winner);
        tracing::info!(winner = %winner, tick = self.state.tick, "match over");
        events.push(
            MatchEvent::MatchEnded { winner },
            format!("{} wins the match!", winner),
            self.state.tick,
        );
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl Arena {
    /// Direct working-state access for test setup only
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ai::SilentOpponent;
    use crate::arena::cards::CardKind;
    use crate::arena::entities::{EffectKind, Entity, VisualEffect};

    fn quiet_arena() -> Arena {
        let mut arena = Arena::with_opponent(Box::new(SilentOpponent));
        arena.start();
        arena
    }

    #[test]
    fn test_tick_is_a_no_op_before_start() {
        let mut arena = Arena::with_opponent(Box::new(SilentOpponent));
        arena.run_tick();
        assert_eq!(arena.snapshot().tick, 0);
    }

    #[test]
    fn test_tick_increments_and_regens() {
        let mut arena = quiet_arena();
        arena.run_tick();
        let snap = arena.snapshot();
        assert_eq!(snap.tick, 1);
        assert_eq!(snap.player_elixir, 5.05);
        assert_eq!(snap.enemy_elixir, 5.05);
    }

    #[test]
    fn test_effects_expire_after_window() {
        let mut arena = quiet_arena();
        arena
            .state
            .effects
            .push(VisualEffect::new(EffectKind::Zap, 25.0, 50.0, 0));

        for _ in 0..14 {
            arena.run_tick();
        }
        assert_eq!(arena.snapshot().effects.len(), 1);

        arena.run_tick();
        assert!(arena.snapshot().effects.is_empty());
    }

    #[test]
    fn test_units_advance_in_opposite_directions() {
        let mut arena = quiet_arena();
        arena
            .state
            .entities
            .push(Entity::spawn(CardKind::Knight, Owner::Player, Lane::Left, 70.0));
        arena
            .state
            .entities
            .push(Entity::spawn(CardKind::Knight, Owner::Enemy, Lane::Right, 30.0));

        arena.run_tick();
        let snap = arena.snapshot();
        assert_eq!(snap.entities[0].y, 70.0 - 0.35);
        assert_eq!(snap.entities[1].y, 30.0 + 0.35);
        assert_eq!(snap.entities[0].state, EntityState::Moving);
    }

    #[test]
    fn test_friendly_block_holds_position() {
        let mut arena = quiet_arena();
        // Lead knight and a follower within blocking distance behind it
        arena
            .state
            .entities
            .push(Entity::spawn(CardKind::Knight, Owner::Player, Lane::Left, 60.0));
        arena
            .state
            .entities
            .push(Entity::spawn(CardKind::Knight, Owner::Player, Lane::Left, 65.0));

        arena.run_tick();
        let snap = arena.snapshot();
        assert_eq!(snap.entities[0].y, 60.0 - 0.35, "lead unit advances");
        assert_eq!(snap.entities[1].y, 65.0, "follower is blocked in place");
        assert_eq!(snap.entities[1].state, EntityState::Moving);
    }

    #[test]
    fn test_snapshot_is_isolated_from_working_state() {
        let mut arena = quiet_arena();
        let before = arena.snapshot();
        arena.run_tick();
        assert_eq!(before.tick, 0, "published snapshot is immutable");
        assert_eq!(arena.snapshot().tick, 1);
    }

    #[test]
    fn test_tower_destruction_ends_match_immediately() {
        let mut arena = quiet_arena();
        arena.state.enemy_tower_hp = 50.0;
        // Knight parked in tower range
        arena
            .state
            .entities
            .push(Entity::spawn(CardKind::Knight, Owner::Player, Lane::Left, 14.0));

        arena.run_tick();
        let snap = arena.snapshot();
        assert!(snap.game_over);
        assert_eq!(snap.winner, Some(Owner::Player));
        assert_eq!(snap.enemy_tower_hp, 0.0);
    }

    #[test]
    fn test_match_end_is_terminal_until_restart() {
        let mut arena = quiet_arena();
        arena.state.enemy_tower_hp = 10.0;
        arena
            .state
            .entities
            .push(Entity::spawn(CardKind::Knight, Owner::Player, Lane::Left, 14.0));
        arena.run_tick();
        assert!(arena.snapshot().game_over);

        let tick_after_end = arena.snapshot().tick;
        arena.run_tick();
        assert_eq!(arena.snapshot().tick, tick_after_end, "no ticks after the end");

        arena.start();
        let snap = arena.snapshot();
        assert!(snap.is_playing);
        assert!(!snap.game_over);
        assert_eq!(snap.enemy_tower_hp, 2000.0);
        assert!(snap.entities.is_empty());
    }
}
