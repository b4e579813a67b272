//! Arena constants - all tunable values in one place
//!
//! Distances and positions are field percentages (0-100 on each axis).

use crate::core::types::Tick;

// Time
pub const TICKS_PER_SECOND: u32 = 30;
pub const TICK_INTERVAL_MS: u64 = 1000 / TICKS_PER_SECOND as u64;

// Elixir
pub const MAX_ELIXIR: f32 = 10.0;
pub const INITIAL_ELIXIR: f32 = 5.0;
pub const ELIXIR_REGEN_PER_TICK: f32 = 0.05; // Empty to full in ~200 ticks (~6.7s)

// Towers
pub const TOWER_MAX_HP: f32 = 2000.0;
pub const TOWER_X: f32 = 50.0;
pub const ENEMY_TOWER_Y: f32 = 10.0;
pub const PLAYER_TOWER_Y: f32 = 90.0;
// Rows where advancing units engage the opposing tower (and are clamped)
pub const ENEMY_TOWER_ENGAGE_Y: f32 = 12.0;
pub const PLAYER_TOWER_ENGAGE_Y: f32 = 88.0;

// Lanes
pub const LANE_LEFT_X: f32 = 25.0;
pub const LANE_RIGHT_X: f32 = 75.0;

// Movement
pub const FRIENDLY_BLOCK_DISTANCE: f32 = 7.0;

// Spawning - the player may only place units on their own half
pub const PLAYER_SPAWN_MIN_Y: f32 = 45.0;

// Visual effects linger this many ticks before being purged (~0.5s)
pub const EFFECT_EXPIRY_TICKS: Tick = 15;

// Scripted opponent
pub const OPPONENT_DECISION_INTERVAL: Tick = 60; // ~2s
pub const OPPONENT_ELIXIR_FLOOR: f32 = 6.0;
pub const OPPONENT_SPELL_CHANCE: f32 = 0.2;
pub const OPPONENT_SPAWN_Y: f32 = 10.0;
pub const OPPONENT_SPELL_TARGET_X: f32 = 25.0;
pub const OPPONENT_SPELL_TARGET_Y: f32 = 80.0;

// A spawned unit's first eligible attack must never be cadence-blocked
pub const LAST_ATTACK_SENTINEL: i64 = -100;

// Player-caused spawns trigger commentary with this probability (flavor only)
pub const SPAWN_COMMENTARY_CHANCE: f32 = 0.3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regen_reaches_cap_in_about_200_ticks() {
        let ticks = (MAX_ELIXIR / ELIXIR_REGEN_PER_TICK) as u32;
        assert_eq!(ticks, 200);
    }

    #[test]
    fn test_engage_rows_inside_field() {
        assert!(ENEMY_TOWER_ENGAGE_Y > ENEMY_TOWER_Y);
        assert!(PLAYER_TOWER_ENGAGE_Y < PLAYER_TOWER_Y);
    }

    #[test]
    fn test_sentinel_clears_any_cadence() {
        // Longest cadence in the catalog is 45 ticks
        assert!(0 - LAST_ATTACK_SENTINEL >= 45);
    }
}
