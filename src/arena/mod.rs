//! Arena simulation - fixed-tick lane battle between two towers
//!
//! Each tick: elixir regen -> effect expiry -> opponent decision ->
//! per-entity targeting/movement/combat -> cleanup -> termination check.
//!
//! The engine owns all mutable battle state. Everything outside this module
//! (the CLI, the narrator) only ever sees immutable snapshots published at
//! tick end, and feeds input back exclusively as cast intents.

pub mod ai;
pub mod cards;
pub mod cast;
pub mod constants;
pub mod engine;
pub mod entities;
pub mod events;
pub mod state;

// Re-exports for convenient access
pub use ai::{OpponentStrategy, ScriptedOpponent};
pub use cards::{CardKind, CardStats};
pub use cast::{cast_card, player_placement_allowed, CastIntent};
pub use constants::*;
pub use engine::Arena;
pub use entities::{EffectKind, Entity, EntityState, VisualEffect};
pub use events::{MatchEvent, MatchEventLog, MatchEventRecord};
pub use state::GameState;
