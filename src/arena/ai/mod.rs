//! Opponent decision-making
//!
//! Architecture: the engine never decides casts itself. A strategy is handed
//! a read-only snapshot once per decision window and produces at most one
//! cast intent, which the engine feeds through the normal cast intake. This
//! keeps movement/combat logic testable with a silent opponent substituted.

mod scripted;

pub use scripted::ScriptedOpponent;

use crate::arena::cast::CastIntent;
use crate::arena::state::GameState;

/// Trait for opponent implementations
pub trait OpponentStrategy: Send {
    /// Evaluate the current tick - returns at most one cast intent
    fn decide(&mut self, state: &GameState) -> Option<CastIntent>;
}

/// A strategy that never acts; used to isolate movement/combat in tests
#[derive(Debug, Default)]
pub struct SilentOpponent;

impl OpponentStrategy for SilentOpponent {
    fn decide(&mut self, _state: &GameState) -> Option<CastIntent> {
        None
    }
}
