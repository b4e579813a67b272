//! Match events emitted by the engine each tick
//!
//! The log is the engine's only outbound signal: the runner forwards event
//! descriptions to the narration channel, and tests assert on event kinds.

use serde::{Deserialize, Serialize};

use crate::arena::cards::CardKind;
use crate::core::types::{Owner, Tick};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    MatchStarted,
    UnitDeployed { card: CardKind, owner: Owner },
    SpellCast { card: CardKind, owner: Owner },
    MatchEnded { winner: Owner },
}

/// Log entry for a match event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEventRecord {
    pub tick: Tick,
    pub event: MatchEvent,
    pub description: String,
}

/// Events from a single tick (or a single cast)
#[derive(Debug, Clone, Default)]
pub struct MatchEventLog {
    pub events: Vec<MatchEventRecord>,
}

impl MatchEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MatchEvent, description: String, tick: Tick) {
        self.events.push(MatchEventRecord {
            tick,
            event,
            description,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_records_tick_and_description() {
        let mut log = MatchEventLog::new();
        assert!(log.is_empty());
        log.push(MatchEvent::MatchStarted, "The match has begun!".into(), 0);
        log.push(
            MatchEvent::MatchEnded {
                winner: Owner::Player,
            },
            "Player wins!".into(),
            42,
        );
        assert_eq!(log.events.len(), 2);
        assert_eq!(log.events[1].tick, 42);
        assert_eq!(log.events[1].description, "Player wins!");
    }
}
