//! Fixed-timestep match runner
//!
//! Single-threaded cooperative loop: sample the clock, apply at most one
//! tick per iteration, yield back to the host. A long stall therefore
//! produces one tick covering the whole gap, never a burst of catch-up
//! ticks. Match events are forwarded to the narration channel as they
//! happen; the loop never waits on narration.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;

use crate::arena::constants::TICK_INTERVAL_MS;
use crate::arena::engine::Arena;
use crate::arena::events::MatchEventLog;
use crate::llm::narrator::{MatchGlimpse, NarrationRequest};

pub struct MatchRunner {
    arena: Arena,
    tick_interval: Duration,
    narration: Option<UnboundedSender<NarrationRequest>>,
}

impl MatchRunner {
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            narration: None,
        }
    }

    /// Forward event descriptions to this narration channel while running
    pub fn with_narration(mut self, narration: UnboundedSender<NarrationRequest>) -> Self {
        self.narration = Some(narration);
        self
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Reclaim the engine once the run is over
    pub fn into_arena(self) -> Arena {
        self.arena
    }

    /// Drive the match until it ends, or until `max_ticks` have been applied
    pub async fn run(&mut self, max_ticks: Option<u64>) {
        let mut applied: u64 = 0;
        let mut last = Instant::now();

        loop {
            if !self.arena.snapshot().active() {
                break;
            }
            if let Some(cap) = max_ticks {
                if applied >= cap {
                    break;
                }
            }

            let now = Instant::now();
            let elapsed = now.duration_since(last);
            if elapsed >= self.tick_interval {
                let events = self.arena.run_tick();
                self.forward(&events);
                applied += 1;
                // One step covers the whole gap, however long the stall was
                last = now;
            } else {
                tokio::time::sleep(self.tick_interval - elapsed).await;
            }
        }

        tracing::debug!(ticks = applied, "runner stopped");
    }

    fn forward(&self, events: &MatchEventLog) {
        let Some(narration) = &self.narration else {
            return;
        };
        if events.is_empty() {
            return;
        }
        let snapshot = self.arena.snapshot();
        for record in &events.events {
            // Fire-and-forget; a closed narrator just means silence
            let _ = narration.send(NarrationRequest {
                event: record.description.clone(),
                glimpse: MatchGlimpse::from_state(&snapshot),
            });
        }
    }
}
