//! Live match narration and strategy advice
//!
//! The engine emits event labels; a background task drains them through a
//! cooldown gate, asks the LLM for a one-liner, and writes the result to a
//! display-only watch slot. Simulation timing never depends on any of this:
//! triggers inside the cooldown window are dropped, failures fall back to a
//! fixed line, and nothing here can reach back into the engine.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::arena::state::GameState;
use crate::core::error::Result;
use crate::core::types::Owner;
use crate::llm::client::LlmClient;

/// Minimum spacing between commentary requests; excess triggers are dropped
pub const COMMENTARY_COOLDOWN: Duration = Duration::from_secs(4);

/// Commentator mood, driving presentation styling only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Neutral,
    Excited,
    Tense,
    Victory,
}

// Anything the model invents ("sad", "hyped", ...) collapses to neutral
impl<'de> Deserialize<'de> for Mood {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "excited" => Mood::Excited,
            "tense" => Mood::Tense,
            "victory" => Mood::Victory,
            _ => Mood::Neutral,
        })
    }
}

/// One line of commentary with its mood
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commentary {
    pub text: String,
    pub mood: Mood,
}

impl Default for Commentary {
    fn default() -> Self {
        Self {
            text: "Get ready for battle!".into(),
            mood: Mood::Neutral,
        }
    }
}

impl Commentary {
    /// Fixed line used whenever the service fails or misbehaves
    pub fn fallback() -> Self {
        Self {
            text: "What an intense match!".into(),
            mood: Mood::Neutral,
        }
    }
}

/// The snapshot subset the narrator is allowed to see
#[derive(Debug, Clone, Serialize)]
pub struct MatchGlimpse {
    pub player_tower_hp: f32,
    pub enemy_tower_hp: f32,
    pub units_on_field: usize,
    pub winner: Option<Owner>,
}

impl MatchGlimpse {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            player_tower_hp: state.player_tower_hp,
            enemy_tower_hp: state.enemy_tower_hp,
            units_on_field: state.entities.len(),
            winner: state.winner,
        }
    }
}

/// A commentary trigger: an event label plus the glimpse taken with it
#[derive(Debug, Clone)]
pub struct NarrationRequest {
    pub event: String,
    pub glimpse: MatchGlimpse,
}

/// Rate gate for commentary triggers
struct CooldownGate {
    min_interval: Duration,
    last: Option<Instant>,
}

impl CooldownGate {
    fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Returns true and arms the gate when enough time has passed
    fn try_pass(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Spawn the narration task.
///
/// Returns the trigger sender (fed by the match runner) and the watch slot
/// the presentation side reads. Must be called inside a tokio runtime.
pub fn spawn_narrator(
    client: Option<Arc<LlmClient>>,
) -> (
    mpsc::UnboundedSender<NarrationRequest>,
    watch::Receiver<Commentary>,
) {
    let (trigger_tx, mut trigger_rx) = mpsc::unbounded_channel::<NarrationRequest>();
    let (slot_tx, slot_rx) = watch::channel(Commentary::default());

    tokio::spawn(async move {
        let mut gate = CooldownGate::new(COMMENTARY_COOLDOWN);
        while let Some(request) = trigger_rx.recv().await {
            if !gate.try_pass(Instant::now()) {
                continue;
            }

            let commentary = match &client {
                Some(client) => match request_commentary(client, &request).await {
                    Ok(commentary) => commentary,
                    Err(e) => {
                        tracing::warn!(error = %e, "commentary request failed");
                        Commentary::fallback()
                    }
                },
                None => Commentary {
                    text: "API key not configured.".into(),
                    mood: Mood::Neutral,
                },
            };

            if slot_tx.send(commentary).is_err() {
                break;
            }
        }
    });

    (trigger_tx, slot_rx)
}

async fn request_commentary(client: &LlmClient, request: &NarrationRequest) -> Result<Commentary> {
    let system = "You are an EXTREMELY energetic and funny esports commentator \
                  narrating a Clash-Royale-style lane battle. Respond with a JSON \
                  object containing \"text\" (a short reaction, two sentences max) \
                  and \"mood\" (one of \"neutral\", \"excited\", \"tense\", \"victory\").";
    let user = format!(
        "Recent event: {}\n\
         Player tower HP: {:.0}\n\
         Enemy tower HP: {:.0}\n\
         Units on the field: {}\n\
         Winner (if any): {}",
        request.event,
        request.glimpse.player_tower_hp,
        request.glimpse.enemy_tower_hp,
        request.glimpse.units_on_field,
        request
            .glimpse
            .winner
            .map(|w| w.to_string())
            .unwrap_or_else(|| "none".into()),
    );

    let raw = client.complete(system, &user).await?;
    Ok(serde_json::from_str(extract_json(&raw))?)
}

/// Clip to the outermost JSON object, tolerating code fences around it
fn extract_json(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end >= start => &raw[start..=end],
        _ => raw,
    }
}

/// Ask for one short tactical tip. Falls back to a fixed line on any failure.
pub async fn strategy_advice(
    client: Option<&LlmClient>,
    elixir: f32,
    enemy_units: &[String],
) -> String {
    let Some(client) = client else {
        return "Play it wisely!".into();
    };

    let system = "You are a tactical assistant for a lane-battle game. \
                  Give ONE super-short tip (ten words max) about what to do now.";
    let user = format!(
        "My elixir: {}\nVisible enemy units: {}",
        elixir.floor(),
        if enemy_units.is_empty() {
            "none".to_string()
        } else {
            enemy_units.join(", ")
        },
    );

    match client.complete(system, &user).await {
        Ok(advice) => advice.trim().to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "advice request failed");
            "Defend your towers!".into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_parses_known_and_unknown_values() {
        assert_eq!(serde_json::from_str::<Mood>("\"excited\"").unwrap(), Mood::Excited);
        assert_eq!(serde_json::from_str::<Mood>("\"victory\"").unwrap(), Mood::Victory);
        // Anything the model invents collapses to neutral
        assert_eq!(serde_json::from_str::<Mood>("\"sad\"").unwrap(), Mood::Neutral);
    }

    #[test]
    fn test_commentary_parses_from_model_json() {
        let raw = "```json\n{ \"text\": \"THE GIANT IS COMING!\", \"mood\": \"excited\" }\n```";
        let commentary: Commentary = serde_json::from_str(extract_json(raw)).unwrap();
        assert_eq!(commentary.text, "THE GIANT IS COMING!");
        assert_eq!(commentary.mood, Mood::Excited);
    }

    #[test]
    fn test_glimpse_reflects_state() {
        use crate::arena::cards::CardKind;
        use crate::arena::entities::Entity;
        use crate::core::types::Lane;

        let mut state = GameState::new();
        state
            .entities
            .push(Entity::spawn(CardKind::Knight, Owner::Player, Lane::Left, 70.0));
        state.enemy_tower_hp = 120.0;

        let glimpse = MatchGlimpse::from_state(&state);
        assert_eq!(glimpse.units_on_field, 1);
        assert_eq!(glimpse.enemy_tower_hp, 120.0);
        assert_eq!(glimpse.winner, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_gate_drops_rapid_triggers() {
        let mut gate = CooldownGate::new(COMMENTARY_COOLDOWN);
        let start = Instant::now();
        assert!(gate.try_pass(start));
        assert!(!gate.try_pass(start + Duration::from_secs(1)));
        assert!(!gate.try_pass(start + Duration::from_millis(3999)));
        assert!(gate.try_pass(start + Duration::from_secs(4)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_narrator_without_client_still_publishes() {
        let (tx, mut rx) = spawn_narrator(None);
        assert_eq!(*rx.borrow(), Commentary::default());

        tx.send(NarrationRequest {
            event: "The match has begun!".into(),
            glimpse: MatchGlimpse::from_state(&GameState::new()),
        })
        .unwrap();

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().text, "API key not configured.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_narrator_drops_triggers_inside_cooldown() {
        let (tx, mut rx) = spawn_narrator(None);

        for i in 0..5 {
            tx.send(NarrationRequest {
                event: format!("event {i}"),
                glimpse: MatchGlimpse::from_state(&GameState::new()),
            })
            .unwrap();
        }

        rx.changed().await.unwrap();
        // Give the task a chance to drain the remaining triggers
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert!(!rx.has_changed().unwrap(), "burst collapses to one update");
    }
}
