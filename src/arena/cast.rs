//! Cast intake - validates and applies spawn/spell requests
//!
//! Both the human input path and the opponent decision path funnel through
//! `cast_card`. An unaffordable cast is silently ignored; a successful cast
//! deducts elixir immediately, unconditionally of what follows.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arena::cards::CardKind;
use crate::arena::constants::{
    ENEMY_TOWER_Y, PLAYER_SPAWN_MIN_Y, PLAYER_TOWER_Y, SPAWN_COMMENTARY_CHANCE, TOWER_X,
};
use crate::arena::entities::{EffectKind, Entity, VisualEffect};
use crate::arena::events::{MatchEvent, MatchEventLog};
use crate::arena::state::GameState;
use crate::core::types::{Lane, Owner};

/// Normalized cast request: the only inbound signal into the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CastIntent {
    pub card: CardKind,
    pub owner: Owner,
    pub lane: Lane,
    pub x: f32,
    pub y: f32,
}

fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

/// Spawn-side restriction for the human input path: units may only be placed
/// on the player's own half of the field. Spells go anywhere. The opponent
/// path and cast intake itself do not apply this check.
pub fn player_placement_allowed(card: CardKind, y: f32) -> bool {
    card.is_spell() || y >= PLAYER_SPAWN_MIN_Y
}

/// Apply a cast request against the current state.
///
/// Insufficient elixir is a silent no-op. Spells resolve instantly: a visual
/// effect, area damage to opposing units (boundary inclusive), and full
/// damage to the opposing tower when the blast reaches its anchor - which
/// tower is decided by caster identity, never geometry. Units spawn at the
/// lane anchor regardless of the supplied x.
pub fn cast_card(
    state: &mut GameState,
    rng: &mut impl Rng,
    intent: CastIntent,
    events: &mut MatchEventLog,
) {
    let stats = intent.card.stats();

    if state.elixir(intent.owner) < stats.cost {
        tracing::debug!(card = ?intent.card, owner = %intent.owner, "cast rejected: insufficient elixir");
        return;
    }
    state.spend_elixir(intent.owner, stats.cost);

    if stats.is_spell {
        let effect_kind = match intent.card {
            CardKind::Fireball => EffectKind::Explosion,
            _ => EffectKind::Zap,
        };
        state
            .effects
            .push(VisualEffect::new(effect_kind, intent.x, intent.y, state.tick));

        // Area damage to opposing units; lane fixes each entity's x
        for entity in state.entities.iter_mut() {
            if entity.owner == intent.owner {
                continue;
            }
            let dist = distance(entity.x(), entity.y, intent.x, intent.y);
            if dist <= stats.range {
                entity.take_damage(stats.damage);
            }
        }

        // Only the tower opposite the caster can be hit by this cast
        let (target_tower, tower_y) = match intent.owner {
            Owner::Player => (Owner::Enemy, ENEMY_TOWER_Y),
            Owner::Enemy => (Owner::Player, PLAYER_TOWER_Y),
        };
        if distance(TOWER_X, tower_y, intent.x, intent.y) <= stats.range {
            state.damage_tower(target_tower, stats.damage);
        }

        events.push(
            MatchEvent::SpellCast {
                card: intent.card,
                owner: intent.owner,
            },
            format!("{} used {}!", intent.owner, stats.name),
            state.tick,
        );
    } else {
        // The lane anchor overrides whatever x was supplied
        let entity = Entity::spawn(intent.card, intent.owner, intent.lane, intent.y);
        state.entities.push(entity);

        if intent.owner == Owner::Player && rng.gen::<f32>() < SPAWN_COMMENTARY_CHANCE {
            events.push(
                MatchEvent::UnitDeployed {
                    card: intent.card,
                    owner: intent.owner,
                },
                format!("The player deployed {}!", stats.name),
                state.tick,
            );
        }
    }
}
