//! Property tests for the state invariants the engine must never break

use proptest::prelude::*;

use lane_clash::arena::{Arena, CardKind, CastIntent};
use lane_clash::core::types::{Lane, Owner};

#[derive(Debug, Clone)]
struct CastOp {
    card: CardKind,
    owner: Owner,
    lane: Lane,
    x: f32,
    y: f32,
    ticks_after: u8,
}

fn card_strategy() -> impl Strategy<Value = CardKind> {
    prop::sample::select(CardKind::ALL.to_vec())
}

fn cast_op_strategy() -> impl Strategy<Value = CastOp> {
    (
        card_strategy(),
        prop::bool::ANY,
        prop::bool::ANY,
        0.0f32..=100.0,
        0.0f32..=100.0,
        0u8..8,
    )
        .prop_map(|(card, player, left, x, y, ticks_after)| CastOp {
            card,
            owner: if player { Owner::Player } else { Owner::Enemy },
            lane: if left { Lane::Left } else { Lane::Right },
            x,
            y,
            ticks_after,
        })
}

proptest! {
    /// Elixir stays inside [0, 10] and towers never go negative in any
    /// published post-tick snapshot, whatever gets cast wherever.
    #[test]
    fn invariants_hold_under_arbitrary_cast_sequences(
        seed in 0u64..1000,
        ops in prop::collection::vec(cast_op_strategy(), 1..40),
    ) {
        let mut arena = Arena::with_seed(seed);
        arena.start();

        for op in ops {
            arena.cast(CastIntent {
                card: op.card,
                owner: op.owner,
                lane: op.lane,
                x: op.x,
                y: op.y,
            });

            // Elixir can never be overdrawn, even mid-tick
            let snap = arena.snapshot();
            prop_assert!(snap.player_elixir >= 0.0 && snap.player_elixir <= 10.0);
            prop_assert!(snap.enemy_elixir >= 0.0 && snap.enemy_elixir <= 10.0);

            for _ in 0..op.ticks_after {
                arena.run_tick();
                let snap = arena.snapshot();
                prop_assert!(snap.player_elixir >= 0.0 && snap.player_elixir <= 10.0);
                prop_assert!(snap.enemy_elixir >= 0.0 && snap.enemy_elixir <= 10.0);
                prop_assert!(snap.player_tower_hp >= 0.0);
                prop_assert!(snap.enemy_tower_hp >= 0.0);
                prop_assert!(snap.player_tower_hp <= 2000.0);
                prop_assert!(snap.enemy_tower_hp <= 2000.0);
            }
        }
    }

    /// Once the match is over exactly one winner is set, and the loser's
    /// tower is the one that fell.
    #[test]
    fn a_finished_match_has_one_coherent_winner(seed in 0u64..200) {
        let mut arena = Arena::with_seed(seed);
        arena.start();

        // A tower-hugging knight on each side forces an ending
        arena.cast(CastIntent {
            card: CardKind::Knight,
            owner: Owner::Player,
            lane: Lane::Left,
            x: 25.0,
            y: 14.0,
        });
        arena.cast(CastIntent {
            card: CardKind::Knight,
            owner: Owner::Enemy,
            lane: Lane::Right,
            x: 75.0,
            y: 86.0,
        });

        for _ in 0..2000 {
            arena.run_tick();
            if arena.snapshot().game_over {
                break;
            }
        }

        let snap = arena.snapshot();
        prop_assert!(snap.game_over);
        prop_assert!(!snap.is_playing);
        let winner = snap.winner.expect("a finished match names a winner");
        match winner {
            Owner::Player => prop_assert!(snap.enemy_tower_hp <= 0.0),
            Owner::Enemy => prop_assert!(snap.player_tower_hp <= 0.0),
        }
    }

    /// Every entity in a published post-tick snapshot is alive; the dying
    /// tag never survives a tick boundary.
    #[test]
    fn published_snapshots_never_retain_the_dead(
        seed in 0u64..200,
        ops in prop::collection::vec(cast_op_strategy(), 1..20),
    ) {
        let mut arena = Arena::with_seed(seed);
        arena.start();

        for op in ops {
            arena.cast(CastIntent {
                card: op.card,
                owner: op.owner,
                lane: op.lane,
                x: op.x,
                y: op.y,
            });
            arena.run_tick();
            let snap = arena.snapshot();
            for entity in &snap.entities {
                prop_assert!(entity.hp > 0.0);
            }
        }
    }
}
