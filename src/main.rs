//! Lane Clash - Entry Point
//!
//! Headless playtest driver for the simulation engine. It hosts the tick
//! loop, performs the human-input-path placement validation, and prints
//! snapshots and live commentary; everything visual beyond that belongs to
//! an external presentation layer.

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use tokio::runtime::Runtime;

use lane_clash::arena::{
    player_placement_allowed, Arena, CardKind, CastIntent, GameState, MatchEventLog,
};
use lane_clash::core::error::Result;
use lane_clash::core::types::{Lane, Owner};
use lane_clash::llm::narrator::{spawn_narrator, strategy_advice, Commentary, NarrationRequest};
use lane_clash::llm::LlmClient;
use lane_clash::runtime::MatchRunner;

#[derive(Parser)]
#[command(name = "lane-clash", about = "Real-time lane battle playtest driver")]
struct Args {
    /// RNG seed for deterministic engine and opponent behavior
    #[arg(long)]
    seed: Option<u64>,

    /// Run a spectator match for up to this many ticks, then exit
    #[arg(long)]
    demo: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lane_clash=info".into()),
        )
        .init();

    tracing::info!("Lane Clash starting...");

    // Async runtime for the narration side channel and the tick loop
    let rt = Runtime::new()?;

    // Narration is optional - the game runs fine without a key
    let llm_client = LlmClient::from_env().ok().map(Arc::new);
    if llm_client.is_none() {
        tracing::warn!("LLM_API_KEY not set - running with fallback commentary");
    }
    let (narration_tx, mut commentary_rx) = {
        let _guard = rt.enter();
        spawn_narrator(llm_client.clone())
    };

    let mut arena = match args.seed {
        Some(seed) => Arena::with_seed(seed),
        None => Arena::new(),
    };

    if let Some(max_ticks) = args.demo {
        let events = arena.start();
        forward(&narration_tx, &arena, &events);
        let mut runner = MatchRunner::new(arena).with_narration(narration_tx.clone());
        rt.block_on(runner.run(Some(max_ticks)));
        let arena = runner.into_arena();
        print_status(&arena.snapshot());
        print_commentary(&mut commentary_rx);
        return Ok(());
    }

    println!("\n=== LANE CLASH ===");
    println!("Two lanes, two towers, one regenerating pool of elixir each.");
    println!();
    println!("Commands:");
    println!("  start                - Begin a new match");
    println!("  cast <card> <x> <y>  - Cast a card at field coordinates (0-100)");
    println!("  tick / t             - Advance the simulation by one tick");
    println!("  run <n>              - Run n simulation ticks");
    println!("  play                 - Run the match in real time to the end");
    println!("  status / s           - Show the battlefield");
    println!("  advice               - Ask the tactical assistant");
    println!("  quit / q             - Exit");
    println!();

    loop {
        print_commentary(&mut commentary_rx);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "start" {
            let events = arena.start();
            forward(&narration_tx, &arena, &events);
            println!("Match started. Good luck!");
            continue;
        }

        if input == "tick" || input == "t" {
            let events = arena.run_tick();
            forward(&narration_tx, &arena, &events);
            println!("Tick {} complete.", arena.snapshot().tick);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            if let Ok(n) = rest.parse::<u32>() {
                for _ in 0..n {
                    let events = arena.run_tick();
                    forward(&narration_tx, &arena, &events);
                }
                println!("Now at tick {}.", arena.snapshot().tick);
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        if input == "play" {
            if !arena.snapshot().active() {
                println!("No active match. Use 'start' first.");
                continue;
            }
            println!("Running in real time until the match ends (ctrl-c to abort)...");
            let mut runner = MatchRunner::new(arena).with_narration(narration_tx.clone());
            rt.block_on(runner.run(None));
            arena = runner.into_arena();
            print_status(&arena.snapshot());
            continue;
        }

        if input == "status" || input == "s" {
            print_status(&arena.snapshot());
            continue;
        }

        if input == "advice" {
            let snapshot = arena.snapshot();
            let enemy_units: Vec<String> = snapshot
                .units_of(Owner::Enemy)
                .map(|e| e.kind.stats().name.to_string())
                .collect();
            let advice = rt.block_on(strategy_advice(
                llm_client.as_deref(),
                snapshot.player_elixir,
                &enemy_units,
            ));
            println!("Tip: {}", advice);
            continue;
        }

        if let Some(rest) = input.strip_prefix("cast ") {
            handle_cast(rest, &mut arena, &narration_tx);
            continue;
        }

        println!("Unknown command. Available: start, cast, tick, run <n>, play, status, advice, quit");
    }

    println!(
        "\nGoodbye! Final state: tick {}, {} entities.",
        arena.snapshot().tick,
        arena.snapshot().entities.len()
    );
    Ok(())
}

/// Parse and apply a player cast: `cast knight 25 70`
fn handle_cast(
    rest: &str,
    arena: &mut Arena,
    narration_tx: &tokio::sync::mpsc::UnboundedSender<NarrationRequest>,
) {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let (card, x, y) = match parts.as_slice() {
        [name, x, y] => match (CardKind::parse(name), x.parse::<f32>(), y.parse::<f32>()) {
            (Some(card), Ok(x), Ok(y)) => (card, x, y),
            _ => {
                println!("Usage: cast <knight|archer|giant|skeletons|fireball|zap> <x> <y>");
                return;
            }
        },
        _ => {
            println!("Usage: cast <card> <x> <y>");
            return;
        }
    };

    if !arena.snapshot().active() {
        println!("No active match. Use 'start' first.");
        return;
    }

    // Spawn-side restriction: units only on the player's own half
    if !player_placement_allowed(card, y) {
        println!("Enemy territory! Units must be placed on your own half.");
        return;
    }

    let elixir_before = arena.snapshot().player_elixir;
    let events = arena.cast(CastIntent {
        card,
        owner: Owner::Player,
        lane: Lane::from_x(x),
        x,
        y,
    });
    forward(narration_tx, arena, &events);

    let snapshot = arena.snapshot();
    if snapshot.player_elixir < elixir_before {
        println!(
            "Cast {} ({} elixir left).",
            card.stats().name,
            snapshot.player_elixir
        );
    } else {
        println!("Not enough elixir for {}.", card.stats().name);
    }
}

/// Forward engine events to the narration channel (fire-and-forget)
fn forward(
    narration_tx: &tokio::sync::mpsc::UnboundedSender<NarrationRequest>,
    arena: &Arena,
    events: &MatchEventLog,
) {
    let snapshot = arena.snapshot();
    for record in &events.events {
        let _ = narration_tx.send(NarrationRequest {
            event: record.description.clone(),
            glimpse: lane_clash::llm::MatchGlimpse::from_state(&snapshot),
        });
    }
}

/// Print the latest commentary line if it changed since last shown
fn print_commentary(commentary_rx: &mut tokio::sync::watch::Receiver<Commentary>) {
    if commentary_rx.has_changed().unwrap_or(false) {
        let commentary = commentary_rx.borrow_and_update().clone();
        println!("[{:?}] {}", commentary.mood, commentary.text);
    }
}

/// Plain-text rendering of a snapshot
fn print_status(state: &GameState) {
    println!();
    println!(
        "--- Tick {} | {} ---",
        state.tick,
        if state.game_over {
            match state.winner {
                Some(winner) => format!("{} WINS", winner),
                None => "over".into(),
            }
        } else if state.is_playing {
            "playing".into()
        } else {
            "not started".into()
        }
    );
    println!(
        "  Towers: enemy {:>6.0} hp | player {:>6.0} hp",
        state.enemy_tower_hp, state.player_tower_hp
    );
    println!(
        "  Elixir: enemy {:>4.1}      | player {:>4.1}",
        state.enemy_elixir, state.player_elixir
    );

    if state.entities.is_empty() {
        println!("  Field: empty");
    } else {
        for entity in &state.entities {
            println!(
                "  {:<9} {:<6} lane {:<5} y {:>5.1}  {:>4.0}/{:<4.0} hp  [{:?}]",
                entity.kind.stats().name,
                entity.owner.to_string(),
                format!("{:?}", entity.lane),
                entity.y,
                entity.hp,
                entity.max_hp,
                entity.state
            );
        }
    }
    println!();
}
