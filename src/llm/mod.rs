//! External narration service integration
//!
//! Commentary and strategy advice are purely observational: they consume
//! snapshot subsets, never mutate simulation state, and every failure path
//! degrades to a fixed fallback without touching the tick loop.

pub mod client;
pub mod narrator;

pub use client::LlmClient;
pub use narrator::{
    spawn_narrator, strategy_advice, Commentary, MatchGlimpse, Mood, NarrationRequest,
};
