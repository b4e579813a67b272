//! Lane Clash - Real-Time Lane-Battle Simulation

pub mod arena;
pub mod core;
pub mod llm;
pub mod runtime;
