//! Headless runner application.
//!
//! Wires the streaming engine, player effects and persistence together:
//! a stand-in player model drives the engine, a session banks results at
//! game over, and a fixed-rate loop thread serves snapshots.

pub mod error;
pub mod game_loop;
pub mod player;
pub mod session;
pub mod state;

pub use runner_core as core;
