//! Core types and definitions for the runner streaming core.
//!
//! This crate defines the vocabulary shared across all other crates:
//! transforms, entity kinds, commands, events, run snapshots, tuning
//! constants and the streaming configuration. It has no dependency on the
//! ECS or on any runtime driver.

pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
