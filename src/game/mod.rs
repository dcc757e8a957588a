//! Game simulation.
//!
//! Everything under this module is deterministic: the step mutates
//! [`state::GameState`] from sampled [`input::InputFrame`]s and a seeded RNG,
//! nothing else.

pub mod collision;
pub mod config;
pub mod controller;
pub mod events;
pub mod input;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod trap;
