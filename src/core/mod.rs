//! Deterministic primitives shared by the simulation.
//!
//! Nothing in this module reads the system clock or any other ambient
//! state; all randomness is seeded.

pub mod rect;
pub mod rng;
