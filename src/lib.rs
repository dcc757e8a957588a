//! # Arena Duel
//!
//! Deterministic simulation core for a two-player real-time arena shooter.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       ARENA DUEL                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rect.rs     - Axis-aligned rectangle + overlap tests    │
//! │  └── rng.rs      - Deterministic Xorshift128+ PRNG           │
//! │                                                              │
//! │  game/           - Simulation (deterministic)                │
//! │  ├── config.rs   - Gameplay tuning, validated                │
//! │  ├── input.rs    - Sampled per-player input frames           │
//! │  ├── state.rs    - Players, bullets, pickups, round state    │
//! │  ├── collision.rs- Overlap resolution helpers                │
//! │  ├── powerup.rs  - Power-up spawning and effects             │
//! │  ├── trap.rs     - Trap spawning and contact damage          │
//! │  ├── events.rs   - Per-tick event stream                     │
//! │  ├── tick.rs     - The frame step                            │
//! │  └── controller.rs - Lifecycle state machine                 │
//! │                                                              │
//! │  render/         - Presentation (read-only)                  │
//! │  └── mod.rs      - Display list + sound cues from state      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! The simulation advances in fixed ticks driven by the embedder's frame
//! callback. All timed effects are expressed as tick deadlines polled by the
//! step itself, so pausing freezes the whole world, and all randomness comes
//! from a seeded Xorshift128+. Given the same seed and input frames, a round
//! plays out identically.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod render;

// Re-export commonly used types
pub use crate::core::rect::Rect;
pub use crate::core::rng::DeterministicRng;
pub use crate::game::config::GameConfig;
pub use crate::game::controller::GameController;
pub use crate::game::input::InputFrame;
pub use crate::game::state::{GameState, PlayerSlot, PlayerState, RoundOutcome};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate in Hz, one tick per display refresh.
pub const TICK_RATE: u32 = 60;

/// Convert a wall-clock duration in milliseconds to whole ticks at [`TICK_RATE`].
pub const fn ms_to_ticks(ms: u32) -> u32 {
    ms * TICK_RATE / 1000
}
