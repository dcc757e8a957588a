//! Input Capture
//!
//! The embedder samples its keyboard each frame and hands the simulation one
//! [`InputFrame`] per player: packed held-direction bits plus held action
//! buttons. Edge triggering (fire once per press) is resolved inside the
//! step via the player's shoot latch, not here.

use serde::{Deserialize, Serialize};

/// Sampled input state for one player for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[repr(C)]
pub struct InputFrame {
    /// Packed bits, see the `HOLD_*` and `BTN_*` constants.
    pub bits: u8,
}

impl InputFrame {
    /// Up direction key held
    pub const HOLD_UP: u8 = 0x01;
    /// Down direction key held
    pub const HOLD_DOWN: u8 = 0x02;
    /// Left direction key held
    pub const HOLD_LEFT: u8 = 0x04;
    /// Right direction key held
    pub const HOLD_RIGHT: u8 = 0x08;
    /// Fire button held
    pub const BTN_FIRE: u8 = 0x10;
    /// Shield button held
    pub const BTN_SHIELD: u8 = 0x20;
    /// Dash button held
    pub const BTN_DASH: u8 = 0x40;

    /// An idle frame: nothing held.
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Build a frame from individual direction keys.
    pub const fn with_held(up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut bits = 0;
        if up {
            bits |= Self::HOLD_UP;
        }
        if down {
            bits |= Self::HOLD_DOWN;
        }
        if left {
            bits |= Self::HOLD_LEFT;
        }
        if right {
            bits |= Self::HOLD_RIGHT;
        }
        Self { bits }
    }

    /// Set an action button, returning the updated frame.
    pub const fn pressing(self, button: u8) -> Self {
        Self { bits: self.bits | button }
    }

    #[inline]
    fn held(&self, bit: u8) -> bool {
        self.bits & bit != 0
    }

    /// Up key held?
    #[inline]
    pub fn up(&self) -> bool {
        self.held(Self::HOLD_UP)
    }

    /// Down key held?
    #[inline]
    pub fn down(&self) -> bool {
        self.held(Self::HOLD_DOWN)
    }

    /// Left key held?
    #[inline]
    pub fn left(&self) -> bool {
        self.held(Self::HOLD_LEFT)
    }

    /// Right key held?
    #[inline]
    pub fn right(&self) -> bool {
        self.held(Self::HOLD_RIGHT)
    }

    /// Fire button held?
    #[inline]
    pub fn fire(&self) -> bool {
        self.held(Self::BTN_FIRE)
    }

    /// Shield button held?
    #[inline]
    pub fn shield(&self) -> bool {
        self.held(Self::BTN_SHIELD)
    }

    /// Dash button held?
    #[inline]
    pub fn dash(&self) -> bool {
        self.held(Self::BTN_DASH)
    }

    /// Any movement key held?
    #[inline]
    pub fn has_movement(&self) -> bool {
        self.bits & (Self::HOLD_UP | Self::HOLD_DOWN | Self::HOLD_LEFT | Self::HOLD_RIGHT) != 0
    }

    /// Nothing held at all?
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.bits == 0
    }
}

// =============================================================================
// TESTS
// =============================================================================
