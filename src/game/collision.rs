//! Collision Resolution Helpers
//!
//! Thin, simulation-specific layer over [`Rect`]: the player separation
//! margin, bullet point tests, and pickup overlap checks.

use crate::core::rect::Rect;
use crate::game::state::{Bullet, PlayerState, PowerUp, Trap};

/// Padding applied to player-vs-player tests so the squares never visually
/// touch while moving.
pub const PLAYER_SEPARATION_MARGIN: f32 = 5.0;

/// Do the two fighters stand too close (within the separation margin)?
#[inline]
pub fn players_collide(a: &PlayerState, b: &PlayerState) -> bool {
    a.bounds().overlaps(&b.bounds(), PLAYER_SEPARATION_MARGIN)
}

/// Does this bullet hit this player?
///
/// Point-in-box with no margin; the test never fires for the bullet's owner
/// (a bullet cannot hit the fighter who shot it).
#[inline]
pub fn bullet_hits_player(bullet: &Bullet, player: &PlayerState) -> bool {
    bullet.owner != player.slot && player.bounds().contains_point(bullet.x, bullet.y)
}

/// Does this player touch this pickup?
#[inline]
pub fn player_touches_powerup(player: &PlayerState, powerup: &PowerUp) -> bool {
    player.bounds().overlaps(&powerup.bounds(), 0.0)
}

/// Does this player stand on this hazard?
///
/// Traps use the padded test, same as player separation.
#[inline]
pub fn player_touches_trap(player: &PlayerState, trap: &Trap) -> bool {
    trap.bounds().overlaps(&player.bounds(), PLAYER_SEPARATION_MARGIN)
}
