//! Gameplay Tuning
//!
//! Every tunable number in one place, separate from runtime wiring.
//! All durations are whole ticks at 60 Hz.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ms_to_ticks;

/// A configuration value that cannot describe a playable round.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Playfield too small for the players plus the reserved HUD band.
    #[error("playfield {width}x{height} cannot fit two {player_size}px players below the {hud_height}px HUD band")]
    PlayfieldTooSmall {
        /// Configured playfield width
        width: f32,
        /// Configured playfield height
        height: f32,
        /// Player square edge
        player_size: f32,
        /// Reserved top band height
        hud_height: f32,
    },

    /// A speed or distance field is zero or negative.
    #[error("{field} must be positive (got {value})")]
    NonPositive {
        /// Offending field name
        field: &'static str,
        /// Offending value
        value: f32,
    },

    /// The entity spawn margin lies inside the HUD band.
    #[error("spawn margin {spawn_top}px must not be above the HUD band ({hud_height}px)")]
    SpawnInsideHud {
        /// Configured spawn top margin
        spawn_top: f32,
        /// Reserved top band height
        hud_height: f32,
    },
}

/// Complete gameplay tuning for a duel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Playfield width in pixels
    pub width: f32,
    /// Playfield height in pixels
    pub height: f32,
    /// Reserved top band for the HUD; players and entities stay below it
    pub hud_height: f32,
    /// Top margin for random entity spawns (at or below the HUD band)
    pub spawn_top: f32,

    /// Player square edge in pixels
    pub player_size: f32,
    /// Base movement speed in pixels per tick
    pub base_speed: f32,
    /// Movement multiplier while the speed boost is active
    pub boost_multiplier: f32,
    /// Horizontal inset of the starting columns after the drop-in
    pub start_inset: f32,
    /// Vertical fall rate of the drop-in animation, pixels per tick
    pub drop_speed: f32,
    /// Gap between the landed players and the bottom edge
    pub drop_floor_gap: f32,
    /// Length of the instructional pause after the drop-in, in ticks
    pub briefing_ticks: u32,

    /// Bullet travel speed in pixels per tick
    pub bullet_speed: f32,
    /// Damage of a normal bullet
    pub normal_damage: i32,
    /// Damage of an explosive bullet
    pub explosive_damage: i32,
    /// Shield points removed per absorbed hit
    pub shield_hit_cost: i32,

    /// Instantaneous dash distance in pixels
    pub dash_distance: f32,
    /// Ticks before a player may dash again
    pub dash_cooldown_ticks: u32,
    /// Ticks the shield stays raised once activated
    pub shield_ticks: u32,
    /// Ticks a speed or explosive boost lasts
    pub boost_ticks: u32,

    /// Power-up square edge in pixels
    pub powerup_size: f32,
    /// Health/shield restored by the corresponding pickups
    pub powerup_restore: i32,
    /// Ticks between power-up spawns
    pub powerup_interval_ticks: u32,
    /// Ticks an unclaimed power-up stays on the field
    pub powerup_lifetime_ticks: u32,

    /// Trap edge in pixels
    pub trap_size: f32,
    /// Damage dealt on trap contact
    pub trap_damage: i32,
    /// Ticks between trap spawns
    pub trap_interval_ticks: u32,
    /// Ticks an untriggered trap stays on the field
    pub trap_lifetime_ticks: u32,

    /// Starting explosion radius in pixels
    pub explosion_radius: f32,
    /// Radius cap for explosion growth
    pub explosion_max_radius: f32,
    /// Radius growth per tick
    pub explosion_expansion: f32,
    /// Opacity decay per tick
    pub explosion_fade: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            hud_height: 140.0,
            spawn_top: 150.0,

            player_size: 60.0,
            base_speed: 7.0,
            boost_multiplier: 1.5,
            start_inset: 50.0,
            drop_speed: 5.0,
            drop_floor_gap: 50.0,
            briefing_ticks: ms_to_ticks(2000),

            bullet_speed: 10.0,
            normal_damage: 10,
            explosive_damage: 20,
            shield_hit_cost: 10,

            dash_distance: 100.0,
            dash_cooldown_ticks: ms_to_ticks(2000),
            shield_ticks: ms_to_ticks(3000),
            boost_ticks: ms_to_ticks(5000),

            powerup_size: 30.0,
            powerup_restore: 20,
            powerup_interval_ticks: ms_to_ticks(10_000),
            powerup_lifetime_ticks: ms_to_ticks(5000),

            trap_size: 50.0,
            trap_damage: 5,
            trap_interval_ticks: ms_to_ticks(15_000),
            trap_lifetime_ticks: ms_to_ticks(10_000),

            explosion_radius: 10.0,
            explosion_max_radius: 50.0,
            explosion_expansion: 2.0,
            explosion_fade: 0.05,
        }
    }
}

impl GameConfig {
    /// Check that the tuning describes a playable round.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("base_speed", self.base_speed),
            ("bullet_speed", self.bullet_speed),
            ("dash_distance", self.dash_distance),
            ("player_size", self.player_size),
            ("drop_speed", self.drop_speed),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        // Two players side by side below the HUD band
        if self.width < self.player_size * 2.0
            || self.height < self.hud_height + self.player_size
        {
            return Err(ConfigError::PlayfieldTooSmall {
                width: self.width,
                height: self.height,
                player_size: self.player_size,
                hud_height: self.hud_height,
            });
        }

        if self.spawn_top < self.hud_height {
            return Err(ConfigError::SpawnInsideHud {
                spawn_top: self.spawn_top,
                hud_height: self.hud_height,
            });
        }

        Ok(())
    }

    /// Resting y coordinate of a landed player.
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.height - self.player_size - self.drop_floor_gap
    }

    /// Starting x columns for the left and right player.
    #[inline]
    pub fn start_columns(&self) -> (f32, f32) {
        (
            self.start_inset,
            self.width - self.player_size - self.start_inset,
        )
    }
}
