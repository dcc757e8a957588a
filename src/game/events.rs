//! Game Events
//!
//! Events generated during simulation. The presentation layer turns some of
//! them into sound triggers; the demo binary logs them.

use serde::{Deserialize, Serialize};

use crate::game::state::{DamageClass, PlayerSlot, PowerUpKind, RoundOutcome};

/// Discrete playback triggers the embedder wires to audio elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    /// A bullet left the barrel
    Shoot,
    /// A bullet damaged health
    Hit,
    /// A shield reached exactly zero
    ShieldBreak,
    /// Continuous background track, started once per round
    Music,
}

/// Game event data.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A player fired a bullet
    BulletFired {
        /// Firer
        slot: PlayerSlot,
        /// Damage class snapshotted at fire time
        class: DamageClass,
    },

    /// A bullet damaged a player's health
    BulletHit {
        /// Victim
        slot: PlayerSlot,
        /// Health removed
        damage: i32,
    },

    /// A raised shield soaked a hit
    ShieldAbsorbed {
        /// Defender
        slot: PlayerSlot,
        /// Charge left afterwards
        remaining: i32,
    },

    /// A shield reached exactly zero and dropped
    ShieldBroken {
        /// Defender
        slot: PlayerSlot,
    },

    /// An explosive bullet landed
    ExplosionSpawned {
        /// Impact x
        x: f32,
        /// Impact y
        y: f32,
    },

    /// A player raised their shield
    ShieldRaised {
        /// Defender
        slot: PlayerSlot,
    },

    /// A player dashed
    Dashed {
        /// Dasher
        slot: PlayerSlot,
    },

    /// A pickup appeared
    PowerUpSpawned {
        /// What it grants
        kind: PowerUpKind,
    },

    /// A pickup was consumed
    PowerUpCollected {
        /// Collector
        slot: PlayerSlot,
        /// What was granted
        kind: PowerUpKind,
    },

    /// A pickup timed out unclaimed
    PowerUpExpired {
        /// What it would have granted
        kind: PowerUpKind,
    },

    /// A hazard appeared
    TrapSpawned,

    /// A player stepped on a hazard
    TrapSprung {
        /// Victim
        slot: PlayerSlot,
        /// Health removed
        damage: i32,
    },

    /// A hazard timed out untriggered
    TrapExpired,

    /// The round was decided
    RoundEnded {
        /// Final outcome
        outcome: RoundOutcome,
    },
}

/// A game event with the tick it occurred on.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Tick when the event occurred
    pub tick: u32,
    /// Event data
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(tick: u32, data: GameEventData) -> Self {
        Self { tick, data }
    }

    /// Sound this event triggers, if any.
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self.data {
            GameEventData::BulletFired { .. } => Some(SoundCue::Shoot),
            GameEventData::BulletHit { .. } => Some(SoundCue::Hit),
            GameEventData::ShieldBroken { .. } => Some(SoundCue::ShieldBreak),
            _ => None,
        }
    }
}
