//! Game State Definitions
//!
//! All state for one duel: two players, the live entity collections, the
//! round phase machine, and the seeded RNG. Entity collections are unordered;
//! removal is always filter-and-rebuild (`retain`), never index splicing.

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::core::rng::DeterministicRng;
use crate::game::config::GameConfig;
use crate::game::events::GameEvent;

/// Health and shield are percentages clamped to this ceiling.
pub const MAX_STAT: i32 = 100;

// =============================================================================
// PLAYER SLOT
// =============================================================================

/// Which of the two fighters a value belongs to.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[repr(u8)]
pub enum PlayerSlot {
    /// Left fighter (blue)
    #[default]
    One = 0,
    /// Right fighter (red)
    Two = 1,
}

impl PlayerSlot {
    /// Both slots, in resolution order. Player one is always checked first
    /// when both could claim the same pickup in one frame.
    pub const BOTH: [PlayerSlot; 2] = [PlayerSlot::One, PlayerSlot::Two];

    /// The other fighter.
    #[inline]
    pub fn opponent(self) -> PlayerSlot {
        match self {
            PlayerSlot::One => PlayerSlot::Two,
            PlayerSlot::Two => PlayerSlot::One,
        }
    }

    /// Index into per-player arrays.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

// =============================================================================
// FACING
// =============================================================================

/// Last movement direction; bullets and dashes inherit it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum Facing {
    /// Toward the top edge
    Up,
    /// Toward the bottom edge
    Down,
    /// Toward the left edge
    Left,
    /// Toward the right edge
    Right,
}

impl Facing {
    /// Unit delta in screen coordinates (y grows downward).
    #[inline]
    pub fn delta(self) -> (f32, f32) {
        match self {
            Facing::Up => (0.0, -1.0),
            Facing::Down => (0.0, 1.0),
            Facing::Left => (-1.0, 0.0),
            Facing::Right => (1.0, 0.0),
        }
    }
}

// =============================================================================
// PLAYER STATE
// =============================================================================

/// One fighter. Created once per duel, reset (not recreated) on replay.
///
/// Timed abilities are single tick deadlines overwritten on re-trigger, so a
/// boost collected mid-boost restarts its full window and nothing fires while
/// the round is paused.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerState {
    /// Which slot this fighter occupies
    pub slot: PlayerSlot,
    /// Left edge in playfield pixels
    pub x: f32,
    /// Top edge in playfield pixels
    pub y: f32,
    /// Square edge length
    pub size: f32,
    /// Current health, clamped to [0, 100]
    pub health: i32,
    /// Current shield charge, clamped to [0, 100]
    pub shield: i32,
    /// Last movement direction
    pub facing: Facing,
    /// Fire latch: closes on fire, re-opens when the button is released
    pub can_shoot: bool,
    /// Tick the raised shield drops again, if raised
    pub shield_until: Option<u32>,
    /// Tick the speed boost expires, if active
    pub speed_until: Option<u32>,
    /// Tick the explosive-damage boost expires, if active
    pub explosive_until: Option<u32>,
    /// First tick the dash is available again
    pub dash_ready_tick: u32,
}

impl PlayerState {
    /// Create a fighter at its spawn column.
    pub fn new(slot: PlayerSlot, x: f32, y: f32, size: f32, facing: Facing) -> Self {
        Self {
            slot,
            x,
            y,
            size,
            health: MAX_STAT,
            shield: MAX_STAT,
            facing,
            can_shoot: true,
            shield_until: None,
            speed_until: None,
            explosive_until: None,
            dash_ready_tick: 0,
        }
    }

    /// Bounding box for collision tests.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.x, self.y, self.size)
    }

    /// Is the shield currently raised?
    #[inline]
    pub fn shield_active(&self) -> bool {
        self.shield_until.is_some()
    }

    /// Is the speed boost active?
    #[inline]
    pub fn speed_active(&self) -> bool {
        self.speed_until.is_some()
    }

    /// Is the explosive-damage boost active?
    #[inline]
    pub fn explosive_active(&self) -> bool {
        self.explosive_until.is_some()
    }

    /// May the player dash this tick?
    #[inline]
    pub fn can_dash(&self, tick: u32) -> bool {
        tick >= self.dash_ready_tick
    }

    /// Movement speed for this tick.
    #[inline]
    pub fn current_speed(&self, config: &GameConfig) -> f32 {
        if self.speed_active() {
            config.base_speed * config.boost_multiplier
        } else {
            config.base_speed
        }
    }

    /// Drop every timed effect whose deadline has passed.
    ///
    /// Called at the top of each simulated tick; this is the poll-model
    /// replacement for one-shot reversion timers.
    pub fn expire_effects(&mut self, tick: u32) {
        if self.shield_until.is_some_and(|t| tick >= t) {
            self.shield_until = None;
        }
        if self.speed_until.is_some_and(|t| tick >= t) {
            self.speed_until = None;
        }
        if self.explosive_until.is_some_and(|t| tick >= t) {
            self.explosive_until = None;
        }
    }

    /// Reduce health, floored at zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount).clamp(0, MAX_STAT);
    }

    /// Restore health, capped at 100.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).clamp(0, MAX_STAT);
    }

    /// Add shield charge, capped at 100.
    pub fn charge_shield(&mut self, amount: i32) {
        self.shield = (self.shield + amount).clamp(0, MAX_STAT);
    }

    /// Absorb one hit with the raised shield.
    ///
    /// Removes `cost` charge, floored at zero. Hitting exactly zero breaks
    /// the shield: it drops immediately and the caller gets `true`.
    pub fn absorb_hit(&mut self, cost: i32) -> bool {
        self.shield = (self.shield - cost).clamp(0, MAX_STAT);
        if self.shield == 0 {
            self.shield_until = None;
            true
        } else {
            false
        }
    }

    /// Is the fighter out of the round?
    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Reset for a fresh round: full bars, latches open, effects cleared.
    /// Position is parked above the field for the drop-in.
    pub fn reset_for_round(&mut self, x: f32, facing: Facing) {
        self.x = x;
        self.y = -self.size;
        self.health = MAX_STAT;
        self.shield = MAX_STAT;
        self.facing = facing;
        self.can_shoot = true;
        self.shield_until = None;
        self.speed_until = None;
        self.explosive_until = None;
        self.dash_ready_tick = 0;
    }
}

// =============================================================================
// BULLETS
// =============================================================================

/// Damage class, snapshotted from the firer's boost state at fire time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum DamageClass {
    /// Plain shot
    Normal,
    /// Double damage, spawns an explosion on impact
    Explosive,
}

impl DamageClass {
    /// Health damage dealt on an unshielded hit.
    #[inline]
    pub fn damage(self, config: &GameConfig) -> i32 {
        match self {
            DamageClass::Normal => config.normal_damage,
            DamageClass::Explosive => config.explosive_damage,
        }
    }
}

/// A projectile in flight. Direction and class are fixed for its lifetime.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Bullet {
    /// Center x
    pub x: f32,
    /// Center y
    pub y: f32,
    /// Travel direction
    pub facing: Facing,
    /// Who fired it; never hits its own owner
    pub owner: PlayerSlot,
    /// Damage class at fire time
    pub class: DamageClass,
}

impl Bullet {
    /// Move one tick along the fixed direction.
    pub fn advance(&mut self, speed: f32) {
        let (dx, dy) = self.facing.delta();
        self.x += dx * speed;
        self.y += dy * speed;
    }

    /// Still inside the playfield?
    #[inline]
    pub fn in_bounds(&self, config: &GameConfig) -> bool {
        self.x >= 0.0 && self.x <= config.width && self.y >= 0.0 && self.y <= config.height
    }
}

// =============================================================================
// PICKUPS & HAZARDS
// =============================================================================

/// What a power-up grants on pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum PowerUpKind {
    /// +20 health
    Health,
    /// +20 shield charge
    Shield,
    /// 1.5x movement for 5 seconds
    Speed,
    /// Double bullet damage for 5 seconds
    Explosive,
}

impl PowerUpKind {
    /// All kinds, for uniform random spawns.
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Health,
        PowerUpKind::Shield,
        PowerUpKind::Speed,
        PowerUpKind::Explosive,
    ];

    /// HUD label drawn on the pickup box.
    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::Health => "Health +20",
            PowerUpKind::Shield => "Shield +20",
            PowerUpKind::Speed => "Speed Boost",
            PowerUpKind::Explosive => "Double Damage",
        }
    }
}

/// A timed pickup. First player to touch it (slot order breaks ties) wins it.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PowerUp {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Square edge length
    pub size: f32,
    /// Effect granted on pickup
    pub kind: PowerUpKind,
    /// Tick this pickup vanishes unclaimed
    pub expires_at: u32,
}

impl PowerUp {
    /// Bounding box; pickups are squares described by a single size.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::square(self.x, self.y, self.size)
    }
}

/// A floor hazard. Deals its damage once on first contact, then vanishes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Trap {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub w: f32,
    /// Height
    pub h: f32,
    /// Contact damage
    pub damage: i32,
    /// Tick this trap vanishes untriggered
    pub expires_at: u32,
}

impl Trap {
    /// Bounding box for contact tests.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Purely visual blast left by an explosive bullet.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Explosion {
    /// Center x
    pub x: f32,
    /// Center y
    pub y: f32,
    /// Current radius, grows to a cap
    pub radius: f32,
    /// Current opacity, removed at zero
    pub alpha: f32,
}

// =============================================================================
// ROUND PHASE
// =============================================================================

/// How the round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// One fighter outlasted the other.
    Winner(PlayerSlot),
    /// Both reached zero health in the same frame.
    Draw,
}

/// Lifecycle phase of the duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundPhase {
    /// Constructed but not started
    #[default]
    Idle,
    /// Players falling into their starting positions
    DropIn,
    /// Instructional pause before control is handed over
    Briefing {
        /// First tick of actual play
        until: u32,
    },
    /// Live simulation
    Playing,
    /// Frozen mid-round; no tick advances
    Paused,
    /// Round decided
    Over {
        /// Who won, or a draw
        outcome: RoundOutcome,
    },
}

// =============================================================================
// GAME STATE
// =============================================================================

/// Complete state of a duel.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Current tick; advances only while the round simulates
    pub tick: u32,
    /// Lifecycle phase
    pub phase: RoundPhase,
    /// RNG seed the duel was created with (for replay)
    pub rng_seed: u64,
    /// Deterministic RNG for spawns
    pub rng: DeterministicRng,
    /// Both fighters, indexed by [`PlayerSlot`]
    pub players: [PlayerState; 2],
    /// Display names, indexed by [`PlayerSlot`]
    pub names: [String; 2],
    /// Live projectiles
    pub bullets: Vec<Bullet>,
    /// Live pickups
    pub power_ups: Vec<PowerUp>,
    /// Live hazards
    pub traps: Vec<Trap>,
    /// Live blast animations
    pub explosions: Vec<Explosion>,
    /// Tick of the next scheduled power-up spawn
    pub next_powerup_tick: u32,
    /// Tick of the next scheduled trap spawn
    pub next_trap_tick: u32,
    /// Events generated this tick (cleared each tick)
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

/// Fallback display names when the embedder passes blanks.
pub const DEFAULT_NAMES: [&str; 2] = ["Player 1", "Player 2"];

impl GameState {
    /// Create a fresh duel in the idle phase.
    pub fn new(rng_seed: u64, config: &GameConfig) -> Self {
        // Pre-drop columns; the drop-in snaps players to the start columns.
        let size = config.player_size;
        let players = [
            PlayerState::new(PlayerSlot::One, 100.0, 0.0, size, Facing::Right),
            PlayerState::new(PlayerSlot::Two, config.width - 200.0, 0.0, size, Facing::Left),
        ];

        Self {
            tick: 0,
            phase: RoundPhase::Idle,
            rng_seed,
            rng: DeterministicRng::new(rng_seed),
            players,
            names: [DEFAULT_NAMES[0].to_string(), DEFAULT_NAMES[1].to_string()],
            bullets: Vec::new(),
            power_ups: Vec::new(),
            traps: Vec::new(),
            explosions: Vec::new(),
            next_powerup_tick: config.powerup_interval_ticks,
            next_trap_tick: config.trap_interval_ticks,
            pending_events: Vec::new(),
        }
    }

    /// Borrow one fighter.
    #[inline]
    pub fn player(&self, slot: PlayerSlot) -> &PlayerState {
        &self.players[slot.index()]
    }

    /// Borrow one fighter mutably.
    #[inline]
    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut PlayerState {
        &mut self.players[slot.index()]
    }

    /// Is a tick going to do anything?
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(
            self.phase,
            RoundPhase::DropIn | RoundPhase::Briefing { .. } | RoundPhase::Playing
        )
    }

    /// Frozen mid-round?
    #[inline]
    pub fn is_paused(&self) -> bool {
        matches!(self.phase, RoundPhase::Paused)
    }

    /// Winner's display name, if the round is over with a winner.
    pub fn winner_name(&self) -> Option<&str> {
        match self.phase {
            RoundPhase::Over {
                outcome: RoundOutcome::Winner(slot),
            } => Some(&self.names[slot.index()]),
            _ => None,
        }
    }

    /// Clear entities and bars and park both players above the field,
    /// ready for the drop-in. Names and the RNG stream are kept.
    pub fn reset_round(&mut self, config: &GameConfig) {
        self.players[0].reset_for_round(100.0, Facing::Right);
        self.players[1].reset_for_round(config.width - 200.0, Facing::Left);
        self.bullets.clear();
        self.power_ups.clear();
        self.traps.clear();
        self.explosions.clear();
        self.pending_events.clear();
        self.phase = RoundPhase::DropIn;
    }

    /// Arm the periodic spawn schedules relative to the current tick.
    pub fn arm_spawn_timers(&mut self, config: &GameConfig) {
        self.next_powerup_tick = self.tick + config.powerup_interval_ticks;
        self.next_trap_tick = self.tick + config.trap_interval_ticks;
    }

    /// Push a game event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// =============================================================================
// TESTS
// =============================================================================
