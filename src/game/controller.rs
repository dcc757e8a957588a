//! Game Lifecycle Controller
//!
//! The embedder's entry point: owns the state and the tuning, exposes the
//! lifecycle transitions (start, pause, replay, restart) and the per-frame
//! step. Every transition is valid only from specific phases; calls from any
//! other phase are silent no-ops, so UI glue never needs to pre-check.

use tracing::info;

use crate::game::config::{ConfigError, GameConfig};
use crate::game::input::InputFrame;
use crate::game::state::{GameState, RoundPhase, DEFAULT_NAMES};
use crate::game::tick::{self, TickResult};

/// Owns one duel from menu to rematch.
#[derive(Debug)]
pub struct GameController {
    config: GameConfig,
    state: GameState,
    seed: u64,
}

impl GameController {
    /// Build a controller over a validated config. The duel starts idle;
    /// nothing simulates until [`start`](Self::start).
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = GameState::new(seed, &config);
        Ok(Self { config, state, seed })
    }

    /// Begin the round: names are taken (blanks fall back to the defaults),
    /// both fighters are parked above the field, and the drop-in starts.
    ///
    /// Valid only while idle. Returns whether the round actually started;
    /// the embedder kicks off its soundtrack on `true`.
    pub fn start(&mut self, p1: &str, p2: &str) -> bool {
        if self.state.phase != RoundPhase::Idle {
            return false;
        }
        let p1 = p1.trim();
        let p2 = p2.trim();
        self.state.names = [
            if p1.is_empty() { DEFAULT_NAMES[0] } else { p1 }.to_string(),
            if p2.is_empty() { DEFAULT_NAMES[1] } else { p2 }.to_string(),
        ];
        self.state.reset_round(&self.config);
        info!(p1 = %self.state.names[0], p2 = %self.state.names[1], "round started");
        true
    }

    /// Flip between playing and paused. Any other phase: no-op.
    ///
    /// Pausing freezes the tick counter, so every deadline in the state
    /// (boosts, shields, spawn schedules) holds its remaining time.
    pub fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            RoundPhase::Playing => RoundPhase::Paused,
            RoundPhase::Paused => RoundPhase::Playing,
            other => other,
        };
    }

    /// Rematch with the same names: bars refill, entities clear, and the
    /// drop-in runs again. Valid only once the round is over. The RNG stream
    /// continues, so the rematch sees different spawns.
    pub fn play_again(&mut self) {
        if !matches!(self.state.phase, RoundPhase::Over { .. }) {
            return;
        }
        info!("rematch");
        self.state.reset_round(&self.config);
    }

    /// Hard reset to the freshly constructed controller: idle phase, default
    /// names, the RNG rewound to the original seed. Valid from any phase.
    pub fn restart(&mut self) {
        info!("restart to menu");
        self.state = GameState::new(self.seed, &self.config);
    }

    /// Run one frame with this tick's sampled inputs.
    pub fn frame(&mut self, inputs: &[InputFrame; 2]) -> TickResult {
        tick::tick(&mut self.state, inputs, &self.config)
    }

    /// The live state, for the presentation layer.
    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The tuning in effect.
    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Winner's display name, once decided.
    #[inline]
    pub fn winner_name(&self) -> Option<&str> {
        self.state.winner_name()
    }

    /// Does a frame call currently advance the simulation?
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Frozen mid-round?
    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{PlayerSlot, RoundOutcome};

    const IDLE: [InputFrame; 2] = [InputFrame::new(), InputFrame::new()];

    fn controller() -> GameController {
        GameController::new(GameConfig::default(), 99).unwrap()
    }

    /// Drive the controller until live play begins.
    fn run_to_playing(ctl: &mut GameController) {
        for _ in 0..500 {
            ctl.frame(&IDLE);
            if ctl.state().phase == RoundPhase::Playing {
                return;
            }
        }
        panic!("never reached live play");
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig {
            bullet_speed: 0.0,
            ..GameConfig::default()
        };
        assert!(GameController::new(config, 1).is_err());
    }

    #[test]
    fn test_start_takes_names_with_fallback() {
        let mut ctl = controller();
        assert!(ctl.start("Ada", "  "));
        assert_eq!(ctl.state().names[0], "Ada");
        assert_eq!(ctl.state().names[1], "Player 2");
        assert_eq!(ctl.state().phase, RoundPhase::DropIn);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let mut ctl = controller();
        assert!(ctl.start("Ada", "Grace"));
        assert!(!ctl.start("Mallory", "Eve"));
        assert_eq!(ctl.state().names[0], "Ada");
    }

    #[test]
    fn test_pause_only_toggles_live_play() {
        let mut ctl = controller();

        // Idle: no-op
        ctl.toggle_pause();
        assert_eq!(ctl.state().phase, RoundPhase::Idle);

        ctl.start("", "");
        // Drop-in: no-op
        ctl.toggle_pause();
        assert_eq!(ctl.state().phase, RoundPhase::DropIn);

        run_to_playing(&mut ctl);
        ctl.toggle_pause();
        assert!(ctl.is_paused());

        let before = ctl.state().tick;
        ctl.frame(&IDLE);
        assert_eq!(ctl.state().tick, before);

        ctl.toggle_pause();
        assert!(!ctl.is_paused());
        ctl.frame(&IDLE);
        assert_eq!(ctl.state().tick, before + 1);
    }

    #[test]
    fn test_play_again_only_after_round_over() {
        let mut ctl = controller();
        ctl.start("Ada", "Grace");
        run_to_playing(&mut ctl);

        // Mid-round: no-op
        ctl.play_again();
        assert_eq!(ctl.state().phase, RoundPhase::Playing);

        // Force a decision, then rematch
        ctl.state.player_mut(PlayerSlot::Two).health = 0;
        let result = ctl.frame(&IDLE);
        assert_eq!(result.outcome, Some(RoundOutcome::Winner(PlayerSlot::One)));
        assert_eq!(ctl.winner_name(), Some("Ada"));

        ctl.play_again();
        assert_eq!(ctl.state().phase, RoundPhase::DropIn);
        assert_eq!(ctl.state().player(PlayerSlot::Two).health, 100);
        // Names survive the rematch
        assert_eq!(ctl.state().names[1], "Grace");
    }

    #[test]
    fn test_restart_rewinds_everything() {
        let mut ctl = controller();
        ctl.start("Ada", "Grace");
        run_to_playing(&mut ctl);
        let tick_before = ctl.state().tick;
        assert!(tick_before > 0);

        ctl.restart();
        assert_eq!(ctl.state().phase, RoundPhase::Idle);
        assert_eq!(ctl.state().tick, 0);
        assert_eq!(ctl.state().names[0], "Player 1");

        // The RNG is rewound too: starting again replays the same spawns
        let mut fresh = controller();
        assert_eq!(ctl.state().rng.state(), fresh.state().rng.state());
        fresh.start("x", "y");
        assert!(ctl.start("x", "y"));
    }

    #[test]
    fn test_rematch_continues_rng_stream() {
        let mut ctl = controller();
        ctl.start("", "");
        let stream_start = ctl.state().rng.state();
        run_to_playing(&mut ctl);

        // Run past one power-up spawn so the stream advances
        for _ in 0..ctl.config().powerup_interval_ticks + 1 {
            ctl.frame(&IDLE);
        }
        ctl.state.player_mut(PlayerSlot::One).health = 0;
        ctl.frame(&IDLE);

        ctl.play_again();
        assert_ne!(ctl.state().rng.state(), stream_start);
    }
}
