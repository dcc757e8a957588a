//! Power-Up Spawning and Effects
//!
//! Pickups appear on a fixed schedule at random positions below the HUD
//! band, live for a fixed window, and are consumed by the first player to
//! touch them (player one is checked first when both overlap in one frame).

use tracing::debug;

use crate::game::config::GameConfig;
use crate::game::collision::player_touches_powerup;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::state::{GameState, PlayerSlot, PowerUp, PowerUpKind};

/// Spawn a power-up if the schedule says so, and re-arm the schedule.
pub fn maybe_spawn_power_up(state: &mut GameState, config: &GameConfig) {
    if state.tick < state.next_powerup_tick {
        return;
    }
    state.next_powerup_tick = state.tick + config.powerup_interval_ticks;
    spawn_power_up(state, config);
}

/// Place one power-up of a random kind at a random non-HUD position.
pub fn spawn_power_up(state: &mut GameState, config: &GameConfig) {
    let kind = *state
        .rng
        .choose(&PowerUpKind::ALL)
        .unwrap_or(&PowerUpKind::Health);
    let size = config.powerup_size;
    let x = state.rng.next_f32_range(0.0, config.width - size);
    let y = state
        .rng
        .next_f32_range(config.spawn_top, config.height - size);

    debug!(?kind, x, y, tick = state.tick, "power-up spawned");
    state.power_ups.push(PowerUp {
        x,
        y,
        size,
        kind,
        expires_at: state.tick + config.powerup_lifetime_ticks,
    });
    let tick = state.tick;
    state.push_event(GameEvent::new(tick, GameEventData::PowerUpSpawned { kind }));
}

/// Expire timed-out pickups, then hand the rest to any overlapping player.
///
/// Expiry is checked first: a pickup at its deadline is gone even if a
/// player stands on it this frame.
pub fn update_power_ups(state: &mut GameState, config: &GameConfig) {
    let tick = state.tick;
    let power_ups = std::mem::take(&mut state.power_ups);
    let mut kept = Vec::with_capacity(power_ups.len());

    for powerup in power_ups {
        if tick >= powerup.expires_at {
            state.push_event(GameEvent::new(
                tick,
                GameEventData::PowerUpExpired { kind: powerup.kind },
            ));
            continue;
        }

        let collector = PlayerSlot::BOTH
            .into_iter()
            .find(|slot| player_touches_powerup(state.player(*slot), &powerup));

        match collector {
            Some(slot) => {
                apply_power_up(state, slot, powerup.kind, config);
                state.push_event(GameEvent::new(
                    tick,
                    GameEventData::PowerUpCollected {
                        slot,
                        kind: powerup.kind,
                    },
                ));
            }
            None => kept.push(powerup),
        }
    }

    state.power_ups = kept;
}

/// Grant a pickup's effect to a player.
///
/// Boosts overwrite any deadline already running: re-collecting mid-boost
/// restarts the full window.
pub fn apply_power_up(
    state: &mut GameState,
    slot: PlayerSlot,
    kind: PowerUpKind,
    config: &GameConfig,
) {
    let tick = state.tick;
    let boost_until = tick + config.boost_ticks;
    let restore = config.powerup_restore;
    let player = state.player_mut(slot);

    match kind {
        PowerUpKind::Health => player.heal(restore),
        PowerUpKind::Shield => player.charge_shield(restore),
        PowerUpKind::Speed => player.speed_until = Some(boost_until),
        PowerUpKind::Explosive => player.explosive_until = Some(boost_until),
    }
    debug!(?slot, ?kind, tick, "power-up collected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::events::GameEventData;

    fn playing_state() -> (GameState, GameConfig) {
        let config = GameConfig::default();
        let mut state = GameState::new(12345, &config);
        state.phase = crate::game::state::RoundPhase::Playing;
        (state, config)
    }

    fn powerup_at(x: f32, y: f32, kind: PowerUpKind, expires_at: u32) -> PowerUp {
        PowerUp { x, y, size: 30.0, kind, expires_at }
    }

    #[test]
    fn test_spawn_stays_below_hud() {
        let (mut state, config) = playing_state();

        for _ in 0..100 {
            spawn_power_up(&mut state, &config);
        }
        for powerup in &state.power_ups {
            assert!(powerup.y >= config.spawn_top);
            assert!(powerup.y + powerup.size <= config.height);
            assert!(powerup.x >= 0.0);
            assert!(powerup.x + powerup.size <= config.width);
        }
    }

    #[test]
    fn test_spawn_determinism() {
        let config = GameConfig::default();
        let mut state1 = GameState::new(777, &config);
        let mut state2 = GameState::new(777, &config);

        for _ in 0..10 {
            spawn_power_up(&mut state1, &config);
            spawn_power_up(&mut state2, &config);
        }

        for (a, b) in state1.power_ups.iter().zip(&state2.power_ups) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
            assert_eq!(a.kind, b.kind);
        }
    }

    #[test]
    fn test_schedule_rearm() {
        let (mut state, config) = playing_state();
        state.tick = 600;
        state.next_powerup_tick = 600;

        maybe_spawn_power_up(&mut state, &config);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.next_powerup_tick, 600 + config.powerup_interval_ticks);

        // Not due again yet
        state.tick = 601;
        maybe_spawn_power_up(&mut state, &config);
        assert_eq!(state.power_ups.len(), 1);
    }

    #[test]
    fn test_expiry_beats_collision() {
        let (mut state, config) = playing_state();
        state.tick = 300;
        let player = state.player(PlayerSlot::One);
        let (px, py) = (player.x, player.y);
        // Expired pickup directly under player one
        state.power_ups.push(powerup_at(px, py, PowerUpKind::Health, 300));

        state.player_mut(PlayerSlot::One).health = 50;
        update_power_ups(&mut state, &config);

        assert!(state.power_ups.is_empty());
        assert_eq!(state.player(PlayerSlot::One).health, 50);
        assert!(state
            .pending_events
            .iter()
            .any(|e| matches!(e.data, GameEventData::PowerUpExpired { .. })));
    }

    #[test]
    fn test_first_player_wins_contested_pickup() {
        let (mut state, config) = playing_state();
        // Stack both players on the same pickup
        state.player_mut(PlayerSlot::One).x = 300.0;
        state.player_mut(PlayerSlot::One).y = 300.0;
        state.player_mut(PlayerSlot::Two).x = 310.0;
        state.player_mut(PlayerSlot::Two).y = 310.0;
        state.power_ups.push(powerup_at(305.0, 305.0, PowerUpKind::Speed, 1000));

        update_power_ups(&mut state, &config);

        assert!(state.power_ups.is_empty());
        assert!(state.player(PlayerSlot::One).speed_active());
        assert!(!state.player(PlayerSlot::Two).speed_active());
    }

    #[test]
    fn test_health_and_shield_cap() {
        let (mut state, config) = playing_state();
        state.player_mut(PlayerSlot::One).health = 95;
        state.player_mut(PlayerSlot::One).shield = 90;

        apply_power_up(&mut state, PlayerSlot::One, PowerUpKind::Health, &config);
        apply_power_up(&mut state, PlayerSlot::One, PowerUpKind::Shield, &config);

        assert_eq!(state.player(PlayerSlot::One).health, 100);
        assert_eq!(state.player(PlayerSlot::One).shield, 100);
    }

    #[test]
    fn test_boost_deadline_restarts_on_recollect() {
        let (mut state, config) = playing_state();
        state.tick = 100;
        apply_power_up(&mut state, PlayerSlot::Two, PowerUpKind::Explosive, &config);
        assert_eq!(
            state.player(PlayerSlot::Two).explosive_until,
            Some(100 + config.boost_ticks)
        );

        state.tick = 250;
        apply_power_up(&mut state, PlayerSlot::Two, PowerUpKind::Explosive, &config);
        assert_eq!(
            state.player(PlayerSlot::Two).explosive_until,
            Some(250 + config.boost_ticks)
        );
    }
}
