//! Trap Spawning and Contact Damage
//!
//! Hazards follow the same schedule-spawn/poll-expiry shape as power-ups but
//! hurt instead of help: the first player to step on one takes its damage,
//! exactly once, and the trap is gone.

use tracing::debug;

use crate::game::collision::player_touches_trap;
use crate::game::config::GameConfig;
use crate::game::events::{GameEvent, GameEventData};
use crate::game::state::{GameState, PlayerSlot, Trap};

/// Spawn a trap if the schedule says so, and re-arm the schedule.
pub fn maybe_spawn_trap(state: &mut GameState, config: &GameConfig) {
    if state.tick < state.next_trap_tick {
        return;
    }
    state.next_trap_tick = state.tick + config.trap_interval_ticks;
    spawn_trap(state, config);
}

/// Place one trap at a random non-HUD position.
pub fn spawn_trap(state: &mut GameState, config: &GameConfig) {
    let (w, h) = (config.trap_size, config.trap_size);
    let x = state.rng.next_f32_range(0.0, config.width - w);
    let y = state.rng.next_f32_range(config.spawn_top, config.height - h);

    debug!(x, y, tick = state.tick, "trap spawned");
    state.traps.push(Trap {
        x,
        y,
        w,
        h,
        damage: config.trap_damage,
        expires_at: state.tick + config.trap_lifetime_ticks,
    });
    let tick = state.tick;
    state.push_event(GameEvent::new(tick, GameEventData::TrapSpawned));
}

/// Expire timed-out traps, then spring the rest on any player standing
/// on them. Expiry is checked first; a sprung trap deals its damage once
/// and is removed.
pub fn update_traps(state: &mut GameState, _config: &GameConfig) {
    let tick = state.tick;
    let traps = std::mem::take(&mut state.traps);
    let mut kept = Vec::with_capacity(traps.len());

    for trap in traps {
        if tick >= trap.expires_at {
            state.push_event(GameEvent::new(tick, GameEventData::TrapExpired));
            continue;
        }

        let victim = PlayerSlot::BOTH
            .into_iter()
            .find(|slot| player_touches_trap(state.player(*slot), &trap));

        match victim {
            Some(slot) => {
                state.player_mut(slot).take_damage(trap.damage);
                debug!(?slot, damage = trap.damage, tick, "trap sprung");
                state.push_event(GameEvent::new(
                    tick,
                    GameEventData::TrapSprung {
                        slot,
                        damage: trap.damage,
                    },
                ));
            }
            None => kept.push(trap),
        }
    }

    state.traps = kept;
}
