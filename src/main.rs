//! Arena Duel Demo
//!
//! Runs a scripted duel end to end: drop-in, briefing, live play with
//! synthetic inputs until somebody wins, then a rematch round. Logs the
//! interesting events and prints a JSON snapshot of the final state.

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use arena_duel::game::events::GameEventData;
use arena_duel::game::state::RoundPhase;
use arena_duel::render::draw_frame;
use arena_duel::{GameConfig, GameController, InputFrame, TICK_RATE, VERSION};

/// Safety cap so a stalemate script cannot loop forever.
const MAX_DEMO_TICKS: u32 = 60 * TICK_RATE;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Arena Duel v{}", VERSION);
    info!("Tick rate: {} Hz", TICK_RATE);

    let config = GameConfig::default();
    let mut controller =
        GameController::new(config, 12345).context("invalid gameplay configuration")?;

    controller.start("Ada", "Grace");
    run_round(&mut controller)?;

    info!("=== Rematch ===");
    controller.play_again();
    run_round(&mut controller)?;

    let snapshot =
        serde_json::to_string_pretty(controller.state()).context("serializing final state")?;
    println!("{snapshot}");

    Ok(())
}

/// Drive one round to its decision with scripted inputs.
fn run_round(controller: &mut GameController) -> Result<()> {
    let mut total_events = 0usize;

    for step in 0..MAX_DEMO_TICKS {
        let inputs = scripted_inputs(controller, step);
        let result = controller.frame(&inputs);
        total_events += result.events.len();

        for event in &result.events {
            match &event.data {
                GameEventData::BulletHit { slot, damage } => {
                    info!(?slot, damage, tick = event.tick, "hit");
                }
                GameEventData::ShieldBroken { slot } => {
                    info!(?slot, tick = event.tick, "shield broken");
                }
                GameEventData::PowerUpCollected { slot, kind } => {
                    info!(?slot, ?kind, tick = event.tick, "power-up collected");
                }
                GameEventData::TrapSprung { slot, damage } => {
                    info!(?slot, damage, tick = event.tick, "trap sprung");
                }
                GameEventData::RoundEnded { outcome } => {
                    info!(?outcome, tick = event.tick, "round over");
                }
                _ => {}
            }
        }

        if result.round_over {
            match controller.winner_name() {
                Some(name) => info!("{name} wins after {} events", total_events),
                None => info!("draw after {} events", total_events),
            }
            let display_list = draw_frame(controller.state(), controller.config());
            info!("final frame: {} draw commands", display_list.len());
            return Ok(());
        }
    }

    anyhow::bail!("demo round did not finish within {MAX_DEMO_TICKS} ticks")
}

/// Synthetic keyboard: both fighters close in on the same row and trade
/// fire; player two shields periodically, player one dashes when able.
fn scripted_inputs(controller: &GameController, step: u32) -> [InputFrame; 2] {
    if controller.state().phase != RoundPhase::Playing {
        return [InputFrame::new(), InputFrame::new()];
    }

    let mut one = InputFrame::new();
    let mut two = InputFrame::new();

    // Player one advances and fires in bursts
    if step % 4 != 0 {
        one = InputFrame::with_held(false, false, false, true);
    }
    if step % 7 == 0 {
        one = one.pressing(InputFrame::BTN_FIRE);
    }
    if step % 240 == 0 {
        one = one.pressing(InputFrame::BTN_DASH);
    }

    // Player two strafes, shields, and returns fire
    if step % 3 != 0 {
        two = InputFrame::with_held(step % 120 < 60, step % 120 >= 60, true, false);
    }
    if step % 11 == 0 {
        two = two.pressing(InputFrame::BTN_FIRE);
    }
    if step % 360 == 0 {
        two = two.pressing(InputFrame::BTN_SHIELD);
    }

    [one, two]
}
