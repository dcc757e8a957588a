//! Presentation
//!
//! Read-only view of the simulation: [`draw_frame`] turns a state into a
//! display list the embedder rasterises however it likes. Colors are canvas
//! color strings. No drawing backend lives here and nothing in this module
//! mutates the state.

use crate::game::config::GameConfig;
use crate::game::state::{GameState, PlayerSlot, PowerUpKind, RoundOutcome, RoundPhase};
use crate::TICK_RATE;

/// HUD bar width in pixels.
const BAR_WIDTH: f32 = 200.0;
/// HUD bar height in pixels.
const BAR_HEIGHT: f32 = 30.0;
/// Vertical gap between the health and shield bars.
const BAR_GAP: f32 = 5.0;
/// HUD inset from the side edges.
const HUD_INSET: f32 = 20.0;
/// Drawn bullet radius.
const BULLET_RADIUS: f32 = 5.0;
/// Shield ring stroke width.
const RING_WIDTH: f32 = 5.0;

/// One drawing instruction. Coordinates are playfield pixels, y growing
/// downward.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Wipe the whole playfield
    Clear,
    /// Axis-aligned filled rectangle
    Rect {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        w: f32,
        /// Height
        h: f32,
        /// Fill color
        color: &'static str,
    },
    /// Filled circle with opacity
    Circle {
        /// Center x
        x: f32,
        /// Center y
        y: f32,
        /// Radius
        radius: f32,
        /// Fill color
        color: &'static str,
        /// Opacity in [0, 1]
        alpha: f32,
    },
    /// Unfilled circle outline
    Ring {
        /// Center x
        x: f32,
        /// Center y
        y: f32,
        /// Radius
        radius: f32,
        /// Stroke color
        color: &'static str,
        /// Stroke width
        width: f32,
    },
    /// Rounded meter with a two-stop horizontal gradient fill
    Bar {
        /// Left edge
        x: f32,
        /// Top edge
        y: f32,
        /// Width
        w: f32,
        /// Height
        h: f32,
        /// Filled portion in [0, 1]
        fraction: f32,
        /// Gradient stops, left to right
        stops: [&'static str; 2],
    },
    /// Centered text
    Text {
        /// Center x
        x: f32,
        /// Center y
        y: f32,
        /// The string to draw
        text: String,
        /// Text color
        color: &'static str,
        /// Point size
        size: f32,
    },
    /// Full-screen banner (pause, briefing, round end)
    Overlay {
        /// Banner text
        text: String,
    },
}

/// Fill color for a pickup box.
fn powerup_color(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::Health => "green",
        PowerUpKind::Shield => "cyan",
        PowerUpKind::Speed => "orange",
        PowerUpKind::Explosive => "purple",
    }
}

/// Fighter body color by slot.
fn player_color(slot: PlayerSlot) -> &'static str {
    match slot {
        PlayerSlot::One => "blue",
        PlayerSlot::Two => "red",
    }
}

/// Whole seconds left before `deadline`, rounded up.
fn seconds_left(deadline: u32, tick: u32) -> u32 {
    deadline.saturating_sub(tick).div_ceil(TICK_RATE)
}

/// Build the display list for one frame.
///
/// Draw order matters: traps under everything, then pickups with their
/// countdown labels, fighters with the shield ring, bullets, the HUD band,
/// explosions on top, and finally any phase overlay.
pub fn draw_frame(state: &GameState, config: &GameConfig) -> Vec<DrawCmd> {
    let mut cmds = vec![DrawCmd::Clear];

    for trap in &state.traps {
        cmds.push(DrawCmd::Rect {
            x: trap.x,
            y: trap.y,
            w: trap.w,
            h: trap.h,
            color: "darkred",
        });
    }

    for powerup in &state.power_ups {
        cmds.push(DrawCmd::Rect {
            x: powerup.x,
            y: powerup.y,
            w: powerup.size,
            h: powerup.size,
            color: powerup_color(powerup.kind),
        });
        let remaining = seconds_left(powerup.expires_at, state.tick);
        cmds.push(DrawCmd::Text {
            x: powerup.x + powerup.size / 2.0,
            y: powerup.y + powerup.size / 2.0,
            text: format!("{} ({remaining}s left)", powerup.kind.label()),
            color: "white",
            size: 12.0,
        });
    }

    for slot in PlayerSlot::BOTH {
        let player = state.player(slot);
        cmds.push(DrawCmd::Rect {
            x: player.x,
            y: player.y,
            w: player.size,
            h: player.size,
            color: player_color(slot),
        });
        if player.shield_active() {
            let (cx, cy) = player.bounds().center();
            cmds.push(DrawCmd::Ring {
                x: cx,
                y: cy,
                radius: player.size,
                color: "#66ccff",
                width: RING_WIDTH,
            });
        }
    }

    for bullet in &state.bullets {
        cmds.push(DrawCmd::Circle {
            x: bullet.x,
            y: bullet.y,
            radius: BULLET_RADIUS,
            color: "yellow",
            alpha: 1.0,
        });
    }

    draw_hud(state, config, &mut cmds);

    for explosion in &state.explosions {
        cmds.push(DrawCmd::Circle {
            x: explosion.x,
            y: explosion.y,
            radius: explosion.radius,
            color: "orange",
            alpha: explosion.alpha.clamp(0.0, 1.0),
        });
    }

    match &state.phase {
        RoundPhase::Briefing { .. } => cmds.push(DrawCmd::Overlay {
            text: "Get Ready!".to_string(),
        }),
        RoundPhase::Paused => cmds.push(DrawCmd::Overlay {
            text: "Paused".to_string(),
        }),
        RoundPhase::Over { outcome } => {
            let text = match outcome {
                RoundOutcome::Winner(slot) => {
                    format!("{} Wins!", state.names[slot.index()])
                }
                RoundOutcome::Draw => "Draw!".to_string(),
            };
            cmds.push(DrawCmd::Overlay { text });
        }
        _ => {}
    }

    cmds
}

/// HUD band: stacked health and shield meters per side, name banners below.
fn draw_hud(state: &GameState, config: &GameConfig, cmds: &mut Vec<DrawCmd>) {
    let columns = [HUD_INSET, config.width - BAR_WIDTH - HUD_INSET];
    let top = HUD_INSET;
    let shield_top = top + BAR_HEIGHT + BAR_GAP;
    let names_y = shield_top + BAR_HEIGHT + 25.0;

    for slot in PlayerSlot::BOTH {
        let player = state.player(slot);
        let x = columns[slot.index()];
        let center = x + BAR_WIDTH / 2.0;

        cmds.push(DrawCmd::Bar {
            x,
            y: top,
            w: BAR_WIDTH,
            h: BAR_HEIGHT,
            fraction: player.health as f32 / 100.0,
            stops: ["#ff4d4d", "#b30000"],
        });
        cmds.push(DrawCmd::Text {
            x: center,
            y: top + BAR_HEIGHT / 2.0,
            text: format!("Health: {}%", player.health),
            color: "white",
            size: 20.0,
        });

        cmds.push(DrawCmd::Bar {
            x,
            y: shield_top,
            w: BAR_WIDTH,
            h: BAR_HEIGHT,
            fraction: player.shield as f32 / 100.0,
            stops: ["#66ccff", "#0066cc"],
        });
        cmds.push(DrawCmd::Text {
            x: center,
            y: shield_top + BAR_HEIGHT / 2.0,
            text: format!("Shield: {}%", player.shield),
            color: "white",
            size: 20.0,
        });

        cmds.push(DrawCmd::Text {
            x: center,
            y: names_y,
            text: state.names[slot.index()].clone(),
            color: player_color(slot),
            size: 24.0,
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================
