//! Fixed-step frame tick
//!
//! One call advances the simulation by exactly one frame: input, rocks,
//! player, exit trigger, camera, gate, then draw directives.

use std::iter;

use super::gate::GatePhase;
use super::rect::Rect;
use super::state::{GameState, InputEvent, Key, SoundEffect};
use crate::draw::{DrawCommand, DrawOptions, SpriteId};
use crate::round_half_away_from_zero;

/// Everything a tick hands back to the surrounding controller
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// Draw directives in screen space, back to front
    pub commands: Vec<DrawCommand>,
    /// One-shot sound to play this frame
    pub sound: Option<SoundEffect>,
    /// The exit sequence has finished; load the next level
    pub level_finished: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, events: &[InputEvent]) -> FrameOutput {
    apply_input(state, events);
    state.time_ticks += 1;

    step_rocks(state);

    let GameState {
        level,
        player,
        rocks,
        input,
        tuning,
        ..
    } = state;
    player.update(&level.grid, rocks, input, tuning);

    let mut sound = None;
    let center_x = state.player.center_x(&state.tuning);
    if !state.gate.is_active()
        && state
            .gate
            .player_at_exit(state.player.pos, center_x, &state.tuning)
        && state.gate.begin()
    {
        state.input.clear();
        sound = Some(SoundEffect::GateEnter);
    }

    let player_center = state
        .player
        .pos
        .saturating_add(state.tuning.player_size / 2);
    state.camera.center_around(player_center);

    state.gate.update(&state.tuning);

    FrameOutput {
        commands: draw_commands(state),
        sound,
        level_finished: state.level_finished(),
    }
}

/// Apply key transitions in order. Movement keys are dropped once the exit
/// sequence has begun; Restart always works.
fn apply_input(state: &mut GameState, events: &[InputEvent]) {
    for &event in events {
        match event.key {
            Key::Restart => {
                if event.down {
                    state.restart();
                }
            }
            _ if state.gate.is_active() => {}
            _ => state.input.apply(event),
        }
    }
}

/// Step every rock in spawn order against the grid, the player and the
/// other rocks
fn step_rocks(state: &mut GameState) {
    let player_box = state.player.hit_box(&state.tuning);
    let mut others: Vec<Rect> = Vec::with_capacity(state.rocks.len());
    for i in 0..state.rocks.len() {
        others.clear();
        others.extend(
            state
                .rocks
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, r)| r.hit_box)
                .chain(iter::once(player_box)),
        );
        state.rocks[i].update(&state.level.grid, &others, &state.tuning);
    }
}

/// Build this frame's draw list, back to front, through the camera
fn draw_commands(state: &GameState) -> Vec<DrawCommand> {
    let camera = &state.camera;
    let gate = &state.gate;
    let grid = &state.level.grid;
    let mut commands = Vec::with_capacity(grid.tile_count() + state.rocks.len() + 4);

    for (pos, tile) in grid.visible_tiles() {
        commands.push(DrawCommand::Tile {
            pos: camera.to_screen(pos),
            source: tile.source,
        });
    }

    for rock in &state.rocks {
        commands.push(DrawCommand::Sprite {
            sprite: SpriteId::Rock,
            pos: camera.to_screen(rock.hit_box.pos()),
            options: DrawOptions::default()
                .center_rotation(round_half_away_from_zero(rock.rotation)),
        });
    }

    let gate_pos = camera.to_screen(gate.pos);
    let gate_opts = DrawOptions::default().flip_x(gate.faces_right);
    commands.push(DrawCommand::Sprite {
        sprite: SpriteId::GateA,
        pos: gate_pos,
        options: gate_opts,
    });
    commands.push(DrawCommand::Sprite {
        sprite: SpriteId::GateB,
        pos: gate_pos,
        options: gate_opts.opacity(gate.glow.ratio()),
    });

    // The player dissolves into the gate and stays gone once it fades out
    let player_opacity = match gate.phase {
        GatePhase::Idle => Some(1.0),
        GatePhase::Entering => Some(1.0 - gate.exit_glow()),
        GatePhase::FadingOut | GatePhase::Done => None,
    };
    if let Some(opacity) = player_opacity {
        commands.push(DrawCommand::Sprite {
            sprite: state.player.sprite(),
            pos: camera.to_screen(state.player.pos),
            options: DrawOptions::default()
                .flip_x(state.player.faces_right)
                .opacity(opacity),
        });
    }

    if matches!(gate.phase, GatePhase::Entering | GatePhase::FadingOut) {
        commands.push(DrawCommand::Sprite {
            sprite: SpriteId::ExitGlow,
            pos: gate_pos,
            options: gate_opts.opacity(gate.exit_glow()),
        });
    }

    commands
}
