//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`, which the caller
//! owns and hands to `tick` by mutable reference once per frame.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::gate::Gate;
use super::player::Player;
use super::rect::Rect;
use super::rock::Rock;
use crate::level::Level;
use crate::tuning::Tuning;

/// Keys the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    /// Jump
    Up,
    Restart,
}

/// A key transition, delivered in order within a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub key: Key,
    pub down: bool,
}

impl InputEvent {
    pub fn down(key: Key) -> Self {
        Self { key, down: true }
    }

    pub fn up(key: Key) -> Self {
        Self { key, down: false }
    }
}

/// Held movement keys, persisted across ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
}

impl InputState {
    /// Record a movement key transition. Restart is not a held key.
    pub fn apply(&mut self, event: InputEvent) {
        match event.key {
            Key::Left => self.left = event.down,
            Key::Right => self.right = event.down,
            Key::Up => self.up = event.down,
            Key::Restart => {}
        }
    }

    /// -1, 0 or 1; holding both directions cancels out
    pub fn horizontal(&self) -> i32 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One-shot sound notifications for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player stepped into the gate
    GateEnter,
}

/// Complete simulation state for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub level: Level,
    pub player: Player,
    /// Spawn order is preserved; rocks are never added or removed mid-level
    pub rocks: Vec<Rock>,
    pub camera: Camera,
    pub gate: Gate,
    pub input: InputState,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a state with every body at its spawn
    pub fn new(level: Level, tuning: Tuning) -> Self {
        let camera = Camera::new(IVec2::ZERO, level.grid.world_size());
        let gate = Gate::new(level.gate.pos, level.gate.faces_right, &tuning);
        let mut state = Self {
            player: Player::spawn(level.player.pos, level.player.faces_right),
            rocks: Vec::new(),
            camera,
            gate,
            input: InputState::default(),
            time_ticks: 0,
            level,
            tuning,
        };
        state.restart();
        log::info!(
            "Level loaded: {}x{} tiles, {} rocks",
            state.level.grid.width,
            state.level.grid.height,
            state.rocks.len()
        );
        state
    }

    /// Put the player and every rock back at their spawns and cancel any
    /// completion sequence. Held keys, screen size and the idle glow survive.
    pub fn restart(&mut self) {
        let spawn = self.level.player;
        self.player = Player::spawn(spawn.pos, spawn.faces_right);
        let size = self.tuning.rock_size;
        self.rocks = self
            .level
            .rocks
            .iter()
            .map(|&pos| Rock::new(Rect::at(pos, size)))
            .collect();
        self.gate.reset_sequence();
        log::debug!("Restarted level");
    }

    /// Replace the level wholesale and start it from its spawns
    pub fn load_level(&mut self, level: Level) {
        let screen = self.camera.screen;
        *self = Self::new(level, self.tuning.clone());
        self.camera.screen = screen;
    }

    /// Viewport size in pixels; takes effect on the next tick
    pub fn set_screen_size(&mut self, width: i32, height: i32) {
        self.camera.set_screen_size(width, height);
        log::debug!("Screen size set to {}x{}", width, height);
    }

    /// True once the exit sequence has fully played out
    pub fn level_finished(&self) -> bool {
        self.gate.is_done()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::demo_level;

    #[test]
    fn test_last_event_wins() {
        let mut input = InputState::default();
        for event in [
            InputEvent::down(Key::Left),
            InputEvent::up(Key::Left),
            InputEvent::down(Key::Left),
            InputEvent::down(Key::Up),
            InputEvent::up(Key::Up),
        ] {
            input.apply(event);
        }
        assert!(input.left);
        assert!(!input.up);
        assert_eq!(input.horizontal(), -1);
    }

    #[test]
    fn test_restart_is_not_held() {
        let mut input = InputState::default();
        input.apply(InputEvent::down(Key::Restart));
        assert_eq!(input, InputState::default());
    }

    #[test]
    fn test_new_state_spawns_bodies() {
        let level = demo_level();
        let state = GameState::new(level.clone(), Tuning::default());
        assert_eq!(state.player.pos, level.player.pos);
        assert_eq!(state.rocks.len(), level.rocks.len());
        for (rock, spawn) in state.rocks.iter().zip(&level.rocks) {
            assert_eq!(rock.hit_box.pos(), *spawn);
            assert_eq!(rock.hit_box.w, Tuning::default().rock_size.x);
        }
        assert!(!state.level_finished());
    }

    #[test]
    fn test_restart_resets_and_is_idempotent() {
        let mut state = GameState::new(demo_level(), Tuning::default());
        let fresh = (state.player, state.rocks.clone(), state.gate.phase);

        state.player.pos += IVec2::new(40, 12);
        state.player.speed_y = -5;
        state.rocks[0].hit_box.x += 30;
        state.rocks[0].speed_x = 2.0;
        state.rocks[0].rotation = 90.0;
        state.gate.begin();

        state.restart();
        let once = (state.player, state.rocks.clone(), state.gate.phase);
        state.restart();
        let twice = (state.player, state.rocks.clone(), state.gate.phase);

        assert_eq!(once, fresh);
        assert_eq!(twice, once);
    }

    #[test]
    fn test_load_level_keeps_screen_size() {
        let mut state = GameState::new(demo_level(), Tuning::default());
        state.set_screen_size(640, 480);
        state.player.pos.x += 100;
        state.load_level(demo_level());
        assert_eq!(state.camera.screen, IVec2::new(640, 480));
        assert_eq!(state.player.pos, demo_level().player.pos);
        assert_eq!(state.time_ticks, 0);
    }
}
