//! The level exit
//!
//! Two independent pieces of state:
//! - an idle glow that ping-pongs between 0 and 1 forever
//! - the completion sequence, `Idle -> Entering -> FadingOut -> Done`, which
//!   starts when the player stands in front of the gate

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{EXIT_GLOW_RESOLUTION, GLOW_RESOLUTION};
use crate::tuning::Tuning;

/// Phase of the level completion sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GatePhase {
    /// Normal play, watching for the player
    #[default]
    Idle,
    /// Player dissolves while the exit glow grows
    Entering,
    /// Exit glow fades back out
    FadingOut,
    /// Level finished; waiting for the caller to load the next one
    Done,
}

/// A value stepping back and forth between 0 and 1.
///
/// Tracked in whole steps of `1 / GLOW_RESOLUTION` so both bounds are hit exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingPong {
    value: i32,
    delta: i32,
}

impl PingPong {
    pub fn new(step: i32) -> Self {
        Self {
            value: 0,
            delta: step,
        }
    }

    pub fn step(&mut self) {
        self.value = (self.value + self.delta).clamp(0, GLOW_RESOLUTION);
        // Reverse on the bound itself, not one step past it
        if self.value == 0 {
            self.delta = self.delta.abs();
        } else if self.value == GLOW_RESOLUTION {
            self.delta = -self.delta.abs();
        }
    }

    pub fn ratio(&self) -> f32 {
        self.value as f32 / GLOW_RESOLUTION as f32
    }
}

/// The level exit and its completion sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub pos: IVec2,
    pub faces_right: bool,
    pub glow: PingPong,
    pub phase: GatePhase,
    /// Exit overlay strength in `[0, EXIT_GLOW_RESOLUTION]`
    pub exit_level: i32,
}

impl Gate {
    pub fn new(pos: IVec2, faces_right: bool, tuning: &Tuning) -> Self {
        Self {
            pos,
            faces_right,
            glow: PingPong::new(tuning.gate_glow_step),
            phase: GatePhase::Idle,
            exit_level: 0,
        }
    }

    /// Back to `Idle` with no exit glow; the idle glow keeps running
    pub fn reset_sequence(&mut self) {
        self.phase = GatePhase::Idle;
        self.exit_level = 0;
    }

    /// Exit overlay strength in `[0, 1]`
    pub fn exit_glow(&self) -> f32 {
        self.exit_level as f32 / EXIT_GLOW_RESOLUTION as f32
    }

    /// Whether the completion sequence has started
    pub fn is_active(&self) -> bool {
        self.phase != GatePhase::Idle
    }

    pub fn is_done(&self) -> bool {
        self.phase == GatePhase::Done
    }

    /// Horizontal range (half-open) the player's center must be in to exit
    pub fn exit_band(&self, tuning: &Tuning) -> (i32, i32) {
        if self.faces_right {
            let lo = self.pos.x + tuning.gate_size.x;
            (lo, lo + tuning.exit_band)
        } else {
            (self.pos.x - tuning.exit_band, self.pos.x)
        }
    }

    /// Whether a player standing at `player_pos` with the given horizontal
    /// center triggers the exit
    pub fn player_at_exit(&self, player_pos: IVec2, center_x: i32, tuning: &Tuning) -> bool {
        let (lo, hi) = self.exit_band(tuning);
        player_pos.y == self.pos.y && center_x >= lo && center_x < hi
    }

    /// Start the completion sequence; no-op unless idle.
    ///
    /// Returns true if the sequence started.
    pub fn begin(&mut self) -> bool {
        if self.phase != GatePhase::Idle {
            return false;
        }
        self.phase = GatePhase::Entering;
        self.exit_level = 0;
        log::info!("Gate sequence started at {:?}", self.pos);
        true
    }

    /// Advance the idle glow and the completion sequence by one tick
    pub fn update(&mut self, tuning: &Tuning) {
        self.glow.step();

        match self.phase {
            GatePhase::Idle | GatePhase::Done => {}
            GatePhase::Entering => {
                self.exit_level =
                    (self.exit_level + tuning.exit_glow_step).min(EXIT_GLOW_RESOLUTION);
                if self.exit_level == EXIT_GLOW_RESOLUTION {
                    self.phase = GatePhase::FadingOut;
                }
            }
            GatePhase::FadingOut => {
                self.exit_level = (self.exit_level - tuning.exit_glow_step).max(0);
                if self.exit_level == 0 {
                    self.phase = GatePhase::Done;
                    log::info!("Level finished");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_pong_sequence() {
        let mut glow = PingPong::new(2);
        let mut seen = vec![glow.ratio()];
        for _ in 0..150 {
            glow.step();
            seen.push(glow.ratio());
        }
        // Up to 1 in 50 steps, back to 0 in 50 more, then up again
        assert_eq!(seen[0], 0.0);
        assert!((seen[1] - 0.02).abs() < 1e-6);
        assert_eq!(seen[50], 1.0);
        assert!((seen[51] - 0.98).abs() < 1e-6);
        assert_eq!(seen[100], 0.0);
        assert!((seen[101] - 0.02).abs() < 1e-6);
        assert_eq!(seen[150], 1.0);
        assert!(seen.iter().all(|r| (0.0..=1.0).contains(r)));
    }

    #[test]
    fn test_ping_pong_uneven_step_clamps() {
        let mut glow = PingPong::new(30);
        let mut seen = Vec::new();
        for _ in 0..8 {
            glow.step();
            seen.push(glow.ratio());
        }
        assert_eq!(seen, vec![0.3, 0.6, 0.9, 1.0, 0.7, 0.4, 0.1, 0.0]);
    }

    #[test]
    fn test_sequence_runs_to_done() {
        let tuning = Tuning {
            exit_glow_step: 250,
            ..Default::default()
        };
        let mut gate = Gate::new(IVec2::new(0, 0), true, &tuning);
        gate.update(&tuning);
        assert_eq!(gate.phase, GatePhase::Idle);
        assert_eq!(gate.exit_glow(), 0.0);

        assert!(gate.begin());
        assert!(!gate.begin());
        let mut glows = Vec::new();
        while !gate.is_done() {
            gate.update(&tuning);
            glows.push((gate.phase, gate.exit_glow()));
        }
        assert_eq!(
            glows,
            vec![
                (GatePhase::Entering, 0.25),
                (GatePhase::Entering, 0.5),
                (GatePhase::Entering, 0.75),
                (GatePhase::FadingOut, 1.0),
                (GatePhase::FadingOut, 0.75),
                (GatePhase::FadingOut, 0.5),
                (GatePhase::FadingOut, 0.25),
                (GatePhase::Done, 0.0),
            ]
        );

        // Done is terminal
        gate.update(&tuning);
        assert!(gate.is_done());
    }

    #[test]
    fn test_default_exit_ramp_lands_exactly() {
        let tuning = Tuning::default();
        let mut gate = Gate::new(IVec2::ZERO, true, &tuning);
        gate.begin();
        let mut peak_at = None;
        for n in 1..=200 {
            gate.update(&tuning);
            if peak_at.is_none() && gate.phase == GatePhase::FadingOut {
                peak_at = Some(n);
                assert_eq!(gate.exit_glow(), 1.0);
            }
            if gate.is_done() {
                assert_eq!(peak_at, Some(40));
                assert_eq!(n, 80);
                assert_eq!(gate.exit_glow(), 0.0);
                return;
            }
        }
        panic!("exit sequence did not finish");
    }

    #[test]
    fn test_exit_band_follows_facing() {
        let tuning = Tuning {
            gate_size: IVec2::new(64, 128),
            exit_band: 24,
            ..Default::default()
        };
        let right = Gate::new(IVec2::new(320, 64), true, &tuning);
        assert_eq!(right.exit_band(&tuning), (384, 408));
        assert!(right.player_at_exit(IVec2::new(360, 64), 384, &tuning));
        assert!(right.player_at_exit(IVec2::new(360, 64), 407, &tuning));
        assert!(!right.player_at_exit(IVec2::new(360, 64), 408, &tuning));
        assert!(!right.player_at_exit(IVec2::new(360, 65), 390, &tuning));

        let left = Gate::new(IVec2::new(320, 64), false, &tuning);
        assert_eq!(left.exit_band(&tuning), (296, 320));
        assert!(left.player_at_exit(IVec2::new(280, 64), 300, &tuning));
        assert!(!left.player_at_exit(IVec2::new(280, 64), 320, &tuning));
    }

    #[test]
    fn test_reset_sequence_returns_to_idle() {
        let tuning = Tuning::default();
        let mut gate = Gate::new(IVec2::ZERO, false, &tuning);
        gate.begin();
        gate.update(&tuning);
        gate.reset_sequence();
        assert_eq!(gate.phase, GatePhase::Idle);
        assert_eq!(gate.exit_glow(), 0.0);
        assert!(!gate.is_active());
    }
}
