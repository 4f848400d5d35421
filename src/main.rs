//! Rockpush headless runner
//!
//! Loads a level (or the built-in demo cave), plays a short scripted input
//! (hop in place, then hold Right) and steps the simulation at a fixed 60 Hz
//! tick until the level is finished.
//!
//! Usage: `rockpush [level.json] [tuning.json]`
//!
//! A level file may hold either decoded layers (`LevelLayers`) or a full
//! serialized `Level`.

use std::fs;
use std::process;

use rockpush::level::demo_level;
use rockpush::sim::{GameState, InputEvent, Key, tick};
use rockpush::{Level, LevelError, LevelLayers, LevelLoadError, Tuning};

/// One minute of simulated time
const MAX_TICKS: u64 = 60 * 60;
const SCREEN_WIDTH: i32 = 800;
const SCREEN_HEIGHT: i32 = 600;

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Layers(#[from] LevelError),

    #[error(transparent)]
    Level(#[from] LevelLoadError),

    #[error("malformed tuning json: {0}")]
    Tuning(#[from] serde_json::Error),
}

fn read(path: &str) -> Result<String, RunError> {
    fs::read_to_string(path).map_err(|source| RunError::Io {
        path: path.to_string(),
        source,
    })
}

fn load_level(path: &str) -> Result<Level, RunError> {
    let text = read(path)?;
    if let Ok(layers) = serde_json::from_str::<LevelLayers>(&text) {
        return Ok(Level::from_layers(&layers)?);
    }
    Ok(Level::from_json(&text)?)
}

fn load_tuning(path: Option<&str>) -> Result<Tuning, RunError> {
    match path {
        Some(path) => Ok(Tuning::from_json(&read(path)?)?),
        None => Ok(Tuning::default()),
    }
}

/// Input for the given tick: a hop on the spot, then walk (and push) right
fn scripted_events(tick: u64) -> &'static [InputEvent] {
    const HOP: [InputEvent; 1] = [InputEvent {
        key: Key::Up,
        down: true,
    }];
    const LAND: [InputEvent; 1] = [InputEvent {
        key: Key::Up,
        down: false,
    }];
    const WALK: [InputEvent; 1] = [InputEvent {
        key: Key::Right,
        down: true,
    }];
    match tick {
        2 => &HOP,
        3 => &LAND,
        45 => &WALK,
        _ => &[],
    }
}

fn run(level_path: Option<&str>, tuning_path: Option<&str>) -> Result<(), RunError> {
    let level = match level_path {
        Some(path) => load_level(path)?,
        None => demo_level(),
    };
    let tuning = load_tuning(tuning_path)?;

    let mut state = GameState::new(level, tuning);
    state.set_screen_size(SCREEN_WIDTH, SCREEN_HEIGHT);

    while state.time_ticks < MAX_TICKS {
        let events = scripted_events(state.time_ticks + 1);
        let output = tick(&mut state, events);

        if let Some(sound) = output.sound {
            log::info!("tick {}: play {:?}", state.time_ticks, sound);
        }
        if state.time_ticks % 60 == 0 {
            log::info!(
                "tick {}: player {:?} ({:?}), gate {:?}, {} draw commands",
                state.time_ticks,
                state.player.pos,
                state.player.sprite(),
                state.gate.phase,
                output.commands.len()
            );
        }
        if output.level_finished {
            log::info!("Level finished after {} ticks", state.time_ticks);
            return Ok(());
        }
    }

    log::warn!("Level not finished after {} ticks", MAX_TICKS);
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Rockpush (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(err) = run(
        args.first().map(String::as_str),
        args.get(1).map(String::as_str),
    ) {
        log::error!("{err}");
        process::exit(1);
    }
}
