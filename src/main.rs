//! Quickdraw entry point
//!
//! Headless demo runner: loads a map (path as the first argument, or a
//! built-in arena), drives the session loop at the fixed tick rate with
//! idle input, and logs the outcome. A real front end polls input and
//! renders the draw list each frame against the same loop.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use quickdraw::consts::TICK_RATE;
use quickdraw::sim::{hud, tick, SessionOutcome, SessionState, TickInput};
use quickdraw::{TileGrid, TimeStore, Tuning};

const DEMO_MAP: &str = "\
################
#P.............#
#..............#
#....##........#
#....##...E....#
#..............#
#.........E....X
################";

/// Demo time limit in ticks (one minute)
const DEMO_TICK_LIMIT: u64 = 60 * TICK_RATE as u64;

fn main() {
    env_logger::init();
    log::info!("Quickdraw starting");

    let mut args = std::env::args().skip(1);
    let grid = match args.next() {
        Some(path) => match TileGrid::load(&path) {
            Ok(grid) => grid,
            Err(err) => {
                log::error!("Failed to load map {path}: {err}");
                std::process::exit(1);
            }
        },
        None => TileGrid::parse(DEMO_MAP).expect("demo map is well-formed"),
    };
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("Failed to load tuning {path}: {err}");
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let store = TimeStore::new("times.txt");
    let best = store.top_times();
    if !best.is_empty() {
        log::info!("Best time on record: {:.2}s", best[0] / 1000.0);
    }

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut state = SessionState::new(grid, tuning, seed);

    let tick_duration = Duration::from_secs_f64(1.0 / TICK_RATE as f64);
    let input = TickInput::default();
    let mut next_tick = Instant::now();

    loop {
        tick(&mut state, &input);
        for event in state.take_events() {
            log::debug!("event: {event:?}");
        }

        if state.time_ticks % TICK_RATE as u64 == 0 {
            let hud = hud(&state);
            log::info!("t={:.0}s ammo={}", hud.elapsed_ms / 1000.0, hud.ammo);
        }

        match state.outcome {
            SessionOutcome::Running => {}
            SessionOutcome::PlayerDead => {
                log::info!("Player died after {:.2}s", state.elapsed_ms() / 1000.0);
                break;
            }
            SessionOutcome::StageCleared => {
                let elapsed = state.elapsed_ms();
                if let Err(err) = store.record(elapsed) {
                    log::warn!("Failed to record time: {err}");
                }
                break;
            }
        }

        if state.time_ticks >= DEMO_TICK_LIMIT {
            log::info!("Demo time limit reached");
            break;
        }

        // Frame pacing: wait for the next tick boundary, but never try to
        // catch up after a long stall
        next_tick += tick_duration;
        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        } else {
            next_tick = now;
        }
    }
}
