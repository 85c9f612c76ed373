//! Bad Ice Cream entry point
//!
//! Headless native driver: plays the built-in levels on a manual clock with a
//! simple autopilot and prints ASCII frames. Usage:
//!
//! `bad-ice-cream [difficulty] [seed]`

use bad_ice_cream::consts::*;
use bad_ice_cream::input::Key;
use bad_ice_cream::sim::{GameEvent, ManualClock, pixel_to_cell};
use bad_ice_cream::{Difficulty, Game, Settings};

const SETTINGS_PATH: &str = "bad_ice_cream.json";
/// Simulated time the demo runs for at most
const DEMO_LENGTH_MS: u64 = 5 * 60 * 1000;
const FRAME_EVERY_MS: u64 = 15_000;

fn main() {
    env_logger::init();
    log::info!("Bad Ice Cream (headless) starting...");

    let mut settings = if std::path::Path::new(SETTINGS_PATH).exists() {
        Settings::load_from(SETTINGS_PATH)
    } else {
        Settings::default()
    };
    let mut args = std::env::args().skip(1);
    if let Some(name) = args.next() {
        match Difficulty::parse(&name) {
            Some(difficulty) => settings.difficulty = difficulty,
            None => log::warn!("Unknown difficulty {:?}, keeping {}", name, settings.difficulty.as_str()),
        }
    }
    if let Some(seed) = args.next() {
        match seed.parse() {
            Ok(seed) => settings.seed = Some(seed),
            Err(e) => log::warn!("Ignoring seed {:?}: {}", seed, e),
        }
    }

    let clock = ManualClock::new(0);
    let mut game = match Game::new(settings, Box::new(clock.clone())) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Failed to load levels: {}", e);
            std::process::exit(1);
        }
    };

    let frame_ms = game.settings().tick_ms();
    let mut held: Option<Key> = None;
    let mut elapsed = 0;

    while !game.is_over() && elapsed < DEMO_LENGTH_MS {
        let wanted = autopilot(&game);
        if held != Some(wanted) {
            if let Some(key) = held {
                game.key_up(key);
            }
            game.key_down(wanted);
            held = Some(wanted);
        }
        // Tap action every few seconds
        if elapsed % 3_000 < frame_ms {
            game.key_down(Key::Action);
        } else {
            game.key_up(Key::Action);
        }

        clock.advance(frame_ms);
        elapsed += frame_ms;
        game.pump();

        for event in game.drain_events() {
            match event {
                GameEvent::LevelCleared { index } => {
                    println!("Level {} cleared, score {}", index + 1, game.score())
                }
                other => log::debug!("{:?}", other),
            }
        }

        if elapsed % FRAME_EVERY_MS < frame_ms {
            println!(
                "Level {}/{}  score {}  time left {}s",
                game.current_level_index() + 1,
                game.level_count(),
                game.score(),
                game.remaining_time_ms() / 1000
            );
            print!("{}", game.render_ascii());
        }
    }

    print!("{}", game.render_ascii());
    match game.game_over_message() {
        Some(message) => println!("{}", message),
        None => println!("Demo over. Your score was: {}", game.score()),
    }
}

/// Head for the nearest fruit along the larger axis
fn autopilot(game: &Game) -> Key {
    let state = game.state();
    let level = state.level();
    let cell_size = level.cell_size();
    let here = state.player.cell(cell_size);

    let nearest = level
        .fruits()
        .live()
        .iter()
        .map(|f| pixel_to_cell(f.bounds.pos, cell_size))
        .min_by_key(|c| (*c - here).abs().element_sum());

    let Some(target) = nearest else {
        return Key::Down;
    };
    let delta = target - here;
    // Alternate axes every second so walls do not pin the player forever
    let prefer_x = (state.time_ticks / u64::from(TICK_HZ)) % 2 == 0;
    if (prefer_x && delta.x != 0) || delta.y == 0 {
        if delta.x > 0 { Key::Right } else { Key::Left }
    } else if delta.y > 0 {
        Key::Down
    } else {
        Key::Up
    }
}
