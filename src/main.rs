//! Shape Destroyer entry point
//!
//! Native builds run a headless demo: a seeded session played by the
//! autoplayer until the arena overflows. The web build starts from
//! `shape_destroyer::web`.

#[cfg(not(target_arch = "wasm32"))]
use shape_destroyer::{Difficulty, Session, Settings, consts::FRAME_MS, sim::choose_tap};

/// Autoplayer reaction time between taps
#[cfg(not(target_arch = "wasm32"))]
const TAP_INTERVAL_MS: u64 = 450;
/// Stop the demo after ten simulated minutes
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_MS: u64 = 10 * 60 * 1000;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shape Destroyer (native) starting...");

    let mut settings = match std::env::var("SHAPE_DESTROYER_SETTINGS") {
        Ok(path) => match Settings::load_from_path(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{err}, using default settings");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    };

    if let Ok(name) = std::env::var("SHAPE_DESTROYER_DIFFICULTY") {
        match Difficulty::from_str(&name) {
            Some(difficulty) => settings.apply_preset(difficulty),
            None => log::warn!("Unknown difficulty '{name}', keeping {}", settings.difficulty.as_str()),
        }
    }
    match settings.to_json() {
        Ok(json) => log::debug!("Settings: {json}"),
        Err(err) => log::warn!("{err}"),
    }

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or_else(rand::random);

    let mut session = Session::new(settings, seed);
    session.start();

    let mut since_tap = 0;
    while !session.is_over() && session.now_ms() < MAX_DEMO_MS {
        session.advance(FRAME_MS);
        since_tap += FRAME_MS;
        if since_tap >= TAP_INTERVAL_MS {
            since_tap = 0;
            if let Some(id) = choose_tap(session.entities(), session.selection()) {
                session.handle_tap(id);
            }
        }
        session.drain_events();
    }

    println!("\nSeed:          {}", session.seed());
    println!("Survived:      {:.1} s", session.now_ms() as f64 / 1000.0);
    println!("Final score:   {}", session.score());
    println!("Shapes alive:  {}", session.len());
    println!("Spawn interval {:.0} ms", session.spawn_interval_ms());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
