//! Ember Run entry point
//!
//! The browser build is driven from `web::WebGame`. Natively this runs a
//! short headless session with scripted input and logs what happens.
//! An optional JSON file overrides the game balance.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ember_run::persistence::MemoryStorage;
    use ember_run::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use ember_run::{Settings, Tuning};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ember Run (native) starting headless session...");

    // Usage: ember-run [seed] [tuning.json]
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {path}: {e}");
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };
    let mut state = GameState::with_config(
        seed,
        Box::new(MemoryStorage::new()),
        tuning,
        &Settings::default(),
    );

    // Hold right, hop every second, fire twice a second
    for frame in 0..3600u32 {
        let input = TickInput {
            right: true,
            jump: frame % 60 == 0,
            fire: frame % 30 == 15,
            ..TickInput::default()
        };
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::ScoreChanged { score, high_score } => {
                    log::info!("frame {frame}: score {score} (best {high_score})")
                }
                GameEvent::LivesChanged { lives } => log::info!("frame {frame}: lives {lives}"),
                other => log::info!("frame {frame}: {other:?}"),
            }
        }

        if state.phase != GamePhase::Playing {
            break;
        }
    }

    log::info!(
        "Session ended after {} ticks: {:?}, score {}, lives {}, x={:.1}",
        state.time_ticks,
        state.phase,
        state.score.current(),
        state.lives,
        state.player.bounds.pos.x
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
