//! Ninja Run headless entry point
//!
//! Runs one seeded game under a simple autopilot and prints the final frame
//! as JSON. Usage: `ninja-run [--seed N] [--tuning path.json] [--ticks N]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use ninja_run::Tuning;
    use ninja_run::platform::{Driver, LogSink};
    use ninja_run::sim::{Command, GamePhase, GameState};

    /// Horizontal look-ahead for hazards worth jumping
    const JUMP_LOOKAHEAD: f32 = 160.0;
    /// Ticks between autopilot throws
    const THROW_EVERY: u64 = 20;
    const DEFAULT_TICKS: u64 = 3600;

    struct Args {
        seed: u64,
        tuning: Option<PathBuf>,
        ticks: u64,
    }

    fn parse_args() -> Args {
        let mut args = Args {
            seed: 0,
            tuning: None,
            ticks: DEFAULT_TICKS,
        };
        let mut iter = std::env::args().skip(1);
        while let Some(flag) = iter.next() {
            let value = iter.next();
            match (flag.as_str(), value) {
                ("--seed", Some(v)) => match v.parse() {
                    Ok(seed) => args.seed = seed,
                    Err(e) => log::warn!("Bad --seed {:?}: {}", v, e),
                },
                ("--ticks", Some(v)) => match v.parse() {
                    Ok(ticks) => args.ticks = ticks,
                    Err(e) => log::warn!("Bad --ticks {:?}: {}", v, e),
                },
                ("--tuning", Some(v)) => args.tuning = Some(PathBuf::from(v)),
                (other, _) => log::warn!("Ignoring argument {:?}", other),
            }
        }
        args
    }

    fn load_tuning(path: Option<&PathBuf>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!(
                    "Failed to load tuning from {}: {}, using defaults",
                    path.display(),
                    e
                );
                Tuning::default()
            }
        }
    }

    /// Something dangerous is about to reach the player
    fn hazard_ahead(state: &GameState) -> bool {
        let Some(player) = &state.player else {
            return false;
        };
        let reach = player.pos.x + JUMP_LOOKAHEAD;
        let obstacle = state
            .obstacles
            .iter()
            .any(|o| o.active && o.pos.x > player.pos.x && o.pos.x < reach);
        let walker = state.enemies.iter().any(|e| {
            e.active && !e.is_airborne() && e.pos.x > player.pos.x && e.pos.x < reach
        });
        obstacle || walker
    }

    pub fn run() {
        let args = parse_args();
        let tuning = load_tuning(args.tuning.as_ref());
        log::info!("Ninja Run starting (seed {}, {} ticks)", args.seed, args.ticks);

        let state = GameState::with_tuning(args.seed, tuning);
        let mut driver = Driver::new(
            state,
            LogSink::default(),
            LogSink::default(),
            LogSink::default(),
        );
        driver.push(Command::Start);

        for n in 0..args.ticks {
            let state = driver.state();
            let grounded = state.player.as_ref().is_some_and(|p| !p.body.is_airborne());
            if grounded && hazard_ahead(state) {
                driver.push(Command::Jump);
            }
            if n % THROW_EVERY == 0 {
                driver.push(Command::Fire);
            }

            let report = driver.frame(1.0);
            if report.game_over || driver.state().phase == GamePhase::GameOver {
                break;
            }
        }

        match serde_json::to_string_pretty(&driver.state().frame()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize frame: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser frontends drive `platform::Driver` directly
}
