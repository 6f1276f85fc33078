//! Rain Catcher headless runner
//!
//! Plays one match with the autopilot at a fixed timestep and logs the
//! result. Usage: `rain-catcher [easy|medium|hard] [seconds]`.
//! Set `RUST_LOG=debug` to watch spawns and catches.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    use rain_catcher::audio::LogSink;
    use rain_catcher::consts::SIM_DT;
    use rain_catcher::platform::{Clock, FrameStepper, Key, KeyboardState, ManualClock};
    use rain_catcher::sim::{SeededRng, autopilot_input};
    use rain_catcher::{AudioManager, Difficulty, Screen, ScreenMachine, Settings, TickOutcome};

    env_logger::init();
    log::info!("Rain Catcher (headless) starting...");

    let settings = Settings::load_or_default(Path::new(Settings::FILE_NAME));

    let mut args = std::env::args().skip(1);
    let difficulty = match args.next() {
        Some(arg) => Difficulty::from_str(&arg).unwrap_or_else(|| {
            log::warn!("Unknown difficulty {:?}, using {}", arg, settings.default_difficulty.as_str());
            settings.default_difficulty
        }),
        None => settings.default_difficulty,
    };
    let time_limit: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed: {}", seed);

    let mut audio = AudioManager::new(Box::new(LogSink));
    audio.set_muted(settings.muted);
    audio.set_music_volume(settings.music_volume);
    audio.set_master_volume(settings.master_volume);

    let mut machine = ScreenMachine::new(difficulty, Box::new(SeededRng::new(seed)), audio);
    let mut keys = KeyboardState::new();

    // Menu -> difficulty select -> match, through the same shortcuts a player uses
    keys.tap(Key::J);
    machine.tick(0.0, &keys);
    keys.end_frame();
    keys.tap(match difficulty {
        Difficulty::Easy => Key::Num1,
        Difficulty::Medium => Key::Num2,
        Difficulty::Hard => Key::Num3,
    });
    machine.tick(0.0, &keys);
    keys.end_frame();

    let mut clock = ManualClock::new();
    let mut stepper = FrameStepper::new(SIM_DT);

    while machine.screen() == Screen::Playing && clock.now() < time_limit {
        // Pretend the host renders at a steady 30 fps
        clock.advance(1.0 / 30.0);
        for _ in 0..stepper.feed(clock.delta_seconds()) {
            let moves = autopilot_input(machine.player(), machine.field());
            keys.clear();
            if moves.left {
                keys.press(Key::Left);
            }
            if moves.right {
                keys.press(Key::Right);
            }
            if machine.tick(stepper.step(), &keys) == TickOutcome::Quit {
                break;
            }
            keys.end_frame();
        }
    }

    let snapshot = machine.snapshot();
    match machine.screen() {
        Screen::GameOver => log::info!(
            "Autopilot lost after {:.1}s on {}: score {}",
            clock.now(),
            snapshot.difficulty,
            snapshot.score
        ),
        _ => log::info!(
            "Time limit reached on {}: score {}, {} lives left",
            snapshot.difficulty,
            snapshot.score,
            snapshot.lives
        ),
    }

    match snapshot.to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to encode snapshot: {err}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page; nothing to run here
}
