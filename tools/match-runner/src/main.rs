//! match-runner: play a scripted headless match and print the final snapshot.
//!
//! Usage:
//!   match-runner --seed 42 --frames 3600
//!   match-runner --seed 7 --frames 600 --fire-every 20 --events

use std::process;

use tanks_core::commands::GameKey;
use tanks_core::enums::ElementState;
use tanks_core::events::GameEvent;
use tanks_sim::assets::full_catalog;
use tanks_sim::physics::KinematicIntegrator;
use tanks_sim::{MatchConfig, Simulation};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }
}

struct Options {
    seed: u64,
    frames: u32,
    fire_every: u32,
    print_events: bool,
}

fn print_usage() {
    eprintln!(
        "match-runner: headless tanks match\n\
         \n\
           --seed <N>        RNG seed (default: 42)\n\
           --frames <N>      Frames to simulate at 60 Hz (default: 3600)\n\
           --fire-every <N>  Fire a bullet every N frames (default: 30)\n\
           --events          Print every event as a JSON line before the snapshot\n\
         \n\
         Logging follows RUST_LOG; set LOG_FORMAT=json for JSON log lines.\n"
    );
}

fn parse_value<T: std::str::FromStr>(args: &[String], flag: &str) -> Result<Option<T>, String> {
    for i in 0..args.len() {
        if args[i] == flag {
            let Some(raw) = args.get(i + 1) else {
                return Err(format!("{flag} needs a value"));
            };
            return raw
                .parse()
                .map(Some)
                .map_err(|_| format!("invalid value for {flag}: {raw}"));
        }
    }
    Ok(None)
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    Ok(Options {
        seed: parse_value(args, "--seed")?.unwrap_or(42),
        frames: parse_value(args, "--frames")?.unwrap_or(3600),
        fire_every: parse_value(args, "--fire-every")?.unwrap_or(30).max(1),
        print_events: args.iter().any(|a| a == "--events"),
    })
}

/// Drive right, fire on a fixed cadence and launch a rocket whenever the
/// player has been stopped by the end sensor.
fn autopilot(sim: &Simulation, frame: u32, fire_every: u32) -> Option<GameKey> {
    if frame == 0 {
        return Some(GameKey::Fire);
    }
    let player = sim.player_id().and_then(|id| sim.entity(id))?;
    if player.state() == ElementState::Stopped && sim.rockets() > 0 {
        return Some(GameKey::Down);
    }
    if frame % fire_every == 0 {
        return Some(GameKey::Fire);
    }
    None
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }
    let options = match parse_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            process::exit(1);
        }
    };

    init_tracing();

    let mut sim = Simulation::new(MatchConfig {
        seed: options.seed,
        ..Default::default()
    });
    if let Err(err) = sim.setup(&full_catalog()) {
        eprintln!("Failed to set up match: {err}");
        process::exit(1);
    }

    let mut physics = KinematicIntegrator::new();
    let mut events: Vec<GameEvent> = Vec::new();
    let mut finished = false;

    for frame in 0..options.frames {
        if let Some(key) = autopilot(&sim, frame, options.fire_every) {
            sim.handle_game_key(key);
        }
        sim.step(&mut physics);

        let drained = sim.drain_events();
        finished = drained
            .iter()
            .any(|e| matches!(e, GameEvent::MatchFinished { .. }));
        if options.print_events {
            events.extend(drained);
        }
        for err in sim.drain_errors() {
            tracing::warn!(%err, frame, "simulation error");
        }
        if finished {
            break;
        }
    }

    tracing::info!(
        seed = options.seed,
        finished,
        state = ?sim.match_state(),
        score = sim.score(),
        health = sim.health(),
        ticks = sim.time().tick,
        "match over"
    );

    for event in &events {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(err) => {
                eprintln!("Failed to encode event: {err}");
                process::exit(1);
            }
        }
    }

    match serde_json::to_string_pretty(&sim.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("Failed to encode snapshot: {err}");
            process::exit(1);
        }
    }
}
