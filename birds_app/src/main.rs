mod cliargs;

use std::{
    process::ExitCode,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use birds_lib::{
    birdwatcher::Birdwatcher,
    flock::Flock,
    options::{RunOptions, Weights, WorldBounds},
    random::RandomSource,
    scheduler::FlockScheduler,
};
use clap_serde_derive::{clap::Parser, ClapSerde};
use serde::Serialize;

use cliargs::{Args, Config};

#[derive(Serialize)]
struct RunSummary {
    birds: usize,
    run_seconds: u64,
    samples: usize,
    mean_speed: f64,
    /// magnitude of the mean flight direction, 0 = disordered, 1 = aligned
    polarization: f64,
}

fn main() -> ExitCode {
    let mut args = Args::parse();

    // Get config file
    let config = if let Ok(content) = std::fs::read_to_string(&args.config_path) {
        match parse_file_config(&content) {
            // merge config already parsed from clap
            Ok(file_config) => Config::from(file_config).merge(&mut args.config),
            Err(err) => {
                eprintln!("invalid configuration file: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        // If there is no config file return only config parsed from clap
        Config::from(&mut args.config)
    };

    let run_options = to_run_options(&config);

    // all validation happens here, before any simulation state exists
    let mut rng = RandomSource::new(run_options.seed);
    let flock = match Flock::new(&run_options, &mut rng) {
        Ok(flock) => Arc::new(flock),
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    let scheduler = FlockScheduler::start(Arc::clone(&flock));
    let mut bird_watcher = Birdwatcher::new(run_options.sample_rate);

    // observe at the flock's own cadence while the bird tasks run free
    let deadline = Instant::now() + Duration::from_secs(config.run_seconds);
    while Instant::now() < deadline {
        thread::sleep(flock.run_options().tick_interval());
        bird_watcher.watch(&flock);
    }

    scheduler.stop();

    let samples = bird_watcher.pop_data();
    let summary = summarize(&flock, samples.len(), config.run_seconds);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("could not serialize run summary: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}

fn parse_file_config(content: &str) -> Result<<Config as ClapSerde>::Opt, toml::de::Error> {
    toml::from_str(content)
}

fn to_run_options(config: &Config) -> RunOptions {
    RunOptions {
        init_birds: config.no_birds,
        weights: Weights::new(
            config.separation_weight,
            config.cohesion_weight,
            config.alignment_weight,
        ),
        world: WorldBounds::new(config.dimension, config.padding),
        spawn_radius: config.spawn_radius,
        init_speed: config.init_speed,
        max_speed: config.max_speed,
        max_force: config.max_force,
        sensory_distance: config.sensory_distance,
        tick_per_bird: Duration::from_micros(config.tick_per_bird_us),
        sample_rate: config.sample_rate,
        seed: config.seed,
    }
}

fn summarize(flock: &Flock, samples: usize, run_seconds: u64) -> RunSummary {
    let snapshot = flock.snapshot();
    let n = snapshot.len() as f64;

    let mean_speed = snapshot.iter().map(|s| s.velocity.length()).sum::<f64>() / n;

    let (dir_x, dir_y) = snapshot
        .iter()
        .filter(|s| s.velocity.length_squared() > 0.)
        .fold((0., 0.), |(x, y), s| {
            let unit = s.velocity / s.velocity.length();
            (x + unit.x, y + unit.y)
        });
    let polarization = (dir_x * dir_x + dir_y * dir_y).sqrt() / n;

    RunSummary {
        birds: flock.len(),
        run_seconds,
        samples,
        mean_speed,
        polarization,
    }
}

#[cfg(test)]
mod tests {
    use clap_serde_derive::ClapSerde;

    use super::{parse_file_config, Config};

    #[test]
    fn malformed_config_file_is_reported_as_an_error() {
        assert!(parse_file_config("no_birds = \"many\"").is_err());
        assert!(parse_file_config("not even toml [").is_err());
    }

    #[test]
    fn well_formed_config_file_overrides_defaults() {
        let parsed = parse_file_config("no_birds = 64\nseed = 7").unwrap();
        let config = Config::from(parsed);
        assert_eq!(config.no_birds, 64);
        assert_eq!(config.seed, 7);
        // untouched fields keep their defaults
        assert_eq!(config.sample_rate, 4);
    }
}
