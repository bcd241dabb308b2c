use birdwatcher::{BirdData, Birdwatcher};
use flock::Flock;
use options::{ConfigError, RunOptions};
use random::RandomSource;

pub mod bird;
pub mod birdwatcher;
pub mod flock;
pub mod math_helpers;
pub mod options;
pub mod random;
pub mod scheduler;

/// Deterministic offline driver: builds a flock from the options' seed and
/// advances it synchronously for `no_iter` ticks, returning the sampled
/// observations. The threaded [`scheduler::FlockScheduler`] is the live run
/// mode; this one exists for tests, benches and reproducible runs.
pub fn flock_base(no_iter: u64, run_options: RunOptions) -> Result<Vec<BirdData>, ConfigError> {
    let mut rng = RandomSource::new(run_options.seed);
    let flock = Flock::new(&run_options, &mut rng)?;
    let mut bird_watcher = Birdwatcher::new(run_options.sample_rate);

    (0..no_iter).for_each(|_| {
        flock.step();
        bird_watcher.watch(&flock);
    });

    Ok(bird_watcher.pop_data())
}

#[cfg(test)]
mod tests {
    use crate::options::{RunOptions, Weights};

    use super::flock_base;

    #[test]
    fn offline_runs_are_reproducible() {
        let run_options = RunOptions {
            init_birds: 16,
            ..Default::default()
        };

        let first = flock_base(20, run_options.clone()).unwrap();
        let second = flock_base(20, run_options).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn invalid_weights_never_reach_the_simulation() {
        let run_options = RunOptions {
            weights: Weights::new(0.5, 0.5, 0.2),
            ..Default::default()
        };
        assert!(flock_base(1, run_options).is_err());
    }
}
