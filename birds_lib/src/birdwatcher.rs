use std::mem;

use serde::Serialize;

use crate::flock::Flock;

/// One sampled observation of one bird.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BirdData {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub heading: f64,
    pub time: u64,
}

/// Accumulates periodic observations of a flock in memory. The simulation
/// itself is transient; whoever drains the data decides what to do with it.
pub struct Birdwatcher {
    locations: Vec<BirdData>,
    render_ticker: u64,
    sample_rate: u64,
}

impl Birdwatcher {
    pub fn new(sample_rate: u64) -> Self {
        Birdwatcher {
            locations: Vec::new(),
            render_ticker: 0,
            sample_rate: sample_rate.max(1),
        }
    }

    /// Triggers data collection; only every `sample_rate`-th call actually
    /// samples.
    pub fn watch(&mut self, flock: &Flock) {
        if !self.should_sample() {
            return;
        }

        let time = self.render_ticker / self.sample_rate;
        let mut current_locations: Vec<BirdData> = flock
            .birds()
            .iter()
            .map(|bird| {
                let state = bird.state();
                BirdData {
                    id: bird.id,
                    x: state.position.x,
                    y: state.position.y,
                    heading: state.heading,
                    time,
                }
            })
            .collect();

        self.locations.append(&mut current_locations);
    }

    pub fn restart(&mut self) {
        self.locations.clear();
    }

    /// Returns everything observed so far, emptying the watcher's memory.
    pub fn pop_data(&mut self) -> Vec<BirdData> {
        mem::take(&mut self.locations)
    }

    fn should_sample(&mut self) -> bool {
        self.render_ticker += 1;
        self.render_ticker % self.sample_rate == 0
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        flock::Flock,
        options::RunOptions,
        random::RandomSource,
    };

    use super::Birdwatcher;

    fn small_flock() -> Flock {
        let run_options = RunOptions {
            init_birds: 3,
            ..Default::default()
        };
        Flock::new(&run_options, &mut RandomSource::new(1)).unwrap()
    }

    #[test]
    fn samples_every_nth_watch() {
        let flock = small_flock();
        let mut watcher = Birdwatcher::new(2);

        for _ in 0..5 {
            watcher.watch(&flock);
        }

        // watches 2 and 4 sampled, 3 birds each
        let data = watcher.pop_data();
        assert_eq!(data.len(), 2 * flock.len());
        assert_eq!(data[0].time, 1);
        assert_eq!(data[flock.len()].time, 2);
    }

    #[test]
    fn restart_discards_accumulated_samples() {
        let flock = small_flock();
        let mut watcher = Birdwatcher::new(1);

        watcher.watch(&flock);
        watcher.restart();
        assert!(watcher.pop_data().is_empty());

        // the watcher keeps sampling after a restart
        watcher.watch(&flock);
        assert_eq!(watcher.pop_data().len(), flock.len());
    }

    #[test]
    fn pop_data_drains() {
        let flock = small_flock();
        let mut watcher = Birdwatcher::new(1);

        watcher.watch(&flock);
        assert_eq!(watcher.pop_data().len(), flock.len());
        assert!(watcher.pop_data().is_empty());
    }

    #[test]
    fn zero_sample_rate_degrades_to_every_watch() {
        let flock = small_flock();
        let mut watcher = Birdwatcher::new(0);

        watcher.watch(&flock);
        assert_eq!(watcher.pop_data().len(), flock.len());
    }
}
