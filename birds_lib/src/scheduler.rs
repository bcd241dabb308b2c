use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use crate::flock::Flock;

/// Runs every bird as an independently progressing task: one thread per
/// bird, each looping sleep-then-step with no barrier between birds.
///
/// Ticks are never synchronized across the flock; a bird reads whatever its
/// neighbours last published. The tick interval scales with flock size
/// (see [`RunOptions::tick_interval`](crate::options::RunOptions::tick_interval)),
/// a throttle rather than a correctness requirement.
#[derive(Debug)]
pub struct FlockScheduler {
    flock: Arc<Flock>,
    halt: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl FlockScheduler {
    /// Spawns one update loop per bird. The loops run until [`stop`](Self::stop)
    /// (or, in the original model, until the process is killed).
    pub fn start(flock: Arc<Flock>) -> Self {
        let halt = Arc::new(AtomicBool::new(false));
        let tick = flock.run_options().tick_interval();

        let handles = (0..flock.len())
            .map(|id| {
                let flock = Arc::clone(&flock);
                let halt = Arc::clone(&halt);

                thread::spawn(move || {
                    while !halt.load(Ordering::Relaxed) {
                        thread::sleep(tick);
                        let snapshot = flock.snapshot();
                        flock.birds()[id].update_position(&snapshot, flock.run_options());
                    }
                })
            })
            .collect();

        FlockScheduler {
            flock,
            halt,
            handles,
        }
    }

    pub fn flock(&self) -> &Arc<Flock> {
        &self.flock
    }

    /// Signals every bird task to finish its current tick and joins them.
    pub fn stop(self) {
        self.halt.store(true, Ordering::Relaxed);
        for handle in self.handles {
            let _ = handle.join();
        }
    }
}
