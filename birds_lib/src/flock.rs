use std::f64::consts::TAU;

use glam::DVec2;

use crate::{
    bird::{Bird, BirdState},
    options::{ConfigError, RunOptions, WorldBounds},
    random::RandomSource,
};

/// Fixed-length collection of birds, created once at startup and shared by
/// reference among all bird tasks. No insertion or removal after
/// construction; a bird's index is its identity for the run's lifetime.
#[derive(Debug)]
pub struct Flock {
    birds: Vec<Bird>,
    run_options: RunOptions,
}

impl Flock {
    /// Validates the configuration and spawns the birds inside a disk of
    /// `spawn_radius` around the world center, each with a random heading
    /// and the configured initial speed.
    pub fn new(run_options: &RunOptions, rng: &mut RandomSource) -> Result<Self, ConfigError> {
        run_options.validate()?;

        let birds = (0..run_options.init_birds)
            .map(|id| spawn_bird(id, run_options, rng))
            .collect();

        Ok(Flock {
            birds,
            run_options: run_options.clone(),
        })
    }

    pub fn run_options(&self) -> &RunOptions {
        &self.run_options
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.run_options.world
    }

    pub fn len(&self) -> usize {
        self.birds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.birds.is_empty()
    }

    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    /// Copies every bird's currently published state. Each copy is taken
    /// under that bird's own lock; the collection as a whole is not a
    /// barrier-synchronized instant, which the steering model tolerates.
    pub fn snapshot(&self) -> Vec<BirdState> {
        self.birds.iter().map(Bird::state).collect()
    }

    /// Read-only view for a renderer: one `(position, heading)` pair per
    /// bird, for drawing an oriented marker.
    pub fn render_view(&self) -> Vec<(DVec2, f64)> {
        self.birds
            .iter()
            .map(|bird| {
                let state = bird.state();
                (state.position, state.heading)
            })
            .collect()
    }

    /// One synchronous integration step for every bird against a common
    /// snapshot. The sequential counterpart of the scheduler's free-running
    /// tasks, used by the offline driver, tests and benches.
    pub fn step(&self) {
        let snapshot = self.snapshot();
        for bird in &self.birds {
            bird.update_position(&snapshot, &self.run_options);
        }
    }
}

fn spawn_bird(id: usize, run_options: &RunOptions, rng: &mut RandomSource) -> Bird {
    let angle = rng.uniform(0., TAU);
    // sqrt keeps the placement uniform over the disk area
    let radius = rng.uniform(0., 1.).sqrt() * run_options.spawn_radius;
    let position =
        run_options.world.center() + radius * DVec2::new(angle.cos(), angle.sin());
    let heading = rng.uniform(0., 360.);

    Bird::new(
        id,
        position,
        heading,
        run_options.init_speed,
        run_options.weights,
    )
}
