use std::sync::RwLock;

use glam::DVec2;

use crate::{
    math_helpers::{
        clamp_magnitude, heading_deg, steering_delta, tor_vec, toroidal_distance,
        velocity_from_heading, wrap_component,
    },
    options::{RunOptions, Weights},
};

/// Last-computed per-rule steering vectors. Retained for observability
/// only; correctness never depends on them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RuleVectors {
    pub separation: DVec2,
    pub cohesion: DVec2,
    pub alignment: DVec2,
}

/// The state a bird publishes each tick. Always internally consistent:
/// it is copied out and written back as one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdState {
    /// World coordinates, always inside the usable rectangle.
    pub position: DVec2,
    /// Magnitude never exceeds `max_speed`.
    pub velocity: DVec2,
    /// Degrees, derived from the velocity direction.
    pub heading: f64,
    pub steer: RuleVectors,
}

/// One flocking agent. Created at flock construction, never destroyed.
///
/// Only the bird's own task writes `state`; every other bird's task reads
/// it during neighbour scans. The lock is scoped to this bird alone, so a
/// reader may observe a neighbour one tick stale but never a torn
/// position/velocity/heading triple.
#[derive(Debug)]
pub struct Bird {
    /// Sequential id starting from 0; stable for the run's lifetime.
    pub id: usize,
    pub weights: Weights,
    state: RwLock<BirdState>,
}

impl Bird {
    /// Creates a new [`Bird`] at `position`, flying toward `heading`
    /// (degrees) at `speed`.
    pub fn new(id: usize, position: DVec2, heading: f64, speed: f64, weights: Weights) -> Self {
        Bird {
            id,
            weights,
            state: RwLock::new(BirdState {
                position,
                velocity: velocity_from_heading(speed, heading),
                heading,
                steer: RuleVectors::default(),
            }),
        }
    }

    /// Copy of the currently published state.
    pub fn state(&self) -> BirdState {
        *self.state.read().unwrap()
    }

    /// Steer away from every neighbour within sensing range: mean of unit
    /// vectors pointing from each neighbour toward this bird. Zero when the
    /// neighbourhood is empty.
    pub fn separation(
        &self,
        current: &BirdState,
        flock: &[BirdState],
        run_options: &RunOptions,
    ) -> DVec2 {
        let mut away = DVec2::ZERO;
        let mut count = 0;

        for other in flock {
            let distance = toroidal_distance(current.position, other.position, &run_options.world);
            // distance-to-self is 0, so the strict lower bound excludes us
            if distance > 0. && distance <= run_options.sensory_distance {
                away += tor_vec(other.position, current.position, &run_options.world) / distance;
                count += 1;
            }
        }

        if count > 0 {
            steering_delta(
                away / count as f64,
                current.velocity,
                run_options.max_speed,
                run_options.max_force,
            )
        } else {
            DVec2::ZERO
        }
    }

    /// Steer toward the local centroid of the neighbourhood. The centroid is
    /// accumulated as toroidal displacements from this bird, so a cluster on
    /// the far side of the seam pulls through the seam, not across the whole
    /// world. Zero when the neighbourhood is empty.
    pub fn cohesion(
        &self,
        current: &BirdState,
        flock: &[BirdState],
        run_options: &RunOptions,
    ) -> DVec2 {
        let mut center = DVec2::ZERO;
        let mut count = 0;

        for other in flock {
            let distance = toroidal_distance(current.position, other.position, &run_options.world);
            if distance > 0. && distance <= run_options.sensory_distance {
                center += tor_vec(current.position, other.position, &run_options.world);
                count += 1;
            }
        }

        if count > 0 {
            steering_delta(
                center / count as f64,
                current.velocity,
                run_options.max_speed,
                run_options.max_force,
            )
        } else {
            DVec2::ZERO
        }
    }

    /// Steer toward the mean velocity of the neighbourhood. Zero when the
    /// neighbourhood is empty, or when the neighbours' velocities cancel
    /// out exactly.
    pub fn alignment(
        &self,
        current: &BirdState,
        flock: &[BirdState],
        run_options: &RunOptions,
    ) -> DVec2 {
        let mut avg = DVec2::ZERO;
        let mut count = 0;

        for other in flock {
            let distance = toroidal_distance(current.position, other.position, &run_options.world);
            if distance > 0. && distance <= run_options.sensory_distance {
                avg += other.velocity;
                count += 1;
            }
        }

        if count > 0 {
            steering_delta(
                avg / count as f64,
                current.velocity,
                run_options.max_speed,
                run_options.max_force,
            )
        } else {
            DVec2::ZERO
        }
    }

    /// One integration step against a snapshot of the flock: run the three
    /// rules, combine them by this bird's weights, cap the new velocity,
    /// derive the heading and wrap the position back into the world.
    ///
    /// The result is committed under the bird's own lock as a single write,
    /// so concurrent readers only ever see complete states.
    pub fn update_position(&self, flock: &[BirdState], run_options: &RunOptions) {
        let current = self.state();

        let steer = RuleVectors {
            separation: self.separation(&current, flock, run_options),
            cohesion: self.cohesion(&current, flock, run_options),
            alignment: self.alignment(&current, flock, run_options),
        };

        let force = steer.separation * self.weights.separation
            + steer.cohesion * self.weights.cohesion
            + steer.alignment * self.weights.alignment;

        let velocity = clamp_magnitude(current.velocity + force, run_options.max_speed);

        // a bird brought to a complete stop keeps pointing where it was
        let heading = if velocity.length_squared() == 0. {
            current.heading
        } else {
            heading_deg(velocity)
        };

        let next = current.position + velocity;
        let position = DVec2::new(
            wrap_component(next.x, run_options.world.min(), run_options.world.max()),
            wrap_component(next.y, run_options.world.min(), run_options.world.max()),
        );

        *self.state.write().unwrap() = BirdState {
            position,
            velocity,
            heading,
            steer,
        };
    }
}
