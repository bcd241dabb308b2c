use std::time::Duration;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance on the rule-weight sum check.
pub const WEIGHT_SUM_EPSILON: f64 = 1e-6;

/// Configuration rejected before any simulation state is created.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("flock needs at least one bird")]
    NoBirds,

    #[error("{rule} weight {value} is outside [0, 1]")]
    WeightOutOfRange { rule: &'static str, value: f64 },

    #[error("rule weights must sum to 1, got {sum}")]
    WeightSumMismatch { sum: f64 },

    #[error("world of dimension {dimension} with padding {padding} has no usable interior")]
    DegenerateWorld { dimension: f64, padding: f64 },

    #[error("spawn radius {radius} exceeds the usable half-width {half_width}")]
    SpawnRadiusTooLarge { radius: f64, half_width: f64 },
}

/// Per-rule steering weights. Each lies in [0, 1] and together they sum
/// to 1 within [`WEIGHT_SUM_EPSILON`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub separation: f64,
    pub cohesion: f64,
    pub alignment: f64,
}

impl Weights {
    pub fn new(separation: f64, cohesion: f64, alignment: f64) -> Self {
        Weights {
            separation,
            cohesion,
            alignment,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (rule, value) in [
            ("separation", self.separation),
            ("cohesion", self.cohesion),
            ("alignment", self.alignment),
        ] {
            if !(0. ..=1.).contains(&value) {
                return Err(ConfigError::WeightOutOfRange { rule, value });
            }
        }

        let sum = self.separation + self.cohesion + self.alignment;
        if (sum - 1.).abs() > WEIGHT_SUM_EPSILON {
            return Err(ConfigError::WeightSumMismatch { sum });
        }

        Ok(())
    }
}

impl Default for Weights {
    fn default() -> Self {
        Weights::new(0.34, 0.33, 0.33)
    }
}

/// Square world geometry. The usable toroidal rectangle is
/// `[padding, dimension - padding]` on each axis; positions never leave it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub dimension: f64,
    pub padding: f64,
}

impl WorldBounds {
    pub fn new(dimension: f64, padding: f64) -> Self {
        WorldBounds { dimension, padding }
    }

    /// Lowest reachable coordinate on either axis.
    pub fn min(&self) -> f64 {
        self.padding
    }

    /// Highest reachable coordinate on either axis.
    pub fn max(&self) -> f64 {
        self.dimension - self.padding
    }

    /// Circumference of the torus per axis.
    pub fn size(&self) -> f64 {
        self.dimension - 2. * self.padding
    }

    pub fn center(&self) -> DVec2 {
        DVec2::splat(self.dimension / 2.)
    }

    pub fn contains(&self, p: DVec2) -> bool {
        (self.min()..=self.max()).contains(&p.x) && (self.min()..=self.max()).contains(&p.y)
    }
}

/// Immutable run configuration, validated once before the flock is built.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub init_birds: usize,
    pub weights: Weights,
    pub world: WorldBounds,

    /// Radius of the spawn disk around the world center.
    pub spawn_radius: f64,
    /// Speed each bird starts with (VInit).
    pub init_speed: f64,
    /// Velocity magnitude cap (Vmax).
    pub max_speed: f64,
    /// Per-tick steering-force cap (Fmax).
    pub max_force: f64,
    /// Neighbour-sensing radius shared by all three rules (Dmax).
    pub sensory_distance: f64,

    /// Per-bird tick scaling; the scheduler sleeps `tick_per_bird * n`
    /// between steps, a throttle rather than a correctness knob.
    pub tick_per_bird: Duration,
    /// Birdwatcher keeps every `sample_rate`-th observation.
    pub sample_rate: u64,
    pub seed: u64,
}

impl RunOptions {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.init_birds == 0 {
            return Err(ConfigError::NoBirds);
        }

        self.weights.validate()?;

        if self.world.size() <= 0. {
            return Err(ConfigError::DegenerateWorld {
                dimension: self.world.dimension,
                padding: self.world.padding,
            });
        }

        let half_width = self.world.size() / 2.;
        if self.spawn_radius > half_width {
            return Err(ConfigError::SpawnRadiusTooLarge {
                radius: self.spawn_radius,
                half_width,
            });
        }

        Ok(())
    }

    /// Tick interval of every bird task, coarser as the population grows.
    /// Saturates instead of overflowing for absurd populations.
    pub fn tick_interval(&self) -> Duration {
        let nanos = self
            .tick_per_bird
            .as_nanos()
            .saturating_mul(self.init_birds as u128);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            init_birds: 128,
            weights: Weights::default(),
            world: WorldBounds::new(640., 30.),
            spawn_radius: 100.,
            init_speed: 1.0,
            max_speed: 2.0,
            max_force: 0.03,
            sensory_distance: 25.,
            tick_per_bird: Duration::from_micros(400),
            sample_rate: 1,
            seed: 123456789,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rstest::rstest;

    use super::{ConfigError, RunOptions, Weights, WorldBounds};

    #[rstest]
    #[case(0.5, 0.5, 0.2, false)] // sums to 1.2
    #[case(0.3, 0.3, 0.4, true)]
    #[case(1.0, 0.0, 0.0, true)]
    #[case(-0.1, 0.6, 0.5, false)]
    #[case(0.2, 1.1, -0.3, false)]
    fn weight_validation(#[case] s: f64, #[case] c: f64, #[case] a: f64, #[case] ok: bool) {
        assert_eq!(Weights::new(s, c, a).validate().is_ok(), ok);
    }

    #[test]
    fn weight_sum_tolerates_epsilon() {
        let w = Weights::new(1. / 3., 1. / 3., 1. / 3.);
        assert!(w.validate().is_ok());
    }

    #[test]
    fn zero_bird_count_is_rejected() {
        let run_options = RunOptions {
            init_birds: 0,
            ..Default::default()
        };
        assert_eq!(run_options.validate(), Err(ConfigError::NoBirds));
    }

    #[test]
    fn degenerate_world_is_rejected() {
        let run_options = RunOptions {
            world: WorldBounds::new(40., 20.),
            ..Default::default()
        };
        assert!(matches!(
            run_options.validate(),
            Err(ConfigError::DegenerateWorld { .. })
        ));
    }

    #[test]
    fn oversized_spawn_disk_is_rejected() {
        let run_options = RunOptions {
            spawn_radius: 400.,
            ..Default::default()
        };
        assert!(matches!(
            run_options.validate(),
            Err(ConfigError::SpawnRadiusTooLarge { .. })
        ));
    }

    #[test]
    fn defaults_validate() {
        assert!(RunOptions::default().validate().is_ok());
    }

    #[test]
    fn tick_interval_scales_with_flock_size() {
        let run_options = RunOptions {
            init_birds: 25,
            tick_per_bird: Duration::from_micros(400),
            ..Default::default()
        };
        assert_eq!(run_options.tick_interval(), Duration::from_millis(10));
    }

    #[test]
    fn tick_interval_saturates_instead_of_overflowing() {
        let run_options = RunOptions {
            init_birds: usize::MAX,
            tick_per_bird: Duration::from_secs(1),
            ..Default::default()
        };
        assert_eq!(
            run_options.tick_interval(),
            Duration::from_nanos(u64::MAX)
        );
    }

    #[test]
    fn world_bounds_geometry() {
        let world = WorldBounds::new(640., 30.);
        assert_eq!(world.min(), 30.);
        assert_eq!(world.max(), 610.);
        assert_eq!(world.size(), 580.);
        assert_eq!(world.center().x, 320.);
    }
}
