use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Seeded uniform-deviate source, passed explicitly to whatever needs
/// deviates (no process-wide instance). Only consumed during flock
/// bootstrap: initial placement and initial heading.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: Xoshiro256PlusPlus,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        RandomSource {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Uniform deviate in `[a, b)`.
    ///
    /// # Panics
    /// When `a >= b`; the interval is a caller contract.
    pub fn uniform(&mut self, a: f64, b: f64) -> f64 {
        assert!(a < b, "uniform(a, b) requires a < b, got [{a}, {b})");
        a + (b - a) * self.rng.gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::RandomSource;

    #[test]
    fn same_seed_same_sequence() {
        let mut first = RandomSource::new(42);
        let mut second = RandomSource::new(42);

        for _ in 0..64 {
            assert_eq!(first.uniform(-3., 7.), second.uniform(-3., 7.));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut first = RandomSource::new(1);
        let mut second = RandomSource::new(2);

        let same = (0..16).all(|_| first.uniform(0., 1.) == second.uniform(0., 1.));
        assert!(!same);
    }

    #[test]
    fn deviates_stay_in_the_interval() {
        let mut rng = RandomSource::new(7);
        for _ in 0..1000 {
            let u = rng.uniform(2., 5.);
            assert!((2. ..5.).contains(&u));
        }
    }

    #[test]
    #[should_panic(expected = "requires a < b")]
    fn degenerate_interval_panics() {
        RandomSource::new(0).uniform(1., 1.);
    }
}
