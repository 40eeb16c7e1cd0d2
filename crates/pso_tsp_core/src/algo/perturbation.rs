use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::{Error, Result, algo::chance};

/// Random swap mutation followed by Gaussian-rate position swaps.
#[derive(Clone, Debug)]
pub struct Perturbation {
    mutation_rate: f64,
    gaussian: Normal<f64>,
}

impl Perturbation {
    pub fn new(mutation_rate: f64, gaussian_stddev: f64) -> Result<Self> {
        let gaussian = Normal::new(0.0, gaussian_stddev).map_err(|e| {
            Error::invalid_input(format!(
                "invalid gaussian standard deviation {gaussian_stddev}: {e}"
            ))
        })?;
        Ok(Self {
            mutation_rate,
            gaussian,
        })
    }

    /// Mutation, then Gaussian swaps.
    pub fn apply<R: Rng + ?Sized>(&self, tour: &mut [usize], rng: &mut R) {
        self.mutate(tour, rng);
        self.gaussian_swaps(tour, rng);
    }

    /// With probability `mutation_rate`, swaps two positions drawn with replacement.
    pub fn mutate<R: Rng + ?Sized>(&self, tour: &mut [usize], rng: &mut R) -> bool {
        if tour.is_empty() || !chance(rng, self.mutation_rate) {
            return false;
        }
        let a = rng.random_range(0..tour.len());
        let b = rng.random_range(0..tour.len());
        tour.swap(a, b);
        true
    }

    /// Every position `i` draws `g ~ N(0, stddev)` and swaps with a random position
    /// with probability `|g|`. Returns the number of swaps performed (self-swaps included).
    pub fn gaussian_swaps<R: Rng + ?Sized>(&self, tour: &mut [usize], rng: &mut R) -> usize {
        let n = tour.len();
        let mut swaps = 0;
        for i in 0..n {
            let g = self.gaussian.sample(rng);
            if chance(rng, g.abs()) {
                let j = rng.random_range(0..n);
                tour.swap(i, j);
                swaps += 1;
            }
        }
        swaps
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::Perturbation;
    use crate::swarm::permutation::{identity, is_permutation};

    #[test]
    fn new_rejects_invalid_stddev() {
        let err = Perturbation::new(0.1, f64::NAN).expect_err("nan stddev should fail");
        assert!(err.to_string().contains("invalid gaussian standard deviation"));
    }

    #[test]
    fn mutate_never_fires_at_zero_rate() {
        let perturbation = Perturbation::new(0.0, 0.1).expect("valid perturbation");
        let mut rng = StdRng::seed_from_u64(1);
        let mut tour = identity(10);
        for _ in 0..500 {
            assert!(!perturbation.mutate(&mut tour, &mut rng));
        }
        assert_eq!(tour, identity(10));
    }

    #[test]
    fn mutate_always_fires_at_full_rate_and_keeps_permutation() {
        let perturbation = Perturbation::new(1.0, 0.1).expect("valid perturbation");
        let mut rng = StdRng::seed_from_u64(2);
        let mut tour = identity(10);
        for _ in 0..500 {
            assert!(perturbation.mutate(&mut tour, &mut rng));
            assert!(is_permutation(&tour, 10));
        }
    }

    #[test]
    fn zero_stddev_never_swaps() {
        let perturbation = Perturbation::new(0.0, 0.0).expect("valid perturbation");
        let mut rng = StdRng::seed_from_u64(3);
        let mut tour = identity(25);
        assert_eq!(perturbation.gaussian_swaps(&mut tour, &mut rng), 0);
        assert_eq!(tour, identity(25));
    }

    #[test]
    fn gaussian_swap_rate_matches_half_normal_mean() {
        // E|g| for g ~ N(0, 0.1) is 0.1 * sqrt(2 / pi) ~= 0.0798.
        let perturbation = Perturbation::new(0.0, 0.1).expect("valid perturbation");
        let mut rng = StdRng::seed_from_u64(4);
        let mut tour = identity(100);
        let mut swaps = 0;
        for _ in 0..200 {
            swaps += perturbation.gaussian_swaps(&mut tour, &mut rng);
            assert!(is_permutation(&tour, 100));
        }
        let rate = swaps as f64 / 20_000.0;
        assert!((0.07..0.09).contains(&rate), "rate={rate}");
    }

    #[test]
    fn apply_keeps_permutation_for_two_cities() {
        let perturbation = Perturbation::new(1.0, 5.0).expect("valid perturbation");
        let mut rng = StdRng::seed_from_u64(5);
        let mut tour = identity(2);
        for _ in 0..100 {
            perturbation.apply(&mut tour, &mut rng);
            assert!(is_permutation(&tour, 2));
        }
    }
}
