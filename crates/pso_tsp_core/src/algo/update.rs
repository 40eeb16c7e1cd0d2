//! Particle-swarm update adapted to permutations.
//!
//! Instead of a velocity, each position `i` is swapped with the position named by the
//! personal-best tour at `i` (cognitive pull) and by the global-best tour at `i` (social
//! pull). The pull strengths are used directly as swap probabilities. With the classic
//! PSO coefficients (~1.49) both swaps happen at every position, which makes the rule
//! converge aggressively; smaller values soften it.

use rand::{Rng, seq::SliceRandom};

use crate::{
    City,
    algo::{chance, perturbation::Perturbation},
    swarm::{GlobalBest, Particle},
};

/// Per-iteration state handed to the update rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Generation {
    pub iteration: usize,
    /// Linearly decaying weight. Available to the rule but not consumed by the swap logic.
    pub inertia: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub personal_improved: bool,
    pub global_improved: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpdateRule {
    pub cognitive: f64,
    pub social: f64,
}

impl UpdateRule {
    pub fn new(cognitive: f64, social: f64) -> Self {
        Self { cognitive, social }
    }

    /// Moves one particle, re-evaluates it, and folds the result into both bests.
    pub fn update<R: Rng + ?Sized>(
        &self,
        particle: &mut Particle,
        best: &mut GlobalBest,
        _generation: Generation,
        perturbation: &Perturbation,
        cities: &[City],
        rng: &mut R,
    ) -> UpdateOutcome {
        particle.position.shuffle(rng);
        self.pull_towards_bests(particle, best.tour(), rng);
        perturbation.apply(&mut particle.position, rng);
        debug_assert!(crate::swarm::permutation::is_permutation(
            &particle.position,
            cities.len()
        ));

        let cost = particle.evaluate(cities);
        UpdateOutcome {
            personal_improved: particle.remember_if_better(),
            global_improved: best.offer(&particle.position, cost),
        }
    }

    fn pull_towards_bests<R: Rng + ?Sized>(
        &self,
        particle: &mut Particle,
        global_tour: &[usize],
        rng: &mut R,
    ) {
        debug_assert_eq!(global_tour.len(), particle.position.len());

        for i in 0..particle.position.len() {
            if chance(rng, self.cognitive) {
                let target = particle.best_position[i];
                particle.position.swap(i, target);
            }
            if chance(rng, self.social) {
                particle.position.swap(i, global_tour[i]);
            }
        }
    }
}
