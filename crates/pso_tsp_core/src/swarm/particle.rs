use rand::Rng;

use crate::{City, geometry::TourGeometry, swarm::permutation};

/// One candidate tour plus the best tour it has held since it was (re)seeded.
#[derive(Clone, Debug)]
pub struct Particle {
    pub(crate) id: u64,
    pub(crate) position: Vec<usize>,
    pub(crate) best_position: Vec<usize>,
    pub(crate) cost: f64,
    pub(crate) best_cost: f64,
}

impl Particle {
    pub(crate) fn fresh<R: Rng + ?Sized>(id: u64, cities: &[City], rng: &mut R) -> Self {
        let position = permutation::random(cities.len(), rng);
        let cost = TourGeometry::tour_length(cities, &position);
        Self {
            id,
            best_position: position.clone(),
            position,
            cost,
            best_cost: cost,
        }
    }

    /// Replaces the whole state, personal best included, with a new random tour.
    pub(crate) fn reseed<R: Rng + ?Sized>(&mut self, id: u64, cities: &[City], rng: &mut R) {
        permutation::reshuffle_from_identity(&mut self.position, rng);
        self.id = id;
        self.cost = TourGeometry::tour_length(cities, &self.position);
        self.best_position.clone_from(&self.position);
        self.best_cost = self.cost;
    }

    pub(crate) fn evaluate(&mut self, cities: &[City]) -> f64 {
        self.cost = TourGeometry::tour_length(cities, &self.position);
        self.cost
    }

    /// Promotes the current tour to personal best when it is strictly cheaper.
    pub(crate) fn remember_if_better(&mut self) -> bool {
        if self.cost < self.best_cost {
            self.best_cost = self.cost;
            self.best_position.clone_from(&self.position);
            true
        } else {
            false
        }
    }

    /// Changes every time the particle is reseeded by pruning.
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn position(&self) -> &[usize] {
        &self.position
    }

    pub fn best_position(&self) -> &[usize] {
        &self.best_position
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }
}
