pub mod global_best;
pub mod particle;
pub mod permutation;

use rand::Rng;

use crate::City;

pub use global_best::GlobalBest;
pub use particle::Particle;

/// Fixed-size population. Order is insertion order until the first pruning pass sorts it.
#[derive(Clone, Debug)]
pub struct Swarm {
    pub(crate) particles: Vec<Particle>,
    next_id: u64,
}

impl Swarm {
    /// Draws `population` independent random tours and folds each into `best`.
    pub fn initialize<R: Rng + ?Sized>(
        population: usize,
        cities: &[City],
        best: &mut GlobalBest,
        rng: &mut R,
    ) -> Self {
        let mut swarm = Self {
            particles: Vec::with_capacity(population),
            next_id: 0,
        };

        for _ in 0..population {
            let id = swarm.allocate_id();
            let particle = Particle::fresh(id, cities, rng);
            best.offer(&particle.position, particle.cost);
            swarm.particles.push(particle);
        }

        log::debug!(
            "swarm: init particles={population} cities={} best={:.2}",
            cities.len(),
            best.cost()
        );

        swarm
    }

    pub(crate) fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Ascending by current cost. Equal costs keep their relative order.
    pub(crate) fn sort_by_cost(&mut self) {
        self.particles.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
