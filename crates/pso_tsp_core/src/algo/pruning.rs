use rand::Rng;

use crate::{City, swarm::Swarm};

/// Elitist culling: after each generation the most expensive fraction of the swarm is
/// replaced by brand-new random particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PruningPolicy {
    pub percentage: usize,
}

impl PruningPolicy {
    pub fn new(percentage: usize) -> Self {
        Self { percentage }
    }

    /// `population * percentage / 100`, rounded down.
    pub fn prune_count(&self, population: usize) -> usize {
        (population * self.percentage / 100).min(population)
    }

    /// Sorts the swarm by cost and reseeds its tail. Returns how many particles were reseeded.
    ///
    /// The global best is never touched here; reseeded particles only lose their own
    /// personal-best memory.
    pub fn prune<R: Rng + ?Sized>(&self, swarm: &mut Swarm, cities: &[City], rng: &mut R) -> usize {
        swarm.sort_by_cost();

        let population = swarm.len();
        let count = self.prune_count(population);
        for idx in (population - count)..population {
            let id = swarm.allocate_id();
            swarm.particles[idx].reseed(id, cities, rng);
        }

        log::trace!("prune: reseeded={count} population={population}");
        count
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::{SeedableRng, rngs::StdRng};

    use super::PruningPolicy;
    use crate::{
        City,
        swarm::{GlobalBest, Swarm, permutation::is_permutation},
    };

    fn cities(n: usize) -> Vec<City> {
        let mut rng = StdRng::seed_from_u64(99);
        (0..n).map(|_| City::random(&mut rng)).collect()
    }

    #[test]
    fn prune_count_uses_integer_division() {
        assert_eq!(PruningPolicy::new(10).prune_count(500), 50);
        assert_eq!(PruningPolicy::new(10).prune_count(19), 1);
        assert_eq!(PruningPolicy::new(10).prune_count(9), 0);
        assert_eq!(PruningPolicy::new(0).prune_count(500), 0);
        assert_eq!(PruningPolicy::new(100).prune_count(7), 7);
    }

    #[test]
    fn prune_reseeds_exactly_the_worst_tenth() {
        let cities = cities(20);
        let mut rng = StdRng::seed_from_u64(1);
        let mut best = GlobalBest::default();
        let mut swarm = Swarm::initialize(500, &cities, &mut best, &mut rng);

        let mut ranked: Vec<(u64, f64, Vec<usize>)> = swarm
            .particles()
            .iter()
            .map(|p| (p.id(), p.cost(), p.position().to_vec()))
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        let survivors: HashMap<u64, Vec<usize>> = ranked[..450]
            .iter()
            .map(|(id, _, tour)| (*id, tour.clone()))
            .collect();
        let old_ids: HashSet<u64> = ranked.iter().map(|(id, _, _)| *id).collect();
        let best_before = best.clone();

        let reseeded = PruningPolicy::new(10).prune(&mut swarm, &cities, &mut rng);

        assert_eq!(reseeded, 50);
        assert_eq!(swarm.len(), 500);

        let head = &swarm.particles()[..450];
        let tail = &swarm.particles()[450..];
        for particle in head {
            let tour = survivors
                .get(&particle.id())
                .expect("top particles keep their identity");
            assert_eq!(particle.position(), tour.as_slice());
        }
        for particle in tail {
            assert!(!old_ids.contains(&particle.id()));
            assert!(is_permutation(particle.position(), cities.len()));
            assert_eq!(particle.best_position(), particle.position());
            assert_eq!(particle.best_cost(), particle.cost());
        }
        assert_eq!(best, best_before);
    }

    #[test]
    fn prune_with_zero_percentage_only_sorts() {
        let cities = cities(10);
        let mut rng = StdRng::seed_from_u64(2);
        let mut best = GlobalBest::default();
        let mut swarm = Swarm::initialize(30, &cities, &mut best, &mut rng);
        let ids: HashSet<u64> = swarm.particles().iter().map(|p| p.id()).collect();

        assert_eq!(PruningPolicy::new(0).prune(&mut swarm, &cities, &mut rng), 0);

        let after: HashSet<u64> = swarm.particles().iter().map(|p| p.id()).collect();
        assert_eq!(ids, after);
        assert!(
            swarm
                .particles()
                .windows(2)
                .all(|w| w[0].cost() <= w[1].cost())
        );
    }
}
