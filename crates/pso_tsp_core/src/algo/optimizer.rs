use pso_tsp_derive::KvDisplay;
use rand::Rng;

use crate::{
    City, Error, Result, SwarmOptions,
    algo::{
        perturbation::Perturbation,
        pruning::PruningPolicy,
        update::{Generation, UpdateRule},
    },
    constants::MIN_CITIES,
    swarm::{GlobalBest, Swarm},
    tour::Route,
};

/// Linear decay from `initial` at iteration 0 toward `last` at `iterations`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InertiaSchedule {
    pub initial: f64,
    pub last: f64,
    pub iterations: usize,
}

impl InertiaSchedule {
    pub fn weight_at(&self, iteration: usize) -> f64 {
        if self.iterations == 0 {
            return self.initial;
        }
        self.initial - (self.initial - self.last) * iteration as f64 / self.iterations as f64
    }
}

/// What a finished run leaves behind for the reporter.
#[derive(Clone, Debug, KvDisplay)]
pub struct RunSummary {
    pub seed: u64,
    pub iterations: usize,
    pub improvements: usize,
    pub best_cost: f64,
    #[kv(skip)]
    pub best_tour: Vec<usize>,
    /// Global-best cost after each iteration.
    #[kv(name = "history_len", fmt = "len")]
    pub history: Vec<f64>,
}

impl RunSummary {
    pub fn route(&self) -> Route {
        Route::new(self.best_tour.clone(), self.best_cost)
    }
}

/// Drives the swarm one generation at a time: update every particle, then prune.
pub struct Optimizer<'a, R: Rng> {
    cities: &'a [City],
    swarm: Swarm,
    best: GlobalBest,
    rule: UpdateRule,
    perturbation: Perturbation,
    pruning: PruningPolicy,
    schedule: InertiaSchedule,
    iteration: usize,
    progress_interval: usize,
    seed: u64,
    improvements: usize,
    history: Vec<f64>,
    rng: R,
}

impl<'a, R: Rng> Optimizer<'a, R> {
    /// Validates `options`, then builds and scores the initial swarm.
    pub fn new(cities: &'a [City], options: &SwarmOptions, mut rng: R) -> Result<Self> {
        options.validate()?;
        if cities.len() < MIN_CITIES {
            return Err(Error::invalid_input(format!(
                "at least {MIN_CITIES} cities are required, got {}",
                cities.len()
            )));
        }

        let perturbation = Perturbation::new(options.mutation_rate, options.gaussian_stddev)?;
        let mut best = GlobalBest::default();
        let swarm = Swarm::initialize(options.particles, cities, &mut best, &mut rng);

        log::info!(
            "optimizer: start cities={} particles={} iterations={} seed={} best={:.2}",
            cities.len(),
            options.particles,
            options.iterations,
            options.seed,
            best.cost()
        );

        Ok(Self {
            cities,
            swarm,
            best,
            rule: UpdateRule::new(options.cognitive, options.social),
            perturbation,
            pruning: PruningPolicy::new(options.prune_percentage),
            schedule: InertiaSchedule {
                initial: options.initial_inertia,
                last: options.final_inertia,
                iterations: options.iterations,
            },
            iteration: 0,
            progress_interval: options.progress_interval,
            seed: options.seed,
            improvements: 0,
            history: Vec::with_capacity(options.iterations),
            rng,
        })
    }

    /// Runs one generation. Returns `false` once the iteration budget is spent.
    pub fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        let generation = Generation {
            iteration: self.iteration,
            inertia: self.schedule.weight_at(self.iteration),
        };

        let mut improved = 0;
        for particle in self.swarm.particles.iter_mut() {
            let outcome = self.rule.update(
                particle,
                &mut self.best,
                generation,
                &self.perturbation,
                self.cities,
                &mut self.rng,
            );
            if outcome.global_improved {
                improved += 1;
            }
        }
        if improved > 0 {
            self.improvements += improved;
            log::debug!(
                "optimizer: new best iter={} best={:.2}",
                self.iteration,
                self.best.cost()
            );
        }

        self.pruning.prune(&mut self.swarm, self.cities, &mut self.rng);

        self.history.push(self.best.cost());
        self.iteration += 1;

        if self.progress_interval > 0 && self.iteration % self.progress_interval == 0 {
            log::info!(
                "optimizer: iter={}/{} inertia={:.3} best={:.2}",
                self.iteration,
                self.schedule.iterations,
                generation.inertia,
                self.best.cost()
            );
        }

        true
    }

    /// Runs every remaining generation and hands back the result.
    pub fn run(mut self) -> RunSummary {
        while self.step() {}

        log::info!(
            "optimizer: complete iterations={} improvements={} best={:.2}",
            self.iteration,
            self.improvements,
            self.best.cost()
        );

        RunSummary {
            seed: self.seed,
            iterations: self.iteration,
            improvements: self.improvements,
            best_cost: self.best.cost(),
            best_tour: self.best.tour().to_vec(),
            history: self.history,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.iteration >= self.schedule.iterations
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    pub fn best(&self) -> &GlobalBest {
        &self.best
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Inertia weight the next generation will run with.
    pub fn inertia(&self) -> f64 {
        self.schedule.weight_at(self.iteration)
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{SeedableRng, rngs::StdRng};

    use super::{InertiaSchedule, Optimizer};
    use crate::{
        City, SwarmOptions, geometry::TourGeometry, io::input::generate_cities,
        swarm::permutation::is_permutation,
    };

    fn small_options() -> SwarmOptions {
        SwarmOptions {
            particles: 60,
            iterations: 40,
            seed: 21,
            progress_interval: 0,
            ..SwarmOptions::default()
        }
    }

    fn cities(n: usize) -> Vec<City> {
        generate_cities(n, &mut StdRng::seed_from_u64(1234))
    }

    #[test]
    fn inertia_decays_linearly() {
        let schedule = InertiaSchedule {
            initial: 0.9,
            last: 0.4,
            iterations: 2_000,
        };
        assert!((schedule.weight_at(0) - 0.9).abs() < 1e-12);
        assert!((schedule.weight_at(1_000) - 0.65).abs() < 1e-12);
        assert!((schedule.weight_at(2_000) - 0.4).abs() < 1e-12);
        assert!(schedule.weight_at(1_999) > 0.4);
    }

    #[test]
    fn inertia_with_empty_budget_stays_initial() {
        let schedule = InertiaSchedule {
            initial: 0.9,
            last: 0.4,
            iterations: 0,
        };
        assert_eq!(schedule.weight_at(0), 0.9);
    }

    #[test]
    fn new_rejects_single_city() {
        let cities = vec![City::new(1, 1)];
        let err = Optimizer::new(&cities, &small_options(), StdRng::seed_from_u64(1))
            .err()
            .expect("one city should fail");
        assert!(err.to_string().contains("at least 2 cities"));
    }

    #[test]
    fn new_rejects_invalid_options() {
        let cities = cities(5);
        let options = SwarmOptions {
            particles: 0,
            ..small_options()
        };
        let err = Optimizer::new(&cities, &options, StdRng::seed_from_u64(1))
            .err()
            .expect("empty swarm should fail");
        assert!(err.to_string().contains("--particles"));
    }

    #[test]
    fn every_tour_stays_a_permutation_across_the_run() {
        let cities = cities(15);
        let mut optimizer =
            Optimizer::new(&cities, &small_options(), StdRng::seed_from_u64(2)).expect("optimizer");

        while optimizer.step() {
            for particle in optimizer.swarm().particles() {
                assert!(is_permutation(particle.position(), cities.len()));
                assert!(is_permutation(particle.best_position(), cities.len()));
            }
            assert!(is_permutation(optimizer.best().tour(), cities.len()));
        }
    }

    #[test]
    fn global_best_never_increases() {
        let cities = cities(18);
        let mut optimizer =
            Optimizer::new(&cities, &small_options(), StdRng::seed_from_u64(3)).expect("optimizer");
        let mut previous = optimizer.best().cost();

        while optimizer.step() {
            let current = optimizer.best().cost();
            assert!(current <= previous, "best went from {previous} to {current}");
            previous = current;
        }

        let history = optimizer.history();
        assert_eq!(history.len(), 40);
        assert!(history.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn personal_best_never_increases_for_a_living_particle() {
        let cities = cities(12);
        let mut optimizer =
            Optimizer::new(&cities, &small_options(), StdRng::seed_from_u64(4)).expect("optimizer");
        let mut last_seen: HashMap<u64, f64> = HashMap::new();

        while optimizer.step() {
            for particle in optimizer.swarm().particles() {
                if let Some(previous) = last_seen.get(&particle.id()) {
                    assert!(particle.best_cost() <= *previous);
                }
                last_seen.insert(particle.id(), particle.best_cost());
            }
        }
    }

    #[test]
    fn best_cost_matches_best_tour() {
        let cities = cities(14);
        let summary = Optimizer::new(&cities, &small_options(), StdRng::seed_from_u64(5))
            .expect("optimizer")
            .run();

        let recomputed = TourGeometry::tour_length(&cities, &summary.best_tour);
        assert!((summary.best_cost - recomputed).abs() < 1e-9);
        assert_eq!(summary.iterations, 40);
        assert_eq!(summary.seed, 21);
        assert_eq!(summary.route().order, summary.best_tour);
    }

    #[test]
    fn same_seed_reproduces_every_generation() {
        let cities = cities(16);
        let mut a =
            Optimizer::new(&cities, &small_options(), StdRng::seed_from_u64(6)).expect("optimizer");
        let mut b =
            Optimizer::new(&cities, &small_options(), StdRng::seed_from_u64(6)).expect("optimizer");

        loop {
            let stepped_a = a.step();
            let stepped_b = b.step();
            assert_eq!(stepped_a, stepped_b);

            let tours_a: Vec<&[usize]> = a.swarm().particles().iter().map(|p| p.position()).collect();
            let tours_b: Vec<&[usize]> = b.swarm().particles().iter().map(|p| p.position()).collect();
            assert_eq!(tours_a, tours_b);
            assert_eq!(a.best(), b.best());

            if !stepped_a {
                break;
            }
        }
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn two_cities_cost_twice_the_distance() {
        let cities = vec![City::new(10, 10), City::new(13, 14)];
        let summary = Optimizer::new(&cities, &small_options(), StdRng::seed_from_u64(7))
            .expect("optimizer")
            .run();

        assert!((summary.best_cost - 10.0).abs() < 1e-12);
        assert!(is_permutation(&summary.best_tour, 2));
    }

    #[test]
    fn finds_the_perimeter_of_a_small_square() {
        let cities = vec![
            City::new(0, 0),
            City::new(0, 10),
            City::new(10, 10),
            City::new(10, 0),
        ];
        let summary = Optimizer::new(&cities, &small_options(), StdRng::seed_from_u64(8))
            .expect("optimizer")
            .run();

        assert!((summary.best_cost - 40.0).abs() < 1e-9);
    }

    #[test]
    fn zero_iterations_returns_initial_best() {
        let cities = cities(6);
        let options = SwarmOptions {
            iterations: 0,
            ..small_options()
        };
        let optimizer =
            Optimizer::new(&cities, &options, StdRng::seed_from_u64(9)).expect("optimizer");
        let initial = optimizer.best().cost();
        assert!(optimizer.is_finished());

        let summary = optimizer.run();
        assert_eq!(summary.best_cost, initial);
        assert!(summary.history.is_empty());
        assert_eq!(summary.improvements, 0);
    }

    #[test]
    fn inertia_is_exposed_per_generation() {
        let cities = cities(6);
        let options = SwarmOptions {
            iterations: 10,
            ..small_options()
        };
        let mut optimizer =
            Optimizer::new(&cities, &options, StdRng::seed_from_u64(10)).expect("optimizer");
        assert!((optimizer.inertia() - 0.9).abs() < 1e-12);
        optimizer.step();
        assert!((optimizer.inertia() - 0.85).abs() < 1e-12);
        assert_eq!(optimizer.iteration(), 1);
    }
}
