//! Hybrid particle-swarm / genetic optimizer for the Traveling Salesman Problem.
//! Tours are permutations moved by probabilistic index swaps toward personal and global
//! bests, perturbed by mutation and Gaussian-rate swaps, with the worst share of the swarm
//! reseeded every generation.

mod algo;
mod city;
mod constants;
mod error;
mod geo;
mod io;
pub mod logging;
pub mod swarm;
mod tour;

pub(crate) use geo::geometry;
pub(crate) use io::options;

use rand::{SeedableRng, rngs::StdRng};

pub use algo::optimizer::{InertiaSchedule, Optimizer, RunSummary};
pub use algo::perturbation::Perturbation;
pub use algo::pruning::PruningPolicy;
pub use algo::update::{Generation, UpdateOutcome, UpdateRule};
pub use city::City;
pub use error::{Error, Result};
pub use geo::geometry::TourGeometry;
pub use io::input::{CityInput, generate_cities};
pub use io::options::{CitySource, LogFormat, LogLevel, SwarmOptions};
pub use io::output::{render_route, write_route};
pub use swarm::{GlobalBest, Particle, Swarm};
pub use tour::{Route, RouteMetrics};

/// Runs the optimizer over `cities` with a generator seeded from `options.seed`.
pub fn solve(cities: &[City], options: &SwarmOptions) -> Result<RunSummary> {
    let rng = StdRng::seed_from_u64(options.seed);
    Ok(Optimizer::new(cities, options, rng)?.run())
}
