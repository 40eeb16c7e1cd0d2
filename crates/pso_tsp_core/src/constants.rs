// Defaults for `SwarmOptions`.
pub(crate) const DEFAULT_CITIES: usize = 20;
pub(crate) const DEFAULT_PARTICLES: usize = 500;
pub(crate) const DEFAULT_ITERATIONS: usize = 2_000;
pub(crate) const DEFAULT_INITIAL_INERTIA: f64 = 0.9;
pub(crate) const DEFAULT_FINAL_INERTIA: f64 = 0.4;
// Used directly as swap probabilities, so anything >= 1.0 always swaps.
pub(crate) const DEFAULT_COGNITIVE: f64 = 1.49445;
pub(crate) const DEFAULT_SOCIAL: f64 = 1.49445;
pub(crate) const DEFAULT_MUTATION_RATE: f64 = 0.1;
pub(crate) const DEFAULT_GAUSSIAN_STDDEV: f64 = 0.1;
pub(crate) const DEFAULT_PRUNE_PERCENTAGE: usize = 10;
pub(crate) const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// Generated cities fall in `[0, GRID_SIZE) x [0, GRID_SIZE)`.
pub(crate) const GRID_SIZE: i32 = 100;
pub(crate) const MIN_CITIES: usize = 2;
