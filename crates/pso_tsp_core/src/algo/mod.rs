pub mod optimizer;
pub mod perturbation;
pub mod pruning;
pub mod update;

use rand::Rng;

/// `true` with probability `p`. Values of `p` at or above 1.0 always hit, values at or
/// below 0.0 never do; unlike `Rng::random_bool` this never panics on out-of-range input.
#[inline]
pub(crate) fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.random::<f64>() < p
}
