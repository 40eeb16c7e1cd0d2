//! Helpers for tours represented as permutations of `0..n`.

use rand::{Rng, seq::SliceRandom};

use crate::{Error, Result};

pub fn identity(n: usize) -> Vec<usize> {
    (0..n).collect()
}

/// Identity permutation shuffled with Fisher-Yates, so every ordering is equally likely.
pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut tour = identity(n);
    tour.shuffle(rng);
    tour
}

/// Resets `tour` to a fresh random permutation of its own length, reusing the buffer.
pub(crate) fn reshuffle_from_identity<R: Rng + ?Sized>(tour: &mut [usize], rng: &mut R) {
    for (idx, slot) in tour.iter_mut().enumerate() {
        *slot = idx;
    }
    tour.shuffle(rng);
}

pub fn is_permutation(tour: &[usize], n: usize) -> bool {
    if tour.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in tour {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

/// Boundary check for tours that did not come from this crate's operators.
pub fn ensure_permutation(tour: &[usize], n: usize) -> Result<()> {
    if is_permutation(tour, n) {
        Ok(())
    } else {
        Err(Error::invalid_data(format!(
            "tour of length {} is not a permutation of 0..{n}",
            tour.len()
        )))
    }
}
