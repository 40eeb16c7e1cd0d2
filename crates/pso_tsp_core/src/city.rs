use std::fmt;

use rand::Rng;

use crate::constants::GRID_SIZE;

/// A fixed point on the integer grid. Cities never change once a run starts.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct City {
    pub x: i32,
    pub y: i32,
}

impl City {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub(crate) fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.random_range(0..GRID_SIZE),
            y: rng.random_range(0..GRID_SIZE),
        }
    }

    /// Euclidean distance.
    pub fn dist(self, rhs: &Self) -> f64 {
        let dx = f64::from(self.x) - f64::from(rhs.x);
        let dy = f64::from(self.y) - f64::from(rhs.y);
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
