/// Best tour seen by any particle so far.
///
/// Tour and cost only change together, through [`GlobalBest::offer`].
#[derive(Clone, Debug, PartialEq)]
pub struct GlobalBest {
    tour: Vec<usize>,
    cost: f64,
}

impl Default for GlobalBest {
    fn default() -> Self {
        Self {
            tour: Vec::new(),
            cost: f64::INFINITY,
        }
    }
}

impl GlobalBest {
    /// Takes `tour` if `cost` is strictly lower than the current best.
    pub fn offer(&mut self, tour: &[usize], cost: f64) -> bool {
        if cost < self.cost {
            self.tour.clear();
            self.tour.extend_from_slice(tour);
            self.cost = cost;
            true
        } else {
            false
        }
    }

    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    pub fn is_set(&self) -> bool {
        !self.tour.is_empty()
    }
}
