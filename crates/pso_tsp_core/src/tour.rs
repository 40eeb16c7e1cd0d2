use pso_tsp_derive::New;

use crate::{City, geometry::TourGeometry};

/// The route handed to the reporter: a closed visiting order and its length.
#[derive(Clone, Debug, Default, PartialEq, New)]
pub struct Route {
    pub order: Vec<usize>,
    pub cost: f64,
}

impl Route {
    pub fn route_metrics(&self, cities: &[City]) -> RouteMetrics {
        let n = self.n();

        if n < 2 {
            log::info!("metrics: n < 2 so there's nothing to report");
            return RouteMetrics::default();
        }

        let edges = TourGeometry::edge_lengths(cities, &self.order);
        let total: f64 = edges.iter().sum();
        let average = total / (n as f64);
        let longest = edges.iter().copied().fold(0.0_f64, f64::max);
        let shortest = edges.iter().copied().fold(f64::INFINITY, f64::min);

        log::info!(
            "metrics: n={n} total={total:.2} longest={longest:.2} shortest={shortest:.2} avg={average:.2}",
        );

        RouteMetrics::new(longest, shortest, total, average)
    }

    pub fn n(&self) -> usize {
        self.order.len()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, New)]
pub struct RouteMetrics {
    pub longest: f64,
    pub shortest: f64,
    pub total: f64,
    pub average: f64,
}
