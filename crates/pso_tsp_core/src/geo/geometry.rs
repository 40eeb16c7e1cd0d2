use crate::City;

pub struct TourGeometry;

impl TourGeometry {
    /// Closed-cycle length of `tour` over `cities`, including the edge back to the start.
    ///
    /// Panics if the tour has fewer than two stops; every caller works on full permutations.
    pub fn tour_length(cities: &[City], tour: &[usize]) -> f64 {
        let n = tour.len();
        assert!(n >= 2, "tour_length needs at least two stops, got {n}");

        let mut sum = 0.0;
        for i in 0..n {
            let a = cities[tour[i]];
            let b = cities[tour[(i + 1) % n]];
            sum += Self::dist(a, b);
        }
        sum
    }

    #[inline]
    pub(crate) fn dist(a: City, b: City) -> f64 {
        a.dist(&b)
    }

    /// Edge lengths of the closed cycle, `edges[i]` being `tour[i] -> tour[i + 1]`.
    pub(crate) fn edge_lengths(cities: &[City], tour: &[usize]) -> Vec<f64> {
        let n = tour.len();
        (0..n)
            .map(|i| Self::dist(cities[tour[i]], cities[tour[(i + 1) % n]]))
            .collect()
    }
}
