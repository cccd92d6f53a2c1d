use crate::matrix::{DistanceMatrix, PheromoneMatrix};
use crate::tour::Tour;

/// Evaporates the trail and lets the best tours of an iteration deposit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PheromoneUpdater {
    decay: f64,
}

impl PheromoneUpdater {
    pub fn new(decay: f64) -> Self {
        PheromoneUpdater { decay }
    }

    /// Decays every entry once, then reinforces each edge of the `n_best`
    /// cheapest tours by `1 / distance`. Fresh deposits are not decayed.
    pub fn update(
        &self,
        pheromone: &mut PheromoneMatrix,
        distances: &DistanceMatrix,
        tours: &[Tour],
        n_best: usize,
    ) {
        pheromone.decay(self.decay);

        let mut ranked: Vec<&Tour> = tours.iter().collect();
        ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));

        for tour in ranked.into_iter().take(n_best) {
            for &edge in &tour.edges {
                if edge.from == edge.to {
                    continue;
                }
                pheromone.deposit(edge, 1.0 / distances[edge]);
            }
        }
    }
}
