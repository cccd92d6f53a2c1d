use crate::matrix::{DistanceMatrix, Edge, PheromoneMatrix};
use rand::Rng;
use rand::prelude::IndexedRandom;

/// A closed tour: exactly N edges starting and ending at the start node.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    pub edges: Vec<Edge>,
    pub cost: f64,
}

impl Tour {
    /// Node visiting order, start node first, closing return omitted.
    pub fn nodes(&self) -> Vec<usize> {
        self.edges.iter().map(|edge| edge.from).collect()
    }
}

/// A tour together with how many moves fell back to uniform selection.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltTour {
    pub tour: Tour,
    pub degenerate_moves: usize,
}

struct Ant {
    start: usize,
    edges: Vec<Edge>,
    visited: Vec<bool>,
    current: usize,
    cost: f64,
}

impl Ant {
    fn new(start: usize, num_nodes: usize) -> Self {
        let mut visited = vec![false; num_nodes];
        visited[start] = true;
        Ant {
            start,
            edges: Vec::with_capacity(num_nodes),
            visited,
            current: start,
            cost: 0.0,
        }
    }

    fn visit(&mut self, node: usize, distance: f64) {
        self.edges.push(Edge::new(self.current, node));
        self.visited[node] = true;
        self.current = node;
        self.cost += distance;
    }

    fn unvisited(&self) -> Vec<usize> {
        (0..self.visited.len())
            .filter(|&i| !self.visited[i])
            .collect()
    }

    fn close(mut self, distance: f64) -> Tour {
        self.edges.push(Edge::new(self.current, self.start));
        self.cost += distance;
        Tour {
            edges: self.edges,
            cost: self.cost,
        }
    }
}

/// Roulette-wheel selection over `weights`.
///
/// Returns `None` when the weights do not sum to a finite positive value.
/// An index whose weight is zero is never returned.
pub fn sample_weighted<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }

    let target = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (idx, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(idx);
        if target < cumulative {
            return Some(idx);
        }
    }
    // Rounding can leave `target` a hair above the accumulated sum.
    last_positive
}

/// Builds one tour per call from a read-only view of the trail.
#[derive(Debug, Clone, Copy)]
pub struct TourBuilder<'a> {
    distances: &'a DistanceMatrix,
    pheromone: &'a PheromoneMatrix,
    alpha: f64,
    beta: f64,
}

impl<'a> TourBuilder<'a> {
    pub fn new(
        distances: &'a DistanceMatrix,
        pheromone: &'a PheromoneMatrix,
        alpha: f64,
        beta: f64,
    ) -> Self {
        TourBuilder {
            distances,
            pheromone,
            alpha,
            beta,
        }
    }

    /// Move desirability from `current` to every node, visited ones zeroed.
    pub fn scores(&self, current: usize, visited: &[bool]) -> Vec<f64> {
        self.pheromone
            .row(current)
            .iter()
            .enumerate()
            .map(|(candidate, &level)| {
                if visited[candidate] {
                    return 0.0;
                }
                let distance = self.distances[Edge::new(current, candidate)];
                level.powf(self.alpha) * (1.0 / distance).powf(self.beta)
            })
            .collect()
    }

    pub fn build<R: Rng + ?Sized>(&self, start: usize, rng: &mut R) -> BuiltTour {
        let num_nodes = self.distances.dimension();
        if num_nodes <= 1 {
            return BuiltTour {
                tour: Tour {
                    edges: vec![Edge::new(start, start)],
                    cost: 0.0,
                },
                degenerate_moves: 0,
            };
        }

        let mut ant = Ant::new(start, num_nodes);
        let mut degenerate_moves = 0;

        for _ in 1..num_nodes {
            let scores = self.scores(ant.current, &ant.visited);
            let next = match sample_weighted(&scores, rng) {
                Some(node) => node,
                None => {
                    // Every score vanished (or overflowed): pick uniformly
                    // among the unvisited nodes instead.
                    degenerate_moves += 1;
                    match ant.unvisited().choose(rng) {
                        Some(&node) => node,
                        None => unreachable!("fewer than N nodes visited"),
                    }
                }
            };
            let distance = self.distances[Edge::new(ant.current, next)];
            ant.visit(next, distance);
        }

        let closing = self.distances[Edge::new(ant.current, start)];
        BuiltTour {
            tour: ant.close(closing),
            degenerate_moves,
        }
    }
}
