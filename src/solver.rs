use crate::config::AcoParams;
use crate::convergence::ConvergenceMonitor;
use crate::error::AcoResult;
use crate::matrix::{DistanceMatrix, PheromoneMatrix};
use crate::pheromone::PheromoneUpdater;
use crate::tour::{BuiltTour, Tour, TourBuilder};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

const START_NODE: usize = 0;

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The iteration best stalled for `convergence_patience` iterations.
    Converged,
    /// All `n_iterations` ran, or the graph had a single node.
    Completed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IterationResult {
    pub iteration: usize, // 1-based
    pub best: Tour,
    pub degenerate_moves: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub best: Tour,
    pub iterations: Vec<IterationResult>,
    pub termination: Termination,
}

impl RunResult {
    pub fn best_costs(&self) -> Vec<f64> {
        self.iterations.iter().map(|it| it.best.cost).collect()
    }

    pub fn iterations_executed(&self) -> usize {
        self.iterations.len()
    }

    /// Moves that fell back to uniform selection over the whole run.
    pub fn degenerate_moves(&self) -> usize {
        self.iterations.iter().map(|it| it.degenerate_moves).sum()
    }
}

/// The colony owns the trail; ants only ever see it through `&`.
#[derive(Debug, Clone)]
pub struct AntColony {
    distances: DistanceMatrix,
    pheromone: PheromoneMatrix,
    params: AcoParams,
    updater: PheromoneUpdater,
}

impl AntColony {
    pub fn new(distances: DistanceMatrix, params: AcoParams) -> AcoResult<Self> {
        params.validate()?;
        let pheromone = PheromoneMatrix::uniform(distances.dimension());
        let updater = PheromoneUpdater::new(params.decay);
        Ok(AntColony {
            distances,
            pheromone,
            params,
            updater,
        })
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    pub fn params(&self) -> &AcoParams {
        &self.params
    }

    pub fn run_seeded(&mut self, seed: u64) -> RunResult {
        self.run(&mut StdRng::seed_from_u64(seed))
    }

    /// Runs the colony to convergence or the iteration budget.
    ///
    /// Every run starts from a fresh uniform trail, so repeating a run with
    /// the same seed repeats its result. `rng` only hands out one seed per
    /// ant per iteration, drawn in ant order, so sequential and parallel
    /// runs yield identical results too.
    pub fn run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> RunResult {
        self.pheromone = PheromoneMatrix::uniform(self.distances.dimension());

        if self.distances.dimension() <= 1 {
            let built = self.builder().build(START_NODE, rng);
            let first = IterationResult {
                iteration: 1,
                best: built.tour.clone(),
                degenerate_moves: 0,
            };
            return RunResult {
                best: built.tour,
                iterations: vec![first],
                termination: Termination::Completed,
            };
        }

        let n_best = self.params.effective_n_best();
        let mut monitor = ConvergenceMonitor::new(
            self.params.convergence_threshold,
            self.params.convergence_patience,
        );
        let mut best: Option<Tour> = None;
        let mut iterations = Vec::with_capacity(self.params.n_iterations);
        let mut termination = Termination::Completed;

        for iteration in 1..=self.params.n_iterations {
            let seeds: Vec<u64> = (0..self.params.n_ants).map(|_| rng.random()).collect();
            let built = self.construct_tours(&seeds);

            let degenerate_moves = built.iter().map(|b| b.degenerate_moves).sum();
            let tours: Vec<Tour> = built.into_iter().map(|b| b.tour).collect();

            self.updater
                .update(&mut self.pheromone, &self.distances, &tours, n_best);

            let round_best = iteration_best(tours);
            if best
                .as_ref()
                .is_none_or(|current| round_best.cost < current.cost)
            {
                best = Some(round_best.clone());
            }

            let cost = round_best.cost;
            iterations.push(IterationResult {
                iteration,
                best: round_best,
                degenerate_moves,
            });

            if degenerate_moves > 0 && self.params.report_interval > 0 {
                println!(
                    "Iter {}: {} moves fell back to uniform selection",
                    iteration, degenerate_moves
                );
            }
            if self.params.report_interval > 0
                && (iteration % self.params.report_interval == 0
                    || iteration == self.params.n_iterations)
            {
                if let Some(best) = &best {
                    println!(
                        "Iter {}: iteration best {:.2}, best so far {:.2}",
                        iteration, cost, best.cost
                    );
                }
            }

            if monitor.observe(cost) {
                if self.params.report_interval > 0 {
                    println!("Converged after {} iterations", iteration);
                }
                termination = Termination::Converged;
                break;
            }
        }

        RunResult {
            // n_iterations >= 1 is validated, so at least one tour exists.
            best: best.unwrap_or_else(|| Tour {
                edges: Vec::new(),
                cost: f64::INFINITY,
            }),
            iterations,
            termination,
        }
    }

    fn builder(&self) -> TourBuilder<'_> {
        TourBuilder::new(
            &self.distances,
            &self.pheromone,
            self.params.alpha,
            self.params.beta,
        )
    }

    fn construct_tours(&self, seeds: &[u64]) -> Vec<BuiltTour> {
        let builder = self.builder();
        let build_one =
            |&seed: &u64| builder.build(START_NODE, &mut StdRng::seed_from_u64(seed));
        if self.params.parallel {
            seeds.par_iter().map(build_one).collect()
        } else {
            seeds.iter().map(build_one).collect()
        }
    }
}

/// First tour of minimal cost, in ant order.
fn iteration_best(tours: Vec<Tour>) -> Tour {
    let mut iter = tours.into_iter();
    let mut best = match iter.next() {
        Some(tour) => tour,
        None => {
            return Tour {
                edges: Vec::new(),
                cost: f64::INFINITY,
            };
        }
    };
    for tour in iter {
        if tour.cost < best.cost {
            best = tour;
        }
    }
    best
}
