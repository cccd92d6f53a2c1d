//! Ant Colony Optimization for closed tours over a complete graph.
//!
//! Ants build tours node by node, choosing each move with probability
//! proportional to `pheromone^alpha * (1 / distance)^beta`. After every
//! iteration the trail evaporates and the cheapest tours reinforce the edges
//! they used. The run stops when the iteration best stalls or the iteration
//! budget is spent.
//!
//! ```no_run
//! use aco_tour::{AcoParams, AntColony, DistanceMatrix};
//!
//! let inf = f64::INFINITY;
//! let distances = DistanceMatrix::new(vec![
//!     vec![inf, 1.0, 2.0],
//!     vec![1.0, inf, 1.0],
//!     vec![2.0, 1.0, inf],
//! ])?;
//! let mut colony = AntColony::new(distances, AcoParams::default())?;
//! let result = colony.run_seeded(42);
//! assert_eq!(result.best.cost, 4.0);
//! # Ok::<(), aco_tour::AcoError>(())
//! ```

pub mod config;
pub mod convergence;
pub mod error;
pub mod matrix;
pub mod parser;
pub mod pheromone;
pub mod solver;
pub mod tour;
pub mod utils;

pub use config::{AcoParams, Config};
pub use convergence::ConvergenceMonitor;
pub use error::{AcoError, AcoResult, MatrixError};
pub use matrix::{DistanceMatrix, Edge, PheromoneMatrix};
pub use pheromone::PheromoneUpdater;
pub use solver::{AntColony, IterationResult, RunResult, Termination};
pub use tour::{BuiltTour, Tour, TourBuilder, sample_weighted};

use rand::SeedableRng;
use rand::rngs::StdRng;

const DEMO_MATRIX_SEED: u64 = 42;

pub fn run(config: &Config) -> AcoResult<()> {
    let distances = match &config.file_path {
        Some(path) => {
            let instance = parser::parse_tsp_file(path)?;
            println!(
                "Loaded {} ({} nodes, {:?})",
                instance.name,
                instance.distances.dimension(),
                instance.edge_weight_type
            );
            instance.distances
        }
        None => {
            println!("Generated random {0}x{0} distance matrix", config.size);
            utils::random_distance_matrix(
                config.size,
                &mut StdRng::seed_from_u64(DEMO_MATRIX_SEED),
            )?
        }
    };

    let mut colony = AntColony::new(distances, config.params.clone())?;
    let result = match config.seed {
        Some(seed) => colony.run_seeded(seed),
        None => colony.run(&mut rand::rng()),
    };

    println!("Shortest path: {}", utils::format_tour(&result.best));
    println!("Distance: {:.2}", result.best.cost);
    println!(
        "Iterations: {} ({:?})",
        result.iterations_executed(),
        result.termination
    );
    for it in &result.iterations {
        println!("  {:>4}  {:.2}", it.iteration, it.best.cost);
    }
    let degenerate = result.degenerate_moves();
    if degenerate > 0 {
        println!(
            "Warning: {} moves fell back to uniform selection (degenerate move probabilities)",
            degenerate
        );
    }
    Ok(())
}
