use aco_tour::{
    AcoError, AcoParams, AntColony, DistanceMatrix, Edge, PheromoneMatrix, PheromoneUpdater,
    Termination, Tour, TourBuilder,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const INF: f64 = f64::INFINITY;

fn symmetric(n: usize, upper: &[f64]) -> DistanceMatrix {
    let mut rows = vec![vec![INF; n]; n];
    let mut k = 0;
    for i in 0..n {
        for j in (i + 1)..n {
            rows[i][j] = upper[k];
            rows[j][i] = upper[k];
            k += 1;
        }
    }
    DistanceMatrix::new(rows).unwrap()
}

fn matrix_strategy() -> impl Strategy<Value = DistanceMatrix> {
    (2usize..9).prop_flat_map(|n| {
        prop::collection::vec(0.5f64..100.0, n * (n - 1) / 2)
            .prop_map(move |upper| symmetric(n, &upper))
    })
}

fn is_hamiltonian(tour: &Tour, n: usize) -> bool {
    if tour.edges.len() != n || tour.edges[0].from != 0 || tour.edges[n - 1].to != 0 {
        return false;
    }
    if tour.edges.windows(2).any(|w| w[0].to != w[1].from) {
        return false;
    }
    let mut seen = vec![false; n];
    for edge in &tour.edges {
        if seen[edge.from] {
            return false;
        }
        seen[edge.from] = true;
    }
    seen.into_iter().all(|s| s)
}

fn params(n_iterations: usize) -> AcoParams {
    AcoParams {
        n_ants: 6,
        n_best: 2,
        n_iterations,
        decay: 0.7,
        alpha: 1.0,
        beta: 2.0,
        ..AcoParams::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn every_tour_is_a_hamiltonian_cycle(distances in matrix_strategy(), seed in any::<u64>()) {
        let n = distances.dimension();
        let pheromone = PheromoneMatrix::uniform(n);
        let builder = TourBuilder::new(&distances, &pheromone, 1.0, 2.0);
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..5 {
            let built = builder.build(0, &mut rng);
            prop_assert!(is_hamiltonian(&built.tour, n), "{:?}", built.tour);
            prop_assert!(built.tour.cost.is_finite());
        }
    }

    #[test]
    fn pheromone_stays_finite_and_nonnegative(distances in matrix_strategy(), seed in any::<u64>()) {
        let mut colony = AntColony::new(distances, AcoParams {
            convergence_patience: 100,
            ..params(40)
        }).unwrap();
        let result = colony.run_seeded(seed);
        prop_assert!(colony.pheromone().iter().all(|v| v.is_finite() && v >= 0.0));
        let n = colony.distances().dimension();
        for it in &result.iterations {
            prop_assert!(is_hamiltonian(&it.best, n));
        }
    }

    #[test]
    fn all_time_best_never_increases(distances in matrix_strategy(), seed in any::<u64>()) {
        let mut colony = AntColony::new(distances, params(25)).unwrap();
        let result = colony.run_seeded(seed);
        let mut best_so_far = INF;
        let mut trace = Vec::new();
        for cost in result.best_costs() {
            best_so_far = best_so_far.min(cost);
            trace.push(best_so_far);
        }
        prop_assert!(trace.windows(2).all(|w| w[1] <= w[0]));
        prop_assert_eq!(result.best.cost, best_so_far);
    }
}

#[test]
fn identical_seeds_give_identical_runs() {
    let distances = symmetric(
        7,
        &(1..=21).map(|k| ((k * 37) % 50 + 1) as f64).collect::<Vec<_>>(),
    );
    let mut first = AntColony::new(distances.clone(), params(30)).unwrap();
    let mut second = AntColony::new(distances.clone(), params(30)).unwrap();
    assert_eq!(first.run_seeded(2024), second.run_seeded(2024));

    let mut first = AntColony::new(distances.clone(), params(30)).unwrap();
    let mut other_rng = StdRng::seed_from_u64(2024);
    let injected = first.run(&mut other_rng);
    let mut second = AntColony::new(distances, params(30)).unwrap();
    assert_eq!(injected, second.run_seeded(2024));
}

#[test]
fn no_decay_and_no_reinforcement_freezes_the_trail() {
    let distances = symmetric(5, &[2.0, 3.0, 4.0, 5.0, 1.0, 6.0, 2.0, 3.0, 7.0, 1.0]);
    let mut pheromone = PheromoneMatrix::uniform(5);
    let initial = pheromone.clone();
    let updater = PheromoneUpdater::new(1.0);
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let tours: Vec<Tour> = {
            let builder = TourBuilder::new(&distances, &pheromone, 1.0, 1.0);
            (0..4).map(|_| builder.build(0, &mut rng).tour).collect()
        };
        updater.update(&mut pheromone, &distances, &tours, 0);
    }
    assert_eq!(pheromone, initial);
}

#[test]
fn convergence_stops_at_the_stalled_iteration() {
    // Uniform distances: every tour costs the same, so every iteration after
    // the first is stagnant.
    for patience in 1..=6 {
        let distances = symmetric(5, &[4.0; 10]);
        let mut colony = AntColony::new(
            distances,
            AcoParams {
                convergence_patience: patience,
                ..params(100)
            },
        )
        .unwrap();
        let result = colony.run_seeded(patience as u64);
        assert_eq!(result.termination, Termination::Converged);
        assert_eq!(result.iterations_executed(), patience + 1);
        assert!(result.best_costs().iter().all(|&c| c == 20.0));
    }
}

#[test]
fn three_node_scenario() {
    let distances = DistanceMatrix::new(vec![
        vec![INF, 1.0, 2.0],
        vec![1.0, INF, 1.0],
        vec![2.0, 1.0, INF],
    ])
    .unwrap();
    let mut colony = AntColony::new(
        distances,
        AcoParams {
            n_ants: 5,
            n_best: 2,
            n_iterations: 10,
            decay: 0.9,
            alpha: 1.0,
            beta: 2.0,
            ..AcoParams::default()
        },
    )
    .unwrap();
    let result = colony.run(&mut StdRng::seed_from_u64(0));
    assert_eq!(result.best.cost, 4.0);
    assert!(result.iterations_executed() <= 10);
}

#[test]
fn single_node_scenario() {
    let distances = DistanceMatrix::new(vec![vec![INF]]).unwrap();
    let mut colony = AntColony::new(distances, params(10)).unwrap();
    let result = colony.run_seeded(0);
    assert_eq!(result.best.edges, vec![Edge::new(0, 0)]);
    assert_eq!(result.best.cost, 0.0);
    assert_eq!(result.iterations_executed(), 1);
}

#[test]
fn invalid_inputs_fail_at_construction() {
    assert!(matches!(
        DistanceMatrix::new(vec![vec![INF, 1.0], vec![2.0, INF]]),
        Err(AcoError::InvalidMatrix(_))
    ));
    let distances = symmetric(3, &[1.0, 1.0, 1.0]);
    assert!(matches!(
        AntColony::new(
            distances,
            AcoParams {
                n_ants: 0,
                ..AcoParams::default()
            }
        ),
        Err(AcoError::InvalidConfiguration { .. })
    ));
}

#[test]
fn n_best_above_n_ants_is_clamped() {
    let distances = symmetric(4, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let mut colony = AntColony::new(
        distances,
        AcoParams {
            n_ants: 2,
            n_best: 50,
            ..params(5)
        },
    )
    .unwrap();
    let result = colony.run_seeded(8);
    assert!(result.iterations_executed() >= 1);
}
