use crate::error::AcoResult;
use crate::matrix::DistanceMatrix;
use crate::tour::Tour;
use rand::Rng;

/// Random symmetric demo instance: integer distances in `1..100`, averaged
/// with the transpose, diagonal `+inf`.
pub fn random_distance_matrix<R: Rng + ?Sized>(
    size: usize,
    rng: &mut R,
) -> AcoResult<DistanceMatrix> {
    let raw: Vec<Vec<f64>> = (0..size)
        .map(|_| (0..size).map(|_| f64::from(rng.random_range(1..100u32))).collect())
        .collect();

    let rows = (0..size)
        .map(|i| {
            (0..size)
                .map(|j| {
                    if i == j {
                        f64::INFINITY
                    } else {
                        (raw[i][j] + raw[j][i]) / 2.0
                    }
                })
                .collect()
        })
        .collect();

    DistanceMatrix::new(rows)
}

/// `0 -> 3 -> 1 -> 2 -> 0`
pub fn format_tour(tour: &Tour) -> String {
    let mut nodes: Vec<String> = tour.edges.iter().map(|e| e.from.to_string()).collect();
    if let Some(last) = tour.edges.last() {
        nodes.push(last.to.to_string());
    }
    nodes.join(" -> ")
}
