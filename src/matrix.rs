use crate::error::{AcoResult, MatrixError};
use std::ops::Index;

/// A directed move between two nodes, also the index into both matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
}

impl Edge {
    pub const fn new(from: usize, to: usize) -> Self {
        Edge { from, to }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((from, to): (usize, usize)) -> Self {
        Edge { from, to }
    }
}

/// Validated, immutable N×N distance table.
///
/// The diagonal is `+inf` (self-loops are forbidden), the table is
/// symmetric and every off-diagonal entry is finite and strictly positive.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    dimension: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> AcoResult<Self> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(MatrixError::Empty.into());
        }
        for (row, entries) in rows.iter().enumerate() {
            if entries.len() != dimension {
                return Err(MatrixError::NotSquare {
                    row,
                    len: entries.len(),
                    expected: dimension,
                }
                .into());
            }
        }

        for i in 0..dimension {
            let diagonal = rows[i][i];
            if diagonal != f64::INFINITY {
                return Err(MatrixError::FiniteDiagonal {
                    index: i,
                    value: diagonal,
                }
                .into());
            }
            for j in 0..dimension {
                if i == j {
                    continue;
                }
                let value = rows[i][j];
                // Deposits add `1/d`, so the reciprocal must be finite too.
                if !value.is_finite() || value <= 0.0 || !(1.0 / value).is_finite() {
                    return Err(MatrixError::NotPositive {
                        from: i,
                        to: j,
                        value,
                    }
                    .into());
                }
                if j > i && value != rows[j][i] {
                    return Err(MatrixError::Asymmetric {
                        from: i,
                        to: j,
                        forward: value,
                        backward: rows[j][i],
                    }
                    .into());
                }
            }
        }

        Ok(DistanceMatrix {
            dimension,
            values: rows.into_iter().flatten().collect(),
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, edge: Edge) -> Option<f64> {
        flat_index(self.dimension, edge).map(|k| self.values[k])
    }

    /// Sum of the distances along `edges`. Self-edges contribute nothing,
    /// which is what gives a single-node tour its zero cost.
    pub fn path_cost(&self, edges: &[Edge]) -> f64 {
        edges
            .iter()
            .filter(|edge| edge.from != edge.to)
            .map(|&edge| self[edge])
            .sum()
    }
}

impl Index<Edge> for DistanceMatrix {
    type Output = f64;

    fn index(&self, edge: Edge) -> &f64 {
        match flat_index(self.dimension, edge) {
            Some(k) => &self.values[k],
            None => panic!(
                "Edge ({}, {}) out of bounds for dimension {}",
                edge.from, edge.to, self.dimension
            ),
        }
    }
}

/// Mutable pheromone trail levels, one per directed edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    dimension: usize,
    values: Vec<f64>,
}

impl PheromoneMatrix {
    /// Uniform `1/N` starting trail.
    pub fn uniform(dimension: usize) -> Self {
        let level = if dimension == 0 {
            0.0
        } else {
            1.0 / dimension as f64
        };
        PheromoneMatrix {
            dimension,
            values: vec![level; dimension * dimension],
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, edge: Edge) -> Option<f64> {
        flat_index(self.dimension, edge).map(|k| self.values[k])
    }

    /// Row of trail levels leaving `from`.
    pub fn row(&self, from: usize) -> &[f64] {
        &self.values[from * self.dimension..(from + 1) * self.dimension]
    }

    /// Evaporation: scales every entry by `factor`.
    pub fn decay(&mut self, factor: f64) {
        for level in &mut self.values {
            *level *= factor;
        }
    }

    /// Adds `amount` to one directed edge.
    pub fn deposit(&mut self, edge: Edge, amount: f64) {
        match flat_index(self.dimension, edge) {
            Some(k) => self.values[k] += amount,
            None => panic!(
                "Edge ({}, {}) out of bounds for dimension {}",
                edge.from, edge.to, self.dimension
            ),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

impl Index<Edge> for PheromoneMatrix {
    type Output = f64;

    fn index(&self, edge: Edge) -> &f64 {
        match flat_index(self.dimension, edge) {
            Some(k) => &self.values[k],
            None => panic!(
                "Edge ({}, {}) out of bounds for dimension {}",
                edge.from, edge.to, self.dimension
            ),
        }
    }
}

fn flat_index(dimension: usize, edge: Edge) -> Option<usize> {
    if edge.from < dimension && edge.to < dimension {
        Some(edge.from * dimension + edge.to)
    } else {
        None
    }
}
