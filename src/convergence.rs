/// Stops the colony once the iteration best has stalled.
///
/// An iteration counts as stagnant when `previous - current` falls below
/// the threshold. Regressions (negative improvement) count as stagnant too.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvergenceMonitor {
    threshold: f64,
    patience: usize,
    previous_best: f64,
    stagnant: usize,
}

impl ConvergenceMonitor {
    pub fn new(threshold: f64, patience: usize) -> Self {
        ConvergenceMonitor {
            threshold,
            patience,
            previous_best: f64::INFINITY,
            stagnant: 0,
        }
    }

    /// Records one iteration best; returns `true` when the run has converged.
    pub fn observe(&mut self, current_best: f64) -> bool {
        let improvement = self.previous_best - current_best;
        if improvement < self.threshold {
            self.stagnant += 1;
        } else {
            self.stagnant = 0;
        }
        self.previous_best = current_best;
        self.stagnant >= self.patience
    }

    pub fn stagnant_iterations(&self) -> usize {
        self.stagnant
    }
}
