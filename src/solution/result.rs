use serde::Serialize;

use crate::problem::Location;
use crate::search::Algorithm;
use crate::types::{Kilometers, Milliseconds};

/// Final route of a solve together with its performance metrics.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteResult {
    pub algorithm: Algorithm,
    /// Closed cycle through the depot.
    pub path: Vec<Location>,
    pub distance: Kilometers,
    /// Internal evaluation count; what is counted depends on the solver.
    pub iterations: usize,
    pub execution_time: Milliseconds,
    /// `false` when the solve was cancelled and `path` is the best route known at that point.
    pub completed: bool,
}

impl RouteResult {
    pub(crate) fn assemble(
        algorithm: Algorithm,
        path: Vec<Location>,
        distance: Kilometers,
        iterations: usize,
        execution_time: Milliseconds,
        completed: bool,
    ) -> Self {
        RouteResult {
            algorithm,
            path,
            distance,
            iterations,
            execution_time,
            completed,
        }
    }

    /// Number of distinct stops on the route, depot counted once.
    pub fn stop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Relative saving of this route over `baseline`, in percent.
    pub fn improvement_over(&self, baseline: &RouteResult) -> f64 {
        if baseline.distance == 0.0 {
            return 0.0;
        }
        (baseline.distance - self.distance) / baseline.distance * 100.0
    }
}
