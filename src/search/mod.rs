pub mod algorithm;
pub mod cancel;
pub mod clock;
pub mod exact;
pub mod nearest;
pub mod recorder;
pub mod two_opt;

pub use algorithm::{Algorithm, permutation_count};
pub use cancel::CancelToken;
pub use clock::{Clock, ManualClock, SystemClock};
pub use exact::BruteForce;
pub use nearest::NearestNeighbor;
pub use recorder::{NoopSink, StepSink, StepTrace};
pub use two_opt::TwoOpt;

use crate::error::Result;
use crate::problem::Location;
use crate::solution::RouteResult;

/// A TSP solver over a fixed depot (`locations[0]`).
///
/// Solvers are stateless; every call builds its own working data, so the same
/// solver may run concurrently on different inputs.
pub trait Solver {
    fn algorithm(&self) -> Algorithm;

    /// Solves with an explicit clock and cancellation token.
    ///
    /// Fails only when `locations` is empty.
    fn solve_with(
        &self,
        locations: &[Location],
        sink: &mut dyn StepSink,
        clock: &dyn Clock,
        cancel: &CancelToken,
    ) -> Result<RouteResult>;

    fn solve(&self, locations: &[Location], sink: &mut dyn StepSink) -> Result<RouteResult> {
        self.solve_with(locations, sink, &SystemClock::new(), &CancelToken::new())
    }
}

/// Runs `algorithm` over `locations`, reporting every step to `on_step` if given.
pub fn solve(
    algorithm: Algorithm,
    locations: &[Location],
    on_step: Option<&mut dyn StepSink>,
) -> Result<RouteResult> {
    match on_step {
        Some(sink) => algorithm.solver().solve(locations, sink),
        None => algorithm.solver().solve(locations, &mut NoopSink),
    }
}

#[cfg(test)]
mod tests;
