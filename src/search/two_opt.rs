use log::{debug, trace, warn};

use crate::error::Result;
use crate::problem::{Location, tour_distance};
use crate::search::clock::Stopwatch;
use crate::search::nearest::construct;
use crate::search::{Algorithm, CancelToken, Clock, NoopSink, Solver, StepSink};
use crate::solution::{AlgorithmStep, RouteResult};

/// First-improvement 2-opt local search seeded with the nearest neighbor tour.
///
/// Never worse than its seed, but may stop in a local optimum.
#[derive(Copy, Clone, Debug, Default)]
pub struct TwoOpt;

fn owned(route: &[&Location]) -> Vec<Location> {
    route.iter().map(|&location| location.clone()).collect()
}

impl Solver for TwoOpt {
    fn algorithm(&self) -> Algorithm {
        Algorithm::TwoOpt
    }

    fn solve_with(
        &self,
        locations: &[Location],
        sink: &mut dyn StepSink,
        clock: &dyn Clock,
        cancel: &CancelToken,
    ) -> Result<RouteResult> {
        let stopwatch = Stopwatch::start(clock);

        // Only the seed tour is reused, not its counters.
        let seed = construct(locations, &mut NoopSink, cancel)?;
        let mut best_distance = seed.distance;
        let mut completed = seed.completed;

        if sink.is_recording() {
            sink.record(AlgorithmStep::new(
                seed.path.clone(),
                seed.path.clone(),
                format!(
                    "Starting with Nearest Neighbor solution, distance: {:.2} km",
                    best_distance
                ),
            ));
        }

        // Working tour of references; the depot appears at both ends and
        // neither end is ever moved.
        let mut best_route: Vec<&Location> = seed.path.iter().collect();
        let len = best_route.len();

        // Sweeps and pair checks share one counter.
        let mut iterations = 0;
        let mut improved = completed;

        'sweep: while improved {
            improved = false;
            iterations += 1;

            for i in 1..len.saturating_sub(2) {
                for j in i + 1..len - 1 {
                    if cancel.is_cancelled() {
                        completed = false;
                        break 'sweep;
                    }
                    iterations += 1;

                    let mut candidate = best_route.clone();
                    candidate[i..=j].reverse();

                    let candidate_distance =
                        tour_distance(candidate.iter().map(|location| location.position));

                    if sink.is_recording() {
                        sink.record(
                            AlgorithmStep::new(
                                owned(&candidate),
                                owned(&best_route),
                                format!(
                                    "Evaluating 2-opt swap between positions {} and {}, new distance: {:.2} km",
                                    i, j, candidate_distance
                                ),
                            )
                            .with_edge(best_route[i - 1], best_route[j]),
                        );
                    }

                    if candidate_distance < best_distance {
                        best_distance = candidate_distance;
                        best_route = candidate;
                        improved = true;

                        trace!("2-opt reversed {}..={} -> {:.2} km", i, j, best_distance);

                        if sink.is_recording() {
                            let snapshot = owned(&best_route);
                            sink.record(AlgorithmStep::new(
                                snapshot.clone(),
                                snapshot,
                                format!("Improvement found! New best distance: {:.2} km", best_distance),
                            ));
                        }

                        continue 'sweep;
                    }
                }
            }
        }

        if !completed {
            warn!("2-opt cancelled after {} iterations at {:.2} km", iterations, best_distance);
        }
        debug!(
            "2-opt over {} locations: {:.2} km (seed {:.2} km) in {} iterations",
            locations.len(),
            best_distance,
            seed.distance,
            iterations
        );

        let path = owned(&best_route);

        Ok(RouteResult::assemble(
            Algorithm::TwoOpt,
            path,
            best_distance,
            iterations,
            stopwatch.elapsed_ms(),
            completed,
        ))
    }
}
