use std::iter;

use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::problem::{Location, distance::polyline_distance};
use crate::search::clock::Stopwatch;
use crate::search::{Algorithm, CancelToken, Clock, Solver, StepSink};
use crate::solution::{AlgorithmStep, RouteResult};
use crate::types::Kilometers;

/// Exhaustive search over every ordering of the non-depot stops.
///
/// Optimal for the fixed-depot tour, at factorial cost in both time and
/// recorded steps.
#[derive(Copy, Clone, Debug, Default)]
pub struct BruteForce;

struct Enumeration<'a, 's> {
    depot: &'a Location,
    sink: &'s mut dyn StepSink,
    cancel: &'s CancelToken,
    best_route: Vec<Location>,
    best_distance: Kilometers,
    /// Recursive calls, partial and complete.
    iterations: usize,
    cancelled: bool,
}

/// `[depot, ...prefix, depot]`
fn closed_cycle<'a>(
    depot: &'a Location,
    prefix: &[&'a Location],
) -> impl Iterator<Item = &'a Location> {
    iter::once(depot)
        .chain(prefix.iter().copied())
        .chain(iter::once(depot))
}

impl<'a> Enumeration<'a, '_> {
    fn partial(&self, prefix: &[&'a Location]) -> Vec<Location> {
        iter::once(self.depot)
            .chain(prefix.iter().copied())
            .cloned()
            .collect()
    }

    /// Extends `prefix` with every ordering of `remaining`.
    fn permute(&mut self, remaining: Vec<&'a Location>, prefix: Vec<&'a Location>) {
        if self.cancel.is_cancelled() {
            self.cancelled = true;
            return;
        }
        self.iterations += 1;

        if remaining.is_empty() {
            let length = polyline_distance(
                closed_cycle(self.depot, &prefix).map(|location| location.position),
            );

            if length < self.best_distance {
                self.best_distance = length;
                self.best_route = closed_cycle(self.depot, &prefix).cloned().collect();

                trace!("new best tour {:.2} km after {} calls", length, self.iterations);

                if self.sink.is_recording() {
                    self.sink.record(AlgorithmStep::new(
                        self.best_route.clone(),
                        self.best_route.clone(),
                        format!("Found new best route with distance {:.2} km", length),
                    ));
                }
            }
            return;
        }

        for i in 0..remaining.len() {
            if self.cancel.is_cancelled() {
                self.cancelled = true;
                return;
            }

            let mut rest = remaining.clone();
            let next = rest.remove(i);

            let mut extended = Vec::with_capacity(prefix.len() + 1);
            extended.extend_from_slice(&prefix);
            extended.push(next);

            if self.sink.is_recording() {
                let step = AlgorithmStep::new(
                    self.partial(&extended),
                    self.best_route.clone(),
                    format!("Evaluating permutation {}", self.iterations),
                );
                self.sink.record(step);
            }

            self.permute(rest, extended);

            if self.cancelled {
                return;
            }
        }
    }
}

impl Solver for BruteForce {
    fn algorithm(&self) -> Algorithm {
        Algorithm::BruteForce
    }

    fn solve_with(
        &self,
        locations: &[Location],
        sink: &mut dyn StepSink,
        clock: &dyn Clock,
        cancel: &CancelToken,
    ) -> Result<RouteResult> {
        let stopwatch = Stopwatch::start(clock);

        let (depot, rest) = locations.split_first().ok_or(Error::NoLocations)?;

        let mut search = Enumeration {
            depot,
            sink,
            cancel,
            best_route: Vec::new(),
            best_distance: f64::INFINITY,
            iterations: 0,
            cancelled: false,
        };
        search.permute(rest.iter().collect(), Vec::with_capacity(rest.len()));

        if search.cancelled {
            warn!(
                "brute force cancelled after {} calls, best so far {:.2} km",
                search.iterations, search.best_distance
            );
        }
        debug!(
            "brute force over {} locations: {:.2} km in {} calls",
            locations.len(),
            search.best_distance,
            search.iterations
        );

        Ok(RouteResult::assemble(
            Algorithm::BruteForce,
            search.best_route,
            search.best_distance,
            search.iterations,
            stopwatch.elapsed_ms(),
            !search.cancelled,
        ))
    }
}
