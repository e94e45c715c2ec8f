use log::debug;

use crate::error::{Error, Result};
use crate::problem::{Location, distance};
use crate::search::clock::Stopwatch;
use crate::search::{Algorithm, CancelToken, Clock, Solver, StepSink};
use crate::solution::{AlgorithmStep, RouteResult};
use crate::types::Kilometers;

/// Greedy construction: always travel to the closest unvisited stop.
#[derive(Copy, Clone, Debug, Default)]
pub struct NearestNeighbor;

/// Outcome of a greedy construction.
pub(crate) struct Construction {
    /// Closed at the depot, even when cancelled early.
    pub path: Vec<Location>,
    pub distance: Kilometers,
    /// Selection rounds, one per appended stop.
    pub rounds: usize,
    pub completed: bool,
}

/// Builds the nearest neighbor tour starting at `locations[0]`.
///
/// Candidates are scanned in input order and only a strictly shorter leg
/// replaces the current pick, so ties go to the earliest stop. If no leg
/// compares below infinity (non-finite coordinates) the earliest remaining
/// stop is taken so the tour still completes.
pub(crate) fn construct(
    locations: &[Location],
    sink: &mut dyn StepSink,
    cancel: &CancelToken,
) -> Result<Construction> {
    let (depot, rest) = locations.split_first().ok_or(Error::NoLocations)?;

    let mut remaining: Vec<&Location> = rest.iter().collect();
    let mut current = depot;
    let mut path = Vec::with_capacity(locations.len() + 1);
    path.push(depot.clone());

    let mut total = 0.0;
    let mut rounds = 0;
    let mut completed = true;

    while !remaining.is_empty() {
        if cancel.is_cancelled() {
            completed = false;
            break;
        }
        rounds += 1;

        let mut fallback: Option<Kilometers> = None;
        let mut nearest: Option<(usize, Kilometers)> = None;
        let mut shortest = f64::INFINITY;

        for (idx, &candidate) in remaining.iter().enumerate() {
            let leg = distance(current.position, candidate.position);
            fallback.get_or_insert(leg);

            if sink.is_recording() {
                sink.record(
                    AlgorithmStep::new(
                        path.clone(),
                        path.clone(),
                        format!("Evaluating distance to {}: {:.2} km", candidate.name, leg),
                    )
                    .with_edge(current, candidate),
                );
            }

            if leg < shortest {
                shortest = leg;
                nearest = Some((idx, leg));
            }
        }

        let (idx, leg) = nearest.unwrap_or((0, fallback.unwrap_or(f64::NAN)));
        let next = remaining.remove(idx);

        total += leg;
        path.push(next.clone());
        current = next;

        if sink.is_recording() {
            sink.record(AlgorithmStep::new(
                path.clone(),
                path.clone(),
                format!("Added {} to path, distance so far: {:.2} km", next.name, total),
            ));
        }
    }

    total += distance(current.position, depot.position);
    path.push(depot.clone());

    if sink.is_recording() {
        sink.record(AlgorithmStep::new(
            path.clone(),
            path.clone(),
            format!("Returning to start, total route distance: {:.2} km", total),
        ));
    }

    Ok(Construction {
        path,
        distance: total,
        rounds,
        completed,
    })
}

impl Solver for NearestNeighbor {
    fn algorithm(&self) -> Algorithm {
        Algorithm::NearestNeighbor
    }

    fn solve_with(
        &self,
        locations: &[Location],
        sink: &mut dyn StepSink,
        clock: &dyn Clock,
        cancel: &CancelToken,
    ) -> Result<RouteResult> {
        let stopwatch = Stopwatch::start(clock);

        let tour = construct(locations, sink, cancel)?;

        debug!(
            "nearest neighbor over {} locations: {:.2} km in {} rounds",
            locations.len(),
            tour.distance,
            tour.rounds
        );

        Ok(RouteResult::assemble(
            Algorithm::NearestNeighbor,
            tour.path,
            tour.distance,
            tour.rounds,
            stopwatch.elapsed_ms(),
            tour.completed,
        ))
    }
}
