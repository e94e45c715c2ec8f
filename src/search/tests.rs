use super::*;
use crate::error::Error;
use crate::problem::{Location, distance, path_distance, route_distance};
use crate::solution::AlgorithmStep;
use crate::solution::route::{is_complete_route, path_ids};

use proptest::prelude::*;

fn loc(id: &str, lat: f64, lng: f64) -> Location {
    Location::new(id, id.to_uppercase(), lat, lng)
}

/// Depot plus two stops at equal distance from it.
fn triangle() -> Vec<Location> {
    vec![loc("d", 0.0, 0.0), loc("a", 0.0, 1.0), loc("b", 1.0, 0.0)]
}

fn square() -> Vec<Location> {
    vec![
        loc("d", 0.0, 0.0),
        loc("a", 0.0, 1.0),
        loc("b", 1.0, 1.0),
        loc("c", 1.0, 0.0),
    ]
}

/// Nearest neighbor leaves a detour on this one that 2-opt removes.
fn detour() -> Vec<Location> {
    vec![
        loc("d", 0.0, 0.0),
        loc("a", 0.0, 3.0),
        loc("b", 0.0, 1.0),
        loc("c", 1.0, 2.0),
        loc("e", 1.0, 0.0),
    ]
}

fn run(algorithm: Algorithm, locations: &[Location]) -> (RouteResult, Vec<AlgorithmStep>) {
    let mut trace = StepTrace::new();
    let result = solve(algorithm, locations, Some(&mut trace)).unwrap();
    (result, trace.into_steps())
}

fn ids(result: &RouteResult) -> String {
    path_ids(&result.path)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

/// Every ordering of the non-depot stops as a closed tour.
fn all_tours(locations: &[Location]) -> Vec<Vec<Location>> {
    fn extend(prefix: Vec<Location>, rest: Vec<Location>, out: &mut Vec<Vec<Location>>) {
        if rest.is_empty() {
            out.push(prefix);
            return;
        }
        for i in 0..rest.len() {
            let mut next_rest = rest.clone();
            let next = next_rest.remove(i);
            let mut next_prefix = prefix.clone();
            next_prefix.push(next);
            extend(next_prefix, next_rest, out);
        }
    }

    let mut tours = Vec::new();
    extend(vec![], locations[1..].to_vec(), &mut tours);
    tours
        .into_iter()
        .map(|middle| {
            let mut tour = vec![locations[0].clone()];
            tour.extend(middle);
            tour.push(locations[0].clone());
            tour
        })
        .collect()
}

#[test]
fn test_empty_input_is_rejected_by_every_solver() {
    for algorithm in Algorithm::ALL {
        assert!(matches!(solve(algorithm, &[], None), Err(Error::NoLocations)));
    }
}

#[test]
fn test_single_location_returns_trivial_cycle() {
    let depot = vec![loc("d", 59.9, 10.7)];

    let (brute, _) = run(Algorithm::BruteForce, &depot);
    assert_eq!(ids(&brute), "d,d");
    assert_eq!(brute.distance, 0.0);
    assert_eq!(brute.iterations, 1);

    let (nearest, steps) = run(Algorithm::NearestNeighbor, &depot);
    assert_eq!(ids(&nearest), "d,d");
    assert_eq!(nearest.distance, 0.0);
    assert_eq!(nearest.iterations, 0);
    assert_eq!(steps.len(), 1);

    let (two_opt, _) = run(Algorithm::TwoOpt, &depot);
    assert_eq!(ids(&two_opt), "d,d");
    assert_eq!(two_opt.distance, 0.0);
    assert_eq!(two_opt.iterations, 1);
}

#[test]
fn test_two_locations_go_there_and_back() {
    let stops = vec![loc("d", 0.0, 0.0), loc("a", 0.0, 1.0)];
    let expected = 2.0 * distance(stops[0].position, stops[1].position);

    for algorithm in Algorithm::ALL {
        let (result, _) = run(algorithm, &stops);
        assert_eq!(ids(&result), "d,a,d", "{}", algorithm);
        assert!(close(result.distance, expected), "{}", algorithm);
        assert!(result.completed);
    }
}

#[test]
fn test_nearest_neighbor_visits_closest_first() {
    let stops = vec![loc("d", 0.0, 0.0), loc("far", 0.0, 2.0), loc("near", 0.0, 1.0)];
    let (result, _) = run(Algorithm::NearestNeighbor, &stops);

    assert_eq!(ids(&result), "d,near,far,d");
    assert_eq!(result.iterations, 2);
    assert!(close(result.distance, route_distance(&result.path)));
}

#[test]
fn test_nearest_neighbor_ties_go_to_input_order() {
    let stops = triangle();
    let (result, _) = run(Algorithm::NearestNeighbor, &stops);
    assert_eq!(ids(&result), "d,a,b,d");

    let swapped = vec![stops[0].clone(), stops[2].clone(), stops[1].clone()];
    let (result, _) = run(Algorithm::NearestNeighbor, &swapped);
    assert_eq!(ids(&result), "d,b,a,d");
}

#[test]
fn test_nearest_neighbor_step_sequence() {
    let (result, steps) = run(Algorithm::NearestNeighbor, &triangle());

    // 2 + 1 candidate evaluations, 2 additions, 1 return.
    assert_eq!(steps.len(), 6);

    assert_eq!(steps[0].description, "Evaluating distance to A: 111.19 km");
    let (from, to) = steps[0].evaluating_edge.clone().unwrap();
    assert_eq!((from.id.as_str(), to.id.as_str()), ("d", "a"));

    assert!(steps[2].description.starts_with("Added A to path"));
    assert!(steps[2].evaluating_edge.is_none());
    assert_eq!(path_ids(&steps[2].current_path), "d,a");
    assert_eq!(steps[2].current_path, steps[2].best_path_so_far);

    let last = steps.last().unwrap();
    assert_eq!(
        last.description,
        format!("Returning to start, total route distance: {:.2} km", result.distance)
    );
    assert_eq!(last.current_path, result.path);
}

#[test]
fn test_nearest_neighbor_added_steps_rebuild_path() {
    let stops = detour();
    let (result, steps) = run(Algorithm::NearestNeighbor, &stops);

    let added: Vec<_> = steps
        .iter()
        .filter(|step| step.description.starts_with("Added "))
        .map(|step| step.current_path.last().unwrap().id.clone())
        .collect();

    let expected: Vec<_> = result.path[1..result.path.len() - 1]
        .iter()
        .map(|location| location.id.clone())
        .collect();

    assert_eq!(added, expected);
    assert_eq!(result.iterations, added.len());
}

#[test]
fn test_brute_force_finds_square_perimeter() {
    let stops = square();
    let (result, steps) = run(Algorithm::BruteForce, &stops);

    let perimeter = route_distance(&stops);
    assert!(close(result.distance, perimeter));
    assert!(is_complete_route(&result.path, &stops));

    for tour in all_tours(&stops) {
        assert!(result.distance <= path_distance(&tour) + 1e-9);
    }

    // 1 + 3 + 6 + 6 recursive calls over three free stops.
    assert_eq!(result.iterations, 16);

    let improvements = steps
        .iter()
        .filter(|step| step.description.starts_with("Found new best route"))
        .count();
    assert!(improvements >= 1);
    assert_eq!(steps.len(), (result.iterations - 1) + improvements);
}

#[test]
fn test_brute_force_step_contents() {
    let (result, steps) = run(Algorithm::BruteForce, &triangle());

    assert_eq!(steps[0].description, "Evaluating permutation 1");
    assert_eq!(path_ids(&steps[0].current_path), "d,a");
    assert!(steps[0].best_path_so_far.is_empty());

    assert_eq!(path_ids(&steps[1].current_path), "d,a,b");
    assert_eq!(steps[1].description, "Evaluating permutation 2");

    assert!(steps[2].description.starts_with("Found new best route with distance"));
    assert_eq!(path_ids(&steps[2].current_path), "d,a,b,d");
    assert_eq!(steps[2].best_path_so_far, steps[2].current_path);

    // Second branch starts after three calls.
    assert_eq!(steps[3].description, "Evaluating permutation 3");
    assert_eq!(path_ids(&steps[3].best_path_so_far), "d,a,b,d");

    assert_eq!(result.iterations, 5);
    assert!(steps.iter().all(|step| step.evaluating_edge.is_none()));
}

#[test]
fn test_brute_force_matches_nearest_neighbor_on_triangle() {
    let stops = triangle();
    let (brute, _) = run(Algorithm::BruteForce, &stops);
    let (nearest, _) = run(Algorithm::NearestNeighbor, &stops);

    assert!(close(brute.distance, nearest.distance));
    assert!(is_complete_route(&brute.path, &stops));
}

#[test]
fn test_two_opt_removes_detour() {
    let stops = detour();
    let (nearest, _) = run(Algorithm::NearestNeighbor, &stops);
    let (two_opt, steps) = run(Algorithm::TwoOpt, &stops);
    let (brute, _) = run(Algorithm::BruteForce, &stops);

    assert_eq!(ids(&nearest), "d,b,c,a,e,d");
    assert!((nearest.distance - 888.501_777_796).abs() < 1e-6);

    assert!(two_opt.distance < nearest.distance);
    assert!((two_opt.distance - 824.385_066_648).abs() < 1e-6);
    assert!(close(two_opt.distance, brute.distance));
    assert!(ids(&two_opt) == "d,b,a,c,e,d" || ids(&two_opt) == "d,e,c,a,b,d");

    assert!(steps[0].description.starts_with("Starting with Nearest Neighbor solution"));
    assert_eq!(steps[0].current_path, nearest.path);

    let checks = steps.iter().filter(|step| step.evaluating_edge.is_some()).count();
    let improvements = steps
        .iter()
        .filter(|step| step.description.starts_with("Improvement found!"))
        .count();
    assert!(improvements >= 1);
    // One sweep per improvement plus the final sweep that finds nothing.
    assert_eq!(two_opt.iterations, checks + improvements + 1);
    assert_eq!(steps.len(), 1 + checks + improvements);
}

#[test]
fn test_two_opt_evaluating_step_shape() {
    let (_, steps) = run(Algorithm::TwoOpt, &detour());

    let first = &steps[1];
    assert!(first.description.starts_with("Evaluating 2-opt swap between positions 1 and 2"));
    // Positions 1..=2 reversed in the candidate, edge taken from the incumbent.
    assert_eq!(path_ids(&first.current_path), "d,c,b,a,e,d");
    assert_eq!(path_ids(&first.best_path_so_far), "d,b,c,a,e,d");
    let (from, to) = first.evaluating_edge.clone().unwrap();
    assert_eq!((from.id.as_str(), to.id.as_str()), ("d", "c"));
}

#[test]
fn test_two_opt_iterations_without_candidate_pairs() {
    let stops = vec![loc("d", 0.0, 0.0), loc("a", 0.0, 1.0)];
    let (result, steps) = run(Algorithm::TwoOpt, &stops);
    assert_eq!(result.iterations, 1);
    assert_eq!(steps.len(), 1);
}

#[test]
fn test_solvers_are_idempotent() {
    let stops = detour();
    for algorithm in Algorithm::ALL {
        let first = solve(algorithm, &stops, None).unwrap();
        let second = solve(algorithm, &stops, None).unwrap();
        assert_eq!(first.path, second.path, "{}", algorithm);
        assert_eq!(first.distance, second.distance, "{}", algorithm);
        assert_eq!(first.iterations, second.iterations, "{}", algorithm);
    }
}

#[test]
fn test_silent_and_recorded_runs_agree() {
    let stops = detour();
    for algorithm in Algorithm::ALL {
        let silent = solve(algorithm, &stops, None).unwrap();
        let (recorded, steps) = run(algorithm, &stops);
        assert_eq!(silent.path, recorded.path);
        assert_eq!(silent.iterations, recorded.iterations);
        assert!(!steps.is_empty());
    }
}

#[test]
fn test_closure_sink_receives_steps() {
    let mut descriptions = Vec::new();
    let mut sink = |step: AlgorithmStep| descriptions.push(step.description);
    NearestNeighbor.solve(&triangle(), &mut sink).unwrap();

    assert_eq!(descriptions.len(), 6);
    assert!(descriptions[5].starts_with("Returning to start"));
}

#[test]
fn test_limited_trace_counts_dropped_steps() {
    let mut trace = StepTrace::with_limit(4);
    let result = solve(Algorithm::BruteForce, &square(), Some(&mut trace)).unwrap();

    assert_eq!(trace.len(), 4);
    assert!(trace.dropped() > 0);
    assert!(trace.total() >= result.iterations);
}

#[test]
fn test_execution_time_comes_from_clock() {
    let clock = ManualClock::ticking(5.0);
    for algorithm in Algorithm::ALL {
        let result = algorithm
            .solver()
            .solve_with(&square(), &mut NoopSink, &clock, &CancelToken::new())
            .unwrap();
        assert_eq!(result.execution_time, 5.0, "{}", algorithm);
        assert_eq!(result.algorithm, algorithm);
    }

    let clock = ManualClock::new();
    clock.advance(12.5);
    assert_eq!(clock.now_ms(), 12.5);
    assert_eq!(clock.now_ms(), 12.5);
}

#[test]
fn test_system_clock_is_monotonic() {
    let clock = SystemClock::new();
    let first = clock.now_ms();
    assert!(clock.now_ms() >= first);
}

#[test]
fn test_pre_cancelled_solves_return_partial_results() {
    let token = CancelToken::new();
    token.cancel();
    let clock = SystemClock::new();
    let stops = square();

    let brute = BruteForce.solve_with(&stops, &mut NoopSink, &clock, &token).unwrap();
    assert!(!brute.completed);
    assert!(brute.path.is_empty());
    assert_eq!(brute.distance, f64::INFINITY);
    assert_eq!(brute.iterations, 0);

    let nearest = NearestNeighbor.solve_with(&stops, &mut NoopSink, &clock, &token).unwrap();
    assert!(!nearest.completed);
    assert_eq!(ids(&nearest), "d,d");
    assert_eq!(nearest.distance, 0.0);

    let two_opt = TwoOpt.solve_with(&stops, &mut NoopSink, &clock, &token).unwrap();
    assert!(!two_opt.completed);
    assert_eq!(ids(&two_opt), "d,d");
    assert_eq!(two_opt.iterations, 0);
}

#[test]
fn test_brute_force_cancelled_mid_run_keeps_best_so_far() {
    let stops = crate::problem::random_locations(6, 7, &Default::default());
    let token = CancelToken::new();
    let trigger = token.clone();

    let mut seen = 0;
    let mut sink = |_step: AlgorithmStep| {
        seen += 1;
        if seen == 20 {
            trigger.cancel();
        }
    };

    let result = BruteForce
        .solve_with(&stops, &mut sink, &SystemClock::new(), &token)
        .unwrap();

    assert!(!result.completed);
    assert!(is_complete_route(&result.path, &stops));
    // Five free stops take 326 calls when run to the end.
    assert!(result.iterations < 326);
}

#[test]
fn test_brute_force_trace_ends_at_last_explored_tour() {
    let stops = square();
    let token = CancelToken::new();
    let trigger = token.clone();

    let mut steps = Vec::new();
    let mut sink = |step: AlgorithmStep| {
        if step.description.starts_with("Found new best route") {
            trigger.cancel();
        }
        steps.push(step);
    };

    let result = BruteForce
        .solve_with(&stops, &mut sink, &SystemClock::new(), &token)
        .unwrap();

    assert!(!result.completed);
    // d,a,b -> leaf, nothing evaluated after the first complete tour.
    assert_eq!(result.iterations, 4);
    let last = steps.last().unwrap();
    assert!(last.description.starts_with("Found new best route"));
    assert_eq!(last.current_path, result.path);
}

#[test]
fn test_nearest_neighbor_cancelled_mid_run_returns_closed_partial_path() {
    let stops = detour();
    let token = CancelToken::new();
    let trigger = token.clone();

    let mut sink = |step: AlgorithmStep| {
        if step.description.starts_with("Added") {
            trigger.cancel();
        }
    };

    let result = NearestNeighbor
        .solve_with(&stops, &mut sink, &SystemClock::new(), &token)
        .unwrap();

    assert!(!result.completed);
    assert_eq!(ids(&result), "d,b,d");
    assert_eq!(result.iterations, 1);
    assert!(close(result.distance, route_distance(&result.path)));
}

#[test]
fn test_two_opt_cancelled_mid_run_keeps_incumbent() {
    let stops = detour();
    let (nearest, _) = run(Algorithm::NearestNeighbor, &stops);
    let token = CancelToken::new();
    let trigger = token.clone();

    let mut steps = Vec::new();
    let mut sink = |step: AlgorithmStep| {
        if step.description.starts_with("Improvement found!") {
            trigger.cancel();
        }
        steps.push(step);
    };

    let result = TwoOpt
        .solve_with(&stops, &mut sink, &SystemClock::new(), &token)
        .unwrap();

    assert!(!result.completed);
    assert!(result.distance < nearest.distance);
    assert!(close(result.distance, route_distance(&result.path)));
    assert!(is_complete_route(&result.path, &stops));

    let last = steps.last().unwrap();
    assert!(last.description.starts_with("Improvement found!"));
    assert_eq!(last.current_path, result.path);
}

#[test]
fn test_deadline_token_fires() {
    let token = CancelToken::with_deadline(std::time::Duration::from_millis(1));
    std::thread::sleep(std::time::Duration::from_millis(50));
    assert!(token.is_cancelled());
}

#[test]
fn test_deadline_is_checked_when_polled() {
    // An elapsed deadline is visible immediately, with nothing running in the background.
    let expired = CancelToken::with_deadline(std::time::Duration::ZERO);
    assert!(expired.is_cancelled());
    assert!(expired.clone().is_cancelled());

    let result = TwoOpt
        .solve_with(&square(), &mut NoopSink, &SystemClock::new(), &expired)
        .unwrap();
    assert!(!result.completed);

    let distant = CancelToken::with_deadline(std::time::Duration::from_secs(3600));
    assert!(distant.deadline().is_some());
    assert!(!distant.is_cancelled());
    for _ in 0..50 {
        let token = distant.clone();
        let result = TwoOpt
            .solve_with(&square(), &mut NoopSink, &SystemClock::new(), &token)
            .unwrap();
        assert!(result.completed);
    }

    distant.cancel();
    assert!(distant.is_cancelled());
    assert_eq!(CancelToken::new().deadline(), None);
}

#[test]
fn test_non_finite_coordinates_do_not_panic() {
    let stops = vec![
        loc("d", 0.0, 0.0),
        loc("x", f64::NAN, 1.0),
        loc("y", 1.0, 1.0),
    ];

    let (nearest, _) = run(Algorithm::NearestNeighbor, &stops);
    assert!(nearest.distance.is_nan());
    assert_eq!(nearest.path.len(), 4);

    let (two_opt, _) = run(Algorithm::TwoOpt, &stops);
    assert!(two_opt.distance.is_nan());
    assert!(two_opt.completed);

    let (brute, _) = run(Algorithm::BruteForce, &stops);
    assert!(brute.path.is_empty());
    assert_eq!(brute.distance, f64::INFINITY);
    assert!(brute.completed);
}

#[test]
fn test_algorithm_catalogue() {
    assert!(Algorithm::BruteForce.is_exact());
    assert!(!Algorithm::TwoOpt.is_exact());
    assert_eq!(Algorithm::TwoOpt.to_string(), "2-Opt Heuristic");
    assert_eq!(Algorithm::NearestNeighbor.solver().algorithm(), Algorithm::NearestNeighbor);

    assert!(Algorithm::BruteForce.warning(10).is_none());
    assert!(Algorithm::NearestNeighbor.warning(50).is_none());
    let warning = Algorithm::BruteForce.warning(11).unwrap();
    assert!(warning.contains("11 locations"));
    assert!(warning.contains("3.63e6"));

    assert_eq!(permutation_count(0), 1);
    assert_eq!(permutation_count(1), 1);
    assert_eq!(permutation_count(4), 6);
    assert_eq!(permutation_count(11), 3_628_800);
    assert_eq!(permutation_count(200), u128::MAX);
}

#[test]
fn test_algorithm_serializes_like_the_cli_names() {
    assert_eq!(serde_json::to_string(&Algorithm::TwoOpt).unwrap(), "\"2-opt\"");
    assert_eq!(serde_json::to_string(&Algorithm::BruteForce).unwrap(), "\"brute-force\"");
}

fn instance() -> impl Strategy<Value = Vec<Location>> {
    prop::collection::vec((-60.0..60.0f64, -170.0..170.0f64), 1..=7).prop_map(|coords| {
        coords
            .into_iter()
            .enumerate()
            .map(|(i, (lat, lng))| Location::new(format!("s{}", i), format!("Stop {}", i), lat, lng))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(40))]

    #[test]
    fn prop_every_solver_returns_a_complete_route(stops in instance()) {
        for algorithm in Algorithm::ALL {
            let result = solve(algorithm, &stops, None).unwrap();
            prop_assert!(is_complete_route(&result.path, &stops), "{}", algorithm);
            prop_assert!(result.completed);
        }
    }

    #[test]
    fn prop_two_opt_never_worse_than_nearest_neighbor(stops in instance()) {
        let nearest = solve(Algorithm::NearestNeighbor, &stops, None).unwrap();
        let two_opt = solve(Algorithm::TwoOpt, &stops, None).unwrap();
        prop_assert!(two_opt.distance <= nearest.distance);
    }

    #[test]
    fn prop_brute_force_is_optimal(stops in instance()) {
        let brute = solve(Algorithm::BruteForce, &stops, None).unwrap();
        let two_opt = solve(Algorithm::TwoOpt, &stops, None).unwrap();
        prop_assert!(brute.distance <= two_opt.distance + 1e-9 * two_opt.distance.max(1.0));
        prop_assert!(close(brute.distance, route_distance(&brute.path)));
    }

    #[test]
    fn prop_nearest_neighbor_trace_rebuilds_route(stops in instance()) {
        let (result, steps) = run(Algorithm::NearestNeighbor, &stops);
        let mut rebuilt = vec![stops[0].clone()];
        rebuilt.extend(
            steps
                .iter()
                .filter(|step| step.description.starts_with("Added "))
                .filter_map(|step| step.current_path.last().cloned()),
        );
        rebuilt.push(stops[0].clone());
        prop_assert_eq!(rebuilt, result.path);
    }
}
