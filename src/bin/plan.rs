use std::fs;
use std::path::Path;
use std::time::Duration;

use log::{error, info, warn};
use serde::Serialize;

use delivery_tsp::logging::init_logger;
use delivery_tsp::metrics::{records_from_steps, serialize_to_parquet};
use delivery_tsp::problem::{BoundingBox, Problem, random_locations};
use delivery_tsp::search::{Algorithm, CancelToken, StepTrace, SystemClock};
use delivery_tsp::solution::route::{describe, is_complete_route};
use delivery_tsp::solution::{RouteResult, interval_for};
use delivery_tsp::utils::{Args, Parser, enumerate_input_files, format_distance, format_execution_time};

#[derive(Serialize)]
struct InstanceReport {
    instance: String,
    locations: usize,
    results: Vec<RouteResult>,
}

fn main() -> delivery_tsp::Result<()> {
    let args = Args::parse();

    init_logger(args.log_level, args.log_format, args.log_timestamp)?;

    let mut instances = Vec::new();

    if let Some(count) = args.random {
        let locations = random_locations(count, args.seed, &BoundingBox::default());
        instances.push((format!("random_{}_seed_{}", count, args.seed), Problem::from_locations(locations)?));
    }

    for path in enumerate_input_files(&args)? {
        match Problem::load(&path) {
            Ok(problem) => {
                let name = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or("instance")
                    .to_string();
                instances.push((name, problem));
            }
            Err(e) => {
                error!("Failed to load locations '{}': {}", path.display(), e);
                continue;
            }
        }
    }

    let algorithms = args.algorithms();
    let runs = args.runs.max(1) as usize;
    let mut reports = Vec::with_capacity(instances.len());

    for (name, problem) in instances {
        if let Err(e) = problem.ensure_routable() {
            error!("Skipping '{}': {}", name, e);
            continue;
        }

        println!("------");
        println!("Instance: {} ({} locations)", name, problem.len());

        let mut results: Vec<RouteResult> = Vec::with_capacity(algorithms.len());

        for &algorithm in &algorithms {
            if let Some(message) = algorithm.warning(problem.len()) {
                warn!("{}", message);
            }

            let mut best: Option<(RouteResult, StepTrace)> = None;
            let mut total_time = 0.0;

            for run in 1..=runs {
                let cancel = args
                    .time_limit
                    .map(|secs| CancelToken::with_deadline(Duration::from_secs(secs as u64)))
                    .unwrap_or_default();
                let mut trace = args
                    .trace_limit
                    .map(StepTrace::with_limit)
                    .unwrap_or_default();

                let result = algorithm.solver().solve_with(
                    problem.locations(),
                    &mut trace,
                    &SystemClock::new(),
                    &cancel,
                )?;

                info!(
                    "{} run {}/{}: {} in {}",
                    algorithm.slug(),
                    run,
                    runs,
                    format_distance(result.distance),
                    format_execution_time(result.execution_time)
                );

                if result.completed && !is_complete_route(&result.path, problem.locations()) {
                    warn!("{} returned an incomplete route", algorithm.label());
                }

                total_time += result.execution_time;

                let replace = match &best {
                    Some((incumbent, _)) => result.distance < incumbent.distance,
                    None => true,
                };
                if replace {
                    best = Some((result, trace));
                }
            }

            let Some((result, trace)) = best else {
                continue;
            };

            println!();
            println!("Algorithm: {} [{}]", algorithm.label(), algorithm.complexity());
            println!("Total distance: {}", format_distance(result.distance));
            println!("Execution time: {} (average over {} runs)", format_execution_time(total_time / runs as f64), runs);
            println!("Iterations: {}", result.iterations);
            println!(
                "Steps recorded: {} ({} dropped), playback every {:?}",
                trace.len(),
                trace.dropped(),
                interval_for(trace.len())
            );
            if !result.completed {
                println!("Stopped early at the time limit, best route so far:");
            }
            println!("Route: {}", describe(&result.path));

            if let Some(dir) = &args.trace_dir {
                fs::create_dir_all(dir)?;
                let file = dir.join(format!("{}_{}.parquet", name, algorithm.slug()));
                serialize_to_parquet(&records_from_steps(trace.steps()), &file)?;
                info!("Wrote {} steps to {}", trace.len(), file.display());
            }

            results.push(result);
        }

        let baseline = results
            .iter()
            .find(|result| result.algorithm == Algorithm::NearestNeighbor);
        if let Some(baseline) = baseline {
            println!();
            for result in results.iter().filter(|result| result.algorithm != Algorithm::NearestNeighbor) {
                println!(
                    "Improvement of {} over nearest neighbor: {:.2}%",
                    result.algorithm.label(),
                    result.improvement_over(baseline)
                );
            }
        }

        reports.push(InstanceReport {
            instance: name,
            locations: problem.len(),
            results,
        });
    }

    if let Some(output) = &args.output {
        write_reports(&reports, output)?;
        info!("Wrote {} reports to {}", reports.len(), output.display());
    }

    Ok(())
}

fn write_reports(reports: &[InstanceReport], path: &Path) -> delivery_tsp::Result<()> {
    let json = serde_json::to_string_pretty(reports)?;
    fs::write(path, json)?;
    Ok(())
}
