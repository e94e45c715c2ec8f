//! Delivery route planning over small Traveling Salesperson instances.
//!
//! Three solvers share one distance model and record a step trace that can be
//! replayed to animate how a route was found:
//!
//! * [`Algorithm::BruteForce`] enumerates every tour with the depot fixed,
//! * [`Algorithm::NearestNeighbor`] builds a tour greedily,
//! * [`Algorithm::TwoOpt`] improves the nearest neighbor tour by segment reversal.
//!
//! ```
//! use delivery_tsp::{solve, Algorithm, Location, StepTrace};
//!
//! let stops = vec![
//!     Location::new("depot", "Depot", 0.0, 0.0),
//!     Location::new("a", "A", 0.0, 1.0),
//!     Location::new("b", "B", 1.0, 0.0),
//! ];
//!
//! let mut trace = StepTrace::new();
//! let result = solve(Algorithm::TwoOpt, &stops, Some(&mut trace)).unwrap();
//!
//! assert_eq!(result.path.len(), 4);
//! assert!(!trace.is_empty());
//! ```

pub mod error;
pub mod logging;
pub mod metrics;
pub mod problem;
pub mod search;
pub mod solution;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use problem::{Location, Problem, distance, route_distance};
pub use search::{Algorithm, CancelToken, Solver, solve};
pub use search::recorder::{NoopSink, StepSink, StepTrace};
pub use solution::{AlgorithmStep, Playback, RouteResult};
pub use types::{Coord, Kilometers, LocationId, Milliseconds};
