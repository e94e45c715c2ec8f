use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::search::{BruteForce, NearestNeighbor, Solver, TwoOpt};

/// Above this many stops brute force gets slow enough to warn about.
pub const BRUTE_FORCE_COMFORT_LIMIT: usize = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    BruteForce,
    NearestNeighbor,
    #[serde(rename = "2-opt")]
    #[value(name = "2-opt", alias = "two-opt")]
    TwoOpt,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::BruteForce,
        Algorithm::NearestNeighbor,
        Algorithm::TwoOpt,
    ];

    pub fn solver(self) -> &'static dyn Solver {
        match self {
            Algorithm::BruteForce => &BruteForce,
            Algorithm::NearestNeighbor => &NearestNeighbor,
            Algorithm::TwoOpt => &TwoOpt,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Algorithm::BruteForce => "Brute Force (Exact)",
            Algorithm::NearestNeighbor => "Nearest Neighbor",
            Algorithm::TwoOpt => "2-Opt Heuristic",
        }
    }

    /// Short name used on the command line and in file names.
    pub fn slug(self) -> &'static str {
        match self {
            Algorithm::BruteForce => "brute-force",
            Algorithm::NearestNeighbor => "nearest-neighbor",
            Algorithm::TwoOpt => "2-opt",
        }
    }

    pub fn complexity(self) -> &'static str {
        match self {
            Algorithm::BruteForce => "O(n!)",
            Algorithm::NearestNeighbor => "O(n^2)",
            Algorithm::TwoOpt => "O(n^2) per sweep",
        }
    }

    /// Whether the returned route is guaranteed optimal.
    pub fn is_exact(self) -> bool {
        matches!(self, Algorithm::BruteForce)
    }

    /// A performance warning for running this algorithm on `location_count` stops, if any.
    pub fn warning(self, location_count: usize) -> Option<String> {
        if self != Algorithm::BruteForce || location_count <= BRUTE_FORCE_COMFORT_LIMIT {
            return None;
        }
        Some(format!(
            "brute force with {} locations will be extremely slow ({:.2e} possible routes)",
            location_count,
            permutation_count(location_count) as f64
        ))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tours brute force enumerates for `location_count` stops with the depot fixed, `(n-1)!`.
///
/// Saturates at `u128::MAX`.
pub fn permutation_count(location_count: usize) -> u128 {
    (2..location_count as u128).fold(1u128, |acc, k| acc.saturating_mul(k))
}
