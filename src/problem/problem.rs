use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::problem::location::{Location, LocationRecord};

/// Fewest stops worth planning a route for.
pub const MIN_ROUTABLE_LOCATIONS: usize = 3;

/// A validated set of stops. The first location is the depot.
#[derive(Clone, Debug, PartialEq)]
pub struct Problem {
    locations: Vec<Location>,
}

impl Problem {
    /// Loads a problem from a JSON array of `{ "id"?, "name", "position": [lat, lng] }`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let problem = Self::from_json(&contents)?;

        debug!("loaded {} locations from {}", problem.len(), path.display());

        Ok(problem)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let records: Vec<LocationRecord> = serde_json::from_str(contents)?;

        let mut rng = rand::rng();
        let locations = records
            .into_iter()
            .map(|record| record.into_location(&mut rng))
            .collect();

        Self::from_locations(locations)
    }

    /// Wraps `locations`, rejecting duplicate ids.
    pub fn from_locations(locations: Vec<Location>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(locations.len());
        for location in &locations {
            if !seen.insert(&location.id) {
                return Err(Error::invalid_input(format!(
                    "duplicate location id '{}'",
                    location.id
                )));
            }
            if !location.position.is_finite() {
                warn!(
                    "location '{}' has non-finite coordinates, distances through it will not be finite",
                    location.id
                );
            }
        }

        Ok(Problem { locations })
    }

    #[inline(always)]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    #[inline(always)]
    pub fn depot(&self) -> Option<&Location> {
        self.locations.first()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Fails unless there are enough stops to make routing meaningful.
    pub fn ensure_routable(&self) -> Result<()> {
        if self.len() < MIN_ROUTABLE_LOCATIONS {
            return Err(Error::TooFewLocations {
                required: MIN_ROUTABLE_LOCATIONS,
                actual: self.len(),
            });
        }
        Ok(())
    }

    pub fn into_locations(self) -> Vec<Location> {
        self.locations
    }
}
