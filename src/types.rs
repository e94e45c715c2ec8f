use serde::{Deserialize, Serialize};
use std::fmt;

/// Great-circle distance, always in kilometers.
pub type Kilometers = f64;
/// Wall-clock duration in milliseconds.
pub type Milliseconds = f64;

/// A geographic position in decimal degrees.
///
/// Serialized as a `[lat, lng]` pair, matching the way map libraries hand
/// positions around.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Coord {
    pub lat: f64,
    pub lng: f64,
}

impl Coord {
    #[inline(always)]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Coord { lat, lng }
    }

    /// Returns `true` if both components are finite numbers.
    #[inline(always)]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for Coord {
    fn from((lat, lng): (f64, f64)) -> Self {
        Coord { lat, lng }
    }
}

impl From<Coord> for (f64, f64) {
    fn from(coord: Coord) -> Self {
        (coord.lat, coord.lng)
    }
}

/// Opaque location identity. Only equality matters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(value: impl Into<String>) -> Self {
        LocationId(value.into())
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocationId {
    fn from(value: &str) -> Self {
        LocationId(value.to_owned())
    }
}

impl From<String> for LocationId {
    fn from(value: String) -> Self {
        LocationId(value)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
