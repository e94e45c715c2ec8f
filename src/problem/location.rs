use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::types::{Coord, LocationId};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LENGTH: usize = 7;

/// A stop on a delivery route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    /// Display label.
    pub name: String,
    pub position: Coord,
}

impl Location {
    pub fn new(id: impl Into<LocationId>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Location {
            id: id.into(),
            name: name.into(),
            position: Coord::new(lat, lng),
        }
    }

    /// Creates a location with a freshly generated id.
    pub fn named(name: impl Into<String>, position: Coord) -> Self {
        Location {
            id: generate_id(&mut rand::rng()),
            name: name.into(),
            position,
        }
    }
}

/// Draws a short base-36 id, e.g. `k3j9x0a`.
pub fn generate_id<R: Rng + ?Sized>(rng: &mut R) -> LocationId {
    let id: String = (0..ID_LENGTH)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();
    LocationId::new(id)
}

/// On-disk shape of a location; the id may be omitted.
#[derive(Debug, Deserialize)]
pub(crate) struct LocationRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub position: Coord,
}

impl LocationRecord {
    pub(crate) fn into_location<R: Rng + ?Sized>(self, rng: &mut R) -> Location {
        Location {
            id: self.id.map(LocationId::new).unwrap_or_else(|| generate_id(rng)),
            name: self.name,
            position: self.position,
        }
    }
}
