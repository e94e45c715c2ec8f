use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::problem::location::{Location, generate_id};
use crate::types::Coord;

/// Rectangle in degrees that random stops are drawn from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Default for BoundingBox {
    /// Roughly a city-sized area around central Oslo.
    fn default() -> Self {
        BoundingBox {
            min_lat: 59.85,
            max_lat: 59.99,
            min_lng: 10.60,
            max_lng: 10.90,
        }
    }
}

impl BoundingBox {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Coord {
        Coord::new(
            rng.random_range(self.min_lat..=self.max_lat),
            rng.random_range(self.min_lng..=self.max_lng),
        )
    }
}

/// Draws `count` stops uniformly inside `bounds`.
///
/// The same seed always yields the same stops, ids included.
pub fn random_locations(count: usize, seed: u64, bounds: &BoundingBox) -> Vec<Location> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let id = generate_id(&mut rng);
            let name = if i == 0 {
                "Depot".to_string()
            } else {
                format!("Stop {}", i)
            };
            Location {
                id,
                name,
                position: bounds.sample(&mut rng),
            }
        })
        .collect()
}
