pub mod distance;
pub mod generate;
mod location;
mod problem;

pub use distance::{distance, path_distance, route_distance, tour_distance};
pub use generate::{BoundingBox, random_locations};
pub use location::{Location, generate_id};
pub use problem::{MIN_ROUTABLE_LOCATIONS, Problem};
