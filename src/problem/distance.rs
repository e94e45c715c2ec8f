use crate::problem::Location;
use crate::types::{Coord, Kilometers};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two positions (haversine).
///
/// Coordinates are not range checked; non-finite input yields a non-finite
/// distance instead of a panic.
pub fn distance(a: Coord, b: Coord) -> Kilometers {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let sin_lat = (d_lat / 2.0).sin();
    let sin_lng = (d_lng / 2.0).sin();

    let h = sin_lat * sin_lat
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * sin_lng * sin_lng;
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Sum of consecutive legs along `coords`, without returning to the start.
pub fn polyline_distance<I>(coords: I) -> Kilometers
where
    I: IntoIterator<Item = Coord>,
{
    let mut coords = coords.into_iter();
    let Some(mut last) = coords.next() else {
        return 0.0;
    };

    let mut total = 0.0;
    for coord in coords {
        total += distance(last, coord);
        last = coord;
    }
    total
}

/// Sum of consecutive legs along `coords` plus the leg from the last position
/// back to the first one.
///
/// A sequence that already ends at its start gets a zero-length closing leg,
/// so open and closed tours measure the same.
pub fn tour_distance<I>(coords: I) -> Kilometers
where
    I: IntoIterator<Item = Coord>,
{
    let mut coords = coords.into_iter();
    let Some(first) = coords.next() else {
        return 0.0;
    };

    let mut total = 0.0;
    let mut last = first;
    for coord in coords {
        total += distance(last, coord);
        last = coord;
    }
    total + distance(last, first)
}

/// Total length of `route` treated as a cycle (see [`tour_distance`]).
///
/// Empty and single-stop routes measure `0.0`.
pub fn route_distance(route: &[Location]) -> Kilometers {
    tour_distance(route.iter().map(|location| location.position))
}

/// Total length of `path` along its stops only, no closing leg.
pub fn path_distance(path: &[Location]) -> Kilometers {
    polyline_distance(path.iter().map(|location| location.position))
}
