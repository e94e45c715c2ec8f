use std::collections::HashMap;

use crate::problem::Location;
use crate::types::LocationId;

/// Returns `true` if `path` starts and ends at the same location.
pub fn is_closed(path: &[Location]) -> bool {
    match (path.first(), path.last()) {
        (Some(first), Some(last)) => path.len() >= 2 && first.id == last.id,
        _ => false,
    }
}

/// Checks that `path` is a complete route over `locations`: it starts and
/// ends at the depot (`locations[0]`) and visits every other location exactly
/// once in between.
pub fn is_complete_route(path: &[Location], locations: &[Location]) -> bool {
    let Some(depot) = locations.first() else {
        return false;
    };
    if !is_closed(path) || path[0].id != depot.id || path.len() != locations.len() + 1 {
        return false;
    }

    let mut pending: HashMap<&LocationId, usize> = HashMap::new();
    for location in &locations[1..] {
        *pending.entry(&location.id).or_insert(0) += 1;
    }

    for stop in &path[1..path.len() - 1] {
        match pending.get_mut(&stop.id) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }

    pending.values().all(|&count| count == 0)
}

/// Comma separated ids along `path`, as written to traces.
pub fn path_ids(path: &[Location]) -> String {
    path.iter()
        .map(|location| location.id.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

/// Display names along `path` joined with arrows.
pub fn describe(path: &[Location]) -> String {
    path.iter()
        .map(|location| location.name.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
