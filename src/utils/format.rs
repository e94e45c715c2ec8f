use crate::types::{Kilometers, Milliseconds};

/// Human readable distance: metres below one kilometre, otherwise kilometres.
pub fn format_distance(distance: Kilometers) -> String {
    if distance < 1.0 {
        return format!("{} m", (distance * 1000.0).round());
    }
    format!("{:.2} km", distance)
}

/// Human readable duration: milliseconds below one second, otherwise seconds.
pub fn format_execution_time(ms: Milliseconds) -> String {
    if ms < 1000.0 {
        return format!("{:.0} ms", ms);
    }
    format!("{:.2} seconds", ms / 1000.0)
}
