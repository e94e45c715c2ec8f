mod playback;
mod result;
pub mod route;
mod step;

pub use playback::{Playback, interval_for};
pub use result::RouteResult;
pub use step::AlgorithmStep;
