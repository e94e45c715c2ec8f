use crate::problem::Location;

/// A snapshot of solver progress, recorded for playback.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgorithmStep {
    /// Route or partial route at this instant.
    pub current_path: Vec<Location>,
    /// Edge being compared, for highlighting.
    pub evaluating_edge: Option<(Location, Location)>,
    /// Best known route at this instant.
    pub best_path_so_far: Vec<Location>,
    pub description: String,
}

impl AlgorithmStep {
    pub fn new(
        current_path: Vec<Location>,
        best_path_so_far: Vec<Location>,
        description: impl Into<String>,
    ) -> Self {
        AlgorithmStep {
            current_path,
            evaluating_edge: None,
            best_path_so_far,
            description: description.into(),
        }
    }

    pub fn with_edge(mut self, from: &Location, to: &Location) -> Self {
        self.evaluating_edge = Some((from.clone(), to.clone()));
        self
    }
}
