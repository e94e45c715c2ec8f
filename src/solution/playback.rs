use std::time::Duration;

use crate::solution::AlgorithmStep;

/// Cursor over a recorded step trace.
///
/// The index is clamped to the trace; on an empty trace it stays at 0 and
/// [`Playback::current`] returns `None`.
#[derive(Debug)]
pub struct Playback<'a> {
    steps: &'a [AlgorithmStep],
    index: usize,
}

impl<'a> Playback<'a> {
    pub fn new(steps: &'a [AlgorithmStep]) -> Self {
        Playback { steps, index: 0 }
    }

    #[inline(always)]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn current(&self) -> Option<&'a AlgorithmStep> {
        self.steps.get(self.index)
    }

    pub fn first(&mut self) {
        self.index = 0;
    }

    pub fn last(&mut self) {
        self.index = self.last_index();
    }

    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn next(&mut self) {
        self.seek(self.index + 1);
    }

    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.last_index());
    }

    /// Auto-play tick. Returns `false` once the last step is showing.
    pub fn advance(&mut self) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.last_index()
    }

    /// Percentage of the trace shown so far, counting the current step.
    pub fn progress(&self) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        (self.index + 1) as f64 / self.steps.len() as f64 * 100.0
    }

    /// Auto-play interval for this trace.
    pub fn interval(&self) -> Duration {
        interval_for(self.steps.len())
    }

    fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Long traces play faster so that a run stays watchable.
pub fn interval_for(step_count: usize) -> Duration {
    let millis = match step_count {
        n if n > 1000 => 50,
        n if n > 500 => 100,
        n if n > 100 => 200,
        _ => 500,
    };
    Duration::from_millis(millis)
}
