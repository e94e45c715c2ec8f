use crate::solution::AlgorithmStep;

/// Observer that solvers report their progress to.
///
/// Steps arrive synchronously, in the order the solver produced them. A sink
/// cannot influence the solve; solvers may skip building snapshots when
/// [`StepSink::is_recording`] is `false`.
pub trait StepSink {
    fn record(&mut self, step: AlgorithmStep);

    fn is_recording(&self) -> bool {
        true
    }
}

impl<F> StepSink for F
where
    F: FnMut(AlgorithmStep),
{
    fn record(&mut self, step: AlgorithmStep) {
        self(step)
    }
}

/// Discards everything; solvers run silently.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopSink;

impl StepSink for NoopSink {
    fn record(&mut self, _step: AlgorithmStep) {}

    fn is_recording(&self) -> bool {
        false
    }
}

/// Collects steps in memory, optionally keeping only the first `limit`.
///
/// Steps beyond the limit are counted but dropped.
#[derive(Debug, Default)]
pub struct StepTrace {
    steps: Vec<AlgorithmStep>,
    limit: Option<usize>,
    dropped: usize,
}

impl StepTrace {
    pub fn new() -> Self {
        StepTrace::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        StepTrace {
            steps: Vec::with_capacity(limit.min(4096)),
            limit: Some(limit),
            dropped: 0,
        }
    }

    #[inline(always)]
    pub fn steps(&self) -> &[AlgorithmStep] {
        &self.steps
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps that arrived after the limit was reached.
    #[inline(always)]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Steps seen in total, kept or not.
    pub fn total(&self) -> usize {
        self.steps.len() + self.dropped
    }

    pub fn into_steps(self) -> Vec<AlgorithmStep> {
        self.steps
    }
}

impl StepSink for StepTrace {
    fn record(&mut self, step: AlgorithmStep) {
        match self.limit {
            Some(limit) if self.steps.len() >= limit => self.dropped += 1,
            _ => self.steps.push(step),
        }
    }
}
