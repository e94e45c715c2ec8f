use std::cell::Cell;
use std::time::Instant;

use crate::types::Milliseconds;

/// Source of monotonic time for measuring solves.
pub trait Clock {
    /// Milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> Milliseconds;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> Milliseconds {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for tests. Every reading advances it by `tick`.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Milliseconds>,
    tick: Milliseconds,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock::default()
    }

    pub fn ticking(tick: Milliseconds) -> Self {
        ManualClock {
            now: Cell::new(0.0),
            tick,
        }
    }

    pub fn advance(&self, ms: Milliseconds) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> Milliseconds {
        let now = self.now.get();
        self.now.set(now + self.tick);
        now
    }
}

/// Elapsed time since construction, read from a [`Clock`].
pub(crate) struct Stopwatch<'a> {
    clock: &'a dyn Clock,
    started: Milliseconds,
}

impl<'a> Stopwatch<'a> {
    pub(crate) fn start(clock: &'a dyn Clock) -> Self {
        Stopwatch {
            clock,
            started: clock.now_ms(),
        }
    }

    pub(crate) fn elapsed_ms(&self) -> Milliseconds {
        self.clock.now_ms() - self.started
    }
}
