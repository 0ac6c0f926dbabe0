use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Source of monotonic timestamps, measured from an arbitrary origin.
pub trait TimeSource {
    fn now(&self) -> Duration;
}

/// Wall-clock time from [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced time for deterministic stepping.
///
/// Clones share the same underlying timestamp, so a host can keep one handle
/// and give another to the clock.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Frame timing snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Seconds since the previous tick (or since the clock started).
    pub delta: f32,
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Monotonic frame counter, starting at 0.
    pub frame_index: u64,
}

/// Frame clock producing [`FrameTiming`] snapshots.
///
/// Starts when constructed. Timestamps that go backwards are treated as no
/// time passing, so `delta >= 0` and `elapsed` never decreases.
pub struct FrameClock {
    source: Box<dyn TimeSource>,
    start: Duration,
    last: Duration,
    frame_index: u64,
}

impl FrameClock {
    /// Clock over wall-clock time.
    pub fn new() -> Self {
        Self::with_source(MonotonicTime::new())
    }

    pub fn with_source(source: impl TimeSource + 'static) -> Self {
        let start = source.now();
        Self {
            source: Box::new(source),
            start,
            last: start,
            frame_index: 0,
        }
    }

    /// Advances the clock and returns a new `FrameTiming`.
    pub fn tick(&mut self) -> FrameTiming {
        let now = self.source.now().max(self.last);
        let delta = now - self.last;
        self.last = now;

        let timing = FrameTiming {
            delta: delta.as_secs_f32(),
            elapsed: (now - self.start).as_secs_f32(),
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        timing
    }

    /// Seconds since the clock started, without advancing it.
    pub fn elapsed(&self) -> f32 {
        (self.last - self.start).as_secs_f32()
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameClock")
            .field("start", &self.start)
            .field("last", &self.last)
            .field("frame_index", &self.frame_index)
            .finish_non_exhaustive()
    }
}
