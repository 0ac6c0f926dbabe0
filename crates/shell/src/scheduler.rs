use std::time::{Duration, Instant};

/// How the next frame gets scheduled after a tick completes.
///
/// Display-synced hosts ask their window for a redraw; headless hosts use a
/// timer or step by hand. The shell only ever calls [`request_frame`] at the
/// end of a tick; [`next_frame`] is for hosts that let
/// [`SceneShell::run`](crate::SceneShell::run) own the loop.
///
/// [`request_frame`]: FrameScheduler::request_frame
/// [`next_frame`]: FrameScheduler::next_frame
pub trait FrameScheduler {
    /// Ask for one more frame.
    fn request_frame(&mut self);

    /// Wait for the requested frame to be due. Returns `false` when no frame
    /// is pending.
    fn next_frame(&mut self) -> bool;
}

/// Frames are due immediately once requested.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    pending: bool,
    requested: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of frames requested so far.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.pending = true;
        self.requested += 1;
    }

    fn next_frame(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// Fixed-rate timer: each requested frame is due one period after the last.
///
/// Deadlines advance from the previous deadline, not from the moment the
/// frame was requested, so time spent inside a tick does not stretch the
/// period. A timer that has fallen behind makes the next frame due at once.
#[derive(Debug)]
pub struct IntervalScheduler {
    period: Duration,
    deadline: Option<Instant>,
    last_due: Option<Instant>,
}

impl IntervalScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            deadline: None,
            last_due: None,
        }
    }

    /// Timer ticking `fps` times per second.
    pub fn from_fps(fps: f64) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / fps.max(1.0)))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) {
        if self.deadline.is_some() {
            return;
        }
        let now = Instant::now();
        let due = match self.last_due {
            Some(last) => (last + self.period).max(now),
            None => now + self.period,
        };
        self.deadline = Some(due);
    }

    fn next_frame(&mut self) -> bool {
        let Some(deadline) = self.deadline.take() else {
            return false;
        };
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        self.last_due = Some(deadline);
        true
    }
}
