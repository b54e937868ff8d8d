//! Game clock - gravity scheduling
//!
//! The host calls [`GameState::tick`](crate::GameState::tick) once per frame
//! with the current time from a [`TimeSource`]. The clock accumulates elapsed
//! time while it is scheduled and reports when an automatic downward step is
//! due. Starting the clock (on game start and on resume) only records a
//! baseline, so time spent paused never counts. Time accumulated before a
//! pause carries over; only a gravity step or [`GameClock::reset`] clears it.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic millisecond time supplied by the host
pub trait TimeSource {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time measured from creation
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
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven time for tests and replays
#[derive(Debug, Default)]
pub struct ManualTime {
    now: Cell<u64>,
}

impl ManualTime {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Gravity scheduler
#[derive(Debug, Clone, Default)]
pub struct GameClock {
    scheduled: bool,
    last_tick_ms: Option<u64>,
    accumulated_ms: u64,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin (or resume) scheduling. The next advance sets the baseline.
    pub fn start(&mut self) {
        self.scheduled = true;
        self.last_tick_ms = None;
    }

    /// Stop scheduling, keeping the accumulated time.
    pub fn stop(&mut self) {
        self.scheduled = false;
        self.last_tick_ms = None;
    }

    /// Stop and forget any accumulated time.
    pub fn reset(&mut self) {
        self.stop();
        self.accumulated_ms = 0;
    }

    pub fn is_scheduled(&self) -> bool {
        self.scheduled
    }

    /// Time accumulated toward the next gravity step
    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }

    /// Feed the current time. Returns true when more than `interval_ms` has
    /// accumulated since the last step; the accumulator then starts over.
    pub fn advance(&mut self, now_ms: u64, interval_ms: u32) -> bool {
        if !self.scheduled {
            return false;
        }

        let Some(last) = self.last_tick_ms.replace(now_ms) else {
            return false;
        };

        self.accumulated_ms += now_ms.saturating_sub(last);
        if self.accumulated_ms > interval_ms as u64 {
            self.accumulated_ms = 0;
            return true;
        }

        false
    }
}
