//! Clock and frame pacing
//!
//! The simulation runs one tick per frame at a fixed rate but reads
//! wall-clock milliseconds for cooldowns and fades, so both live here.

use std::time::Instant;

use crate::consts::TICK_MS;

/// Catch-up ticks allowed per frame before the backlog is dropped
pub const MAX_SUBSTEPS: u32 = 4;

/// Monotonic milliseconds since the clock was created
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    startup: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            startup: Instant::now(),
        }
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.startup.elapsed().as_millis() as u64
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-rate tick scheduler
///
/// Feed it the clock once per frame; it answers how many ticks are due.
/// A long stall (debugger, suspended window) runs at most `MAX_SUBSTEPS`
/// ticks and forgets the rest instead of fast-forwarding the game.
#[derive(Debug, Clone, Default)]
pub struct FramePacer {
    last_ms: Option<u64>,
    accumulator_ms: u64,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks to run for a frame observed at `now_ms`
    pub fn due_ticks(&mut self, now_ms: u64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            // First frame always ticks once
            return 1;
        };
        self.accumulator_ms += now_ms.saturating_sub(last);

        let due = self.accumulator_ms / TICK_MS;
        if due > MAX_SUBSTEPS as u64 {
            log::debug!("Dropping {} ticks of backlog", due - MAX_SUBSTEPS as u64);
            self.accumulator_ms = 0;
            return MAX_SUBSTEPS;
        }
        self.accumulator_ms -= due * TICK_MS;
        due as u32
    }

    /// Milliseconds until the next tick is due, for sleeping between frames
    pub fn until_next_ms(&self) -> u64 {
        TICK_MS.saturating_sub(self.accumulator_ms)
    }

    /// Forget accumulated time, e.g. after a pause in the host loop
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator_ms = 0;
    }
}
