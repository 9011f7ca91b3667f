//! Fixed-rate pacing for animated traversal.

use std::{
    thread,
    time::{Duration, Instant},
};

/// Paces frames to a fixed rate; a rate of zero disables pacing.
#[derive(Debug)]
pub(crate) struct FrameClock {
    interval: Option<Duration>,
    next_frame: Option<Instant>,
}

impl FrameClock {
    pub(crate) const DEFAULT_FPS: u32 = 7;

    pub(crate) fn new(fps: u32) -> Self {
        Self {
            interval: (fps > 0).then(|| Duration::from_secs(1) / fps),
            next_frame: None,
        }
    }

    /// Time between two frames, if pacing is enabled.
    pub(crate) const fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Blocks until the next frame is due.
    ///
    /// The first call returns immediately. A frame that overran its slot
    /// starts the next slot from the current instant rather than catching up.
    pub(crate) fn tick(&mut self) {
        let Some(interval) = self.interval else {
            return;
        };

        let now = Instant::now();
        let due = match self.next_frame {
            Some(due) if due > now => {
                thread::sleep(due - now);
                due
            }
            _ => now,
        };
        self.next_frame = due.checked_add(interval);
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FPS)
    }
}
