//! Simulated wall clock for the desktop window.
//!
//! Seeded from the host clock (UTC) at startup. A time-warp multiplier
//! compresses hours of hand motion into seconds for visual inspection.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use epicycle_common::hands::{TimeOfDay, TimeUnits};

const MILLIS_PER_DAY: u64 = 24 * 60 * 60 * 1000;

/// Selectable warp factors, cycled with the bracket keys.
const WARP_STEPS: [u32; 5] = [1, 10, 60, 600, 3600];

/// Milliseconds-of-day counter advanced by scaled real time.
pub struct SimClock {
    millis_of_day: u64,
    warp_idx: usize,
}

impl SimClock {
    /// Seed from the host's UTC time of day, warp x1.
    pub fn from_host() -> Self {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        Self {
            millis_of_day: since_epoch.as_millis() as u64 % MILLIS_PER_DAY,
            warp_idx: 0,
        }
    }

    /// Current time-of-day snapshot.
    pub fn time(&self) -> TimeOfDay {
        let seconds = self.millis_of_day / 1000;
        TimeOfDay::new(
            (seconds / 3600) as u8,
            (seconds / 60 % 60) as u8,
            (seconds % 60) as u8,
        )
    }

    /// Advance by a slice of real time, scaled by the warp factor.
    ///
    /// Returns the units whose value changed.
    pub fn advance(&mut self, real_elapsed: Duration) -> TimeUnits {
        let prev = self.time();
        let scaled = real_elapsed.as_millis() as u64 * u64::from(self.warp());
        self.millis_of_day = (self.millis_of_day + scaled) % MILLIS_PER_DAY;
        self.time().changed_since(prev)
    }

    pub fn warp(&self) -> u32 {
        WARP_STEPS[self.warp_idx]
    }

    pub fn warp_up(&mut self) -> u32 {
        if self.warp_idx + 1 < WARP_STEPS.len() {
            self.warp_idx += 1;
        }
        self.warp()
    }

    pub fn warp_down(&mut self) -> u32 {
        self.warp_idx = self.warp_idx.saturating_sub(1);
        self.warp()
    }
}
