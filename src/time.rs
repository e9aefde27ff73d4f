//! Loop timing and stop signalling.

use core::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::delay::DelayNs;

/// Fixed-period tick for the control loop.
///
/// The period is a plain pause after each iteration, so the true loop period is
/// the tick plus however long the iteration itself took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ticker {
    period_ms: u32,
}

impl Ticker {
    pub const fn new(period_ms: u32) -> Self {
        Self { period_ms }
    }

    /// Blocks for one period.
    #[inline]
    pub fn wait<D: DelayNs>(&self, delay: &mut D) {
        delay.delay_ms(self.period_ms);
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}

/// Flag for asking a running controller to return.
///
/// Can live in a `static` and be set from an interrupt handler.
#[derive(Debug, Default)]
pub struct StopSignal {
    requested: AtomicBool,
}

impl StopSignal {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Asks the controller to stop before its next iteration.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    /// Returns true once [`request`](Self::request) has been called.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Clears a previous request.
    pub fn reset(&self) {
        self.requested.store(false, Ordering::Release);
    }
}
