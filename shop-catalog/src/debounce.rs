//! Price input debounce
//!
//! Trailing-edge debounce: every edit pushes the deadline out by the full
//! window, and the live range is promoted only once the deadline passes
//! without another edit.

use rust_decimal::Decimal;
use tokio::time::{Duration, Instant};

use crate::criteria::{PriceBound, PriceRange};

/// Quiescence window before a price edit takes effect
pub const PRICE_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct PriceDebouncer {
    window: Duration,
    live: PriceRange,
    deadline: Option<Instant>,
}

impl Default for PriceDebouncer {
    fn default() -> Self {
        Self::new(PRICE_DEBOUNCE)
    }
}

impl PriceDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            live: PriceRange::default(),
            deadline: None,
        }
    }

    /// Price range as currently typed, possibly not yet in effect
    pub fn live(&self) -> &PriceRange {
        &self.live
    }

    pub fn edit(&mut self, bound: PriceBound, value: Option<Decimal>, now: Instant) {
        self.live.set(bound, value);
        self.deadline = Some(now + self.window);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Promote the live range once the window has elapsed
    pub fn take_if_due(&mut self, now: Instant) -> Option<PriceRange> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(self.live.clone())
            }
            _ => None,
        }
    }

    /// Drop any pending edit and empty the inputs
    pub fn reset(&mut self) {
        self.live = PriceRange::default();
        self.deadline = None;
    }
}
