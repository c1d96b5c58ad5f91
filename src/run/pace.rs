//! Randomized request pacing
//!
//! Every operation class has a configured [min,max] delay window and
//! each call draws uniformly from it. The limiter only produces the
//! duration; callers do the actual sleeping.

use crate::config::{DelayRange, PacingConfig};
use rand::Rng;
use std::time::Duration;

/// Operation classes with distinct pacing windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpClass {
    /// After rendering a listing page, before reading links
    ListingFetch,
    /// After rendering an item page, before extraction
    ItemFetch,
    /// Between listing pages
    PagePause,
    /// Before re-running a failed fetch cycle
    RetryBackoff,
}

/// Draws randomized delays per operation class
pub struct RateLimiter {
    pacing: PacingConfig,
}

impl RateLimiter {
    pub fn new(pacing: PacingConfig) -> Self {
        Self { pacing }
    }

    /// A delay drawn uniformly from the class's configured window
    pub fn delay(&self, op: OpClass) -> Duration {
        let range = self.range(op);
        let secs = if range.max_secs > range.min_secs {
            rand::thread_rng().gen_range(range.min_secs..=range.max_secs)
        } else {
            range.min_secs
        };
        Duration::from_secs_f64(secs)
    }

    fn range(&self, op: OpClass) -> DelayRange {
        match op {
            OpClass::ListingFetch => self.pacing.listing_fetch,
            OpClass::ItemFetch => self.pacing.item_fetch,
            OpClass::PagePause => self.pacing.page_pause,
            OpClass::RetryBackoff => self.pacing.retry_backoff,
        }
    }
}
