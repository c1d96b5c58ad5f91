//! End-of-results detection for paginated discovery
//!
//! A run of consecutive link-less listing pages signals that the site
//! has no further results, even when the configured page range extends
//! beyond them.

/// Discovery run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryState {
    Running,
    Stopped,
}

/// Counts consecutive empty pages and stops discovery at a threshold
///
/// Any page yielding at least one link resets the streak. Once stopped,
/// the tracker stays stopped.
#[derive(Debug)]
pub struct TerminationTracker {
    empty_streak: u32,
    threshold: u32,
    state: DiscoveryState,
}

impl TerminationTracker {
    pub fn new(threshold: u32) -> Self {
        Self {
            empty_streak: 0,
            threshold,
            state: DiscoveryState::Running,
        }
    }

    /// Records the link count of one processed page and returns the
    /// resulting state
    pub fn observe_page(&mut self, link_count: usize) -> DiscoveryState {
        if self.state == DiscoveryState::Stopped {
            return self.state;
        }

        if link_count == 0 {
            self.empty_streak += 1;
            tracing::info!(
                "Empty page detected ({}/{})",
                self.empty_streak,
                self.threshold
            );
            if self.empty_streak >= self.threshold {
                self.state = DiscoveryState::Stopped;
            }
        } else {
            self.empty_streak = 0;
        }

        self.state
    }

    pub fn state(&self) -> DiscoveryState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == DiscoveryState::Stopped
    }

    pub fn empty_streak(&self) -> u32 {
        self.empty_streak
    }
}
