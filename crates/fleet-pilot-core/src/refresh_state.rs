//! Refresh bookkeeping
//!
//! Tracks dispatched generations, outstanding fetches and the outcome of the
//! last applied refresh. The loading flag and the stale signal are both
//! derived from this state.

use crate::errors::{ErrorCategory, RefreshError, categorize_error, format_refresh_error};
use chrono::{DateTime, Local};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};

/// The last refresh that failed, kept for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshFailure {
    pub message: String,
    pub category: ErrorCategory,
    pub at: DateTime<Local>,
}

/// Generation and outcome tracking for overlapping refreshes
///
/// # Examples
///
/// ```
/// use fleet_pilot_core::refresh_state::RefreshState;
///
/// let mut state = RefreshState::new();
/// let first = state.begin();
/// let second = state.begin();
/// assert!(state.is_loading());
///
/// // The older response arrives first and is not the latest
/// assert!(!state.settle(first));
/// assert!(state.is_loading());
///
/// assert!(state.settle(second));
/// assert!(!state.is_loading());
///
/// // Each generation settles once
/// assert!(!state.settle(second));
/// ```
#[derive(Debug, Clone, Default)]
pub struct RefreshState {
    /// Generation of the most recently dispatched refresh
    latest_generation: u64,
    /// Generations dispatched but not yet settled
    pending: BTreeSet<u64>,
    last_dispatch: Option<Instant>,
    last_success: Option<DateTime<Local>>,
    last_error: Option<RefreshFailure>,
    /// Consecutive failed refreshes
    failure_count: u32,
}

impl RefreshState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a dispatch and return its generation
    pub fn begin(&mut self) -> u64 {
        self.latest_generation += 1;
        self.pending.insert(self.latest_generation);
        self.last_dispatch = Some(Instant::now());
        self.latest_generation
    }

    /// Record that a dispatched refresh has finished
    ///
    /// Returns whether `generation` is still the latest dispatched one. A
    /// generation that was never dispatched or has already settled changes
    /// nothing and returns false.
    pub fn settle(&mut self, generation: u64) -> bool {
        self.pending.remove(&generation) && generation == self.latest_generation
    }

    /// Whether `generation` was dispatched and has not settled yet
    pub fn is_pending(&self, generation: u64) -> bool {
        self.pending.contains(&generation)
    }

    pub fn record_success(&mut self) {
        self.last_success = Some(Local::now());
        self.last_error = None;
        self.failure_count = 0;
    }

    pub fn record_failure(&mut self, error: &RefreshError) {
        self.failure_count += 1;
        self.last_error = Some(RefreshFailure {
            message: format_refresh_error(error),
            category: categorize_error(error),
            at: Local::now(),
        });
    }

    /// True while at least one fetch is outstanding
    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest_generation
    }

    /// Live values come from an earlier refresh because the latest one failed
    pub fn is_stale(&self) -> bool {
        self.last_error.is_some()
    }

    pub fn last_error(&self) -> Option<&RefreshFailure> {
        self.last_error.as_ref()
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count
    }

    pub fn last_success(&self) -> Option<DateTime<Local>> {
        self.last_success
    }

    /// Whether an automatic refresh is due
    ///
    /// Never true while a fetch is outstanding.
    pub fn should_auto_refresh(&self, interval: Option<Duration>) -> bool {
        let Some(interval) = interval else {
            return false;
        };
        if self.is_loading() {
            return false;
        }
        match self.last_dispatch {
            None => true,
            Some(last) => last.elapsed() >= interval,
        }
    }

    /// Header status text
    pub fn status_text(&self) -> &'static str {
        if self.is_loading() && self.last_success.is_none() {
            "Loading..."
        } else if self.is_loading() {
            "Refreshing..."
        } else if self.is_stale() {
            "Stale"
        } else {
            "Ready"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_rs::FleetError;

    #[test]
    fn test_new_state_is_idle() {
        let state = RefreshState::new();
        assert!(!state.is_loading());
        assert!(!state.is_stale());
        assert_eq!(state.latest_generation(), 0);
        assert_eq!(state.status_text(), "Ready");
    }

    #[test]
    fn test_generations_increase() {
        let mut state = RefreshState::new();
        assert_eq!(state.begin(), 1);
        assert_eq!(state.begin(), 2);
        assert_eq!(state.outstanding(), 2);
    }

    #[test]
    fn test_failure_then_success() {
        let mut state = RefreshState::new();
        let error = RefreshError::from(FleetError::Status(502));

        state.record_failure(&error);
        state.record_failure(&error);
        assert!(state.is_stale());
        assert_eq!(state.failure_count(), 2);
        assert_eq!(state.status_text(), "Stale");
        assert_eq!(
            state.last_error().map(|e| e.category),
            Some(ErrorCategory::Network)
        );

        state.record_success();
        assert!(!state.is_stale());
        assert_eq!(state.failure_count(), 0);
        assert!(state.last_success().is_some());
    }

    #[test]
    fn test_settle_unknown_generation() {
        let mut state = RefreshState::new();
        assert!(!state.settle(7));
        assert_eq!(state.outstanding(), 0);
    }

    #[test]
    fn test_settle_twice_keeps_other_fetch_outstanding() {
        let mut state = RefreshState::new();
        let first = state.begin();
        let second = state.begin();

        assert!(state.settle(second));
        assert!(!state.settle(second));
        assert!(state.is_loading());
        assert_eq!(state.outstanding(), 1);
        assert!(state.is_pending(first));
        assert!(!state.is_pending(second));

        assert!(!state.settle(first));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_auto_refresh() {
        let mut state = RefreshState::new();
        assert!(!state.should_auto_refresh(None));
        assert!(state.should_auto_refresh(Some(Duration::from_secs(30))));

        let generation = state.begin();
        assert!(!state.should_auto_refresh(Some(Duration::ZERO)));

        state.settle(generation);
        assert!(!state.should_auto_refresh(Some(Duration::from_secs(30))));
        assert!(state.should_auto_refresh(Some(Duration::ZERO)));
    }

    #[test]
    fn test_status_text_while_loading() {
        let mut state = RefreshState::new();
        let generation = state.begin();
        assert_eq!(state.status_text(), "Loading...");
        state.settle(generation);
        state.record_success();
        state.begin();
        assert_eq!(state.status_text(), "Refreshing...");
    }
}
