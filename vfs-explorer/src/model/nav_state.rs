//! ``src/model/nav_state.rs``
//! ============================================================================
//! # `NavigationState`: what directory is shown, and what is in flight
//!
//! Owned by a single `NavigationController`. Requests are numbered with a
//! monotonically increasing [`RequestId`]; only the outcome of the most recent
//! dispatch may change the state, so the last navigation always wins.

use std::fmt;

/// Sequence number attached to each dispatched listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(u64);

impl RequestId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Idle,
    Pending,
}

/// How an outcome relates to the requests dispatched so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Outcome of the latest dispatch; it settles the pending episode.
    Current,
    /// Superseded by a later dispatch, or already settled.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    current_path: Option<String>,
    latest_request: RequestId,
    settled_request: RequestId,
}

impl NavigationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the path shown before the first listing arrives.
    pub fn initialize(&mut self, default_path: Option<&str>) {
        self.current_path = default_path.map(str::to_string);
    }

    /// Path of the directory currently displayed, or the configured default
    /// until the first listing has loaded.
    #[must_use]
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    #[must_use]
    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    #[must_use]
    pub fn phase(&self) -> NavPhase {
        if self.latest_request > self.settled_request {
            NavPhase::Pending
        } else {
            NavPhase::Idle
        }
    }

    #[inline]
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.phase() == NavPhase::Pending
    }

    /// Allocates the id for a new dispatch and enters `Pending`.
    pub fn begin_request(&mut self) -> RequestId {
        self.latest_request = RequestId(self.latest_request.0 + 1);
        self.latest_request
    }

    #[must_use]
    pub fn freshness(&self, request: RequestId) -> Freshness {
        if request == self.latest_request && request > self.settled_request {
            Freshness::Current
        } else {
            Freshness::Stale
        }
    }

    /// Settles `request` and, on success, records the displayed path.
    ///
    /// Returns `false` without touching anything if `request` is stale.
    pub fn settle(&mut self, request: RequestId, loaded_path: Option<&str>) -> bool {
        if self.freshness(request) == Freshness::Stale {
            return false;
        }

        self.settled_request = request;
        if let Some(path) = loaded_path {
            self.current_path = Some(path.to_string());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_without_path() {
        let state = NavigationState::new();
        assert_eq!(state.phase(), NavPhase::Idle);
        assert_eq!(state.current_path(), None);
    }

    #[test]
    fn initialize_seeds_default_path() {
        let mut state = NavigationState::new();
        state.initialize(Some("/home"));
        assert_eq!(state.current_path(), Some("/home"));
        assert!(!state.is_pending());
    }

    #[test]
    fn request_ids_increase() {
        let mut state = NavigationState::new();
        let first = state.begin_request();
        let second = state.begin_request();
        assert!(second > first);
        assert_eq!(state.latest_request(), second);
        assert!(state.is_pending());
    }

    #[test]
    fn success_sets_path_and_returns_to_idle() {
        let mut state = NavigationState::new();
        let id = state.begin_request();
        assert!(state.settle(id, Some("/home")));
        assert_eq!(state.current_path(), Some("/home"));
        assert_eq!(state.phase(), NavPhase::Idle);
    }

    #[test]
    fn failure_keeps_previous_path() {
        let mut state = NavigationState::new();
        let ok = state.begin_request();
        state.settle(ok, Some("/home"));

        let failed = state.begin_request();
        assert!(state.settle(failed, None));
        assert_eq!(state.current_path(), Some("/home"));
        assert!(!state.is_pending());
    }

    #[test]
    fn superseded_request_is_stale() {
        let mut state = NavigationState::new();
        let a = state.begin_request();
        let b = state.begin_request();

        assert_eq!(state.freshness(a), Freshness::Stale);
        assert!(!state.settle(a, Some("/a")));
        assert!(state.is_pending());

        assert!(state.settle(b, Some("/b")));
        assert!(!state.settle(a, Some("/a")));
        assert_eq!(state.current_path(), Some("/b"));
    }

    #[test]
    fn settled_request_cannot_settle_twice() {
        let mut state = NavigationState::new();
        let id = state.begin_request();
        assert!(state.settle(id, Some("/x")));
        assert_eq!(state.freshness(id), Freshness::Stale);
        assert!(!state.settle(id, Some("/y")));
        assert_eq!(state.current_path(), Some("/x"));
    }
}
