use std::sync::Arc;

use super::team::Team;

/// The team list as published to observers
///
/// Each value is an immutable snapshot. Observers receive it by cloning,
/// which only bumps the reference count of the shared list.
///
/// `last_error` is the error channel of the live subscription: it is set
/// when the subscription reports a failure (the list then keeps its last
/// good value) and cleared by the next good snapshot.
#[derive(Debug, Clone)]
pub struct TeamListState {
    teams: Arc<[Team]>,
    watching: bool,
    last_error: Option<String>,
}

impl Default for TeamListState {
    /// Empty list, not watching, no error
    fn default() -> Self {
        Self {
            teams: Arc::from(Vec::new()),
            watching: false,
            last_error: None,
        }
    }
}

impl TeamListState {
    /// State after a successful snapshot
    pub fn live(teams: Vec<Team>) -> Self {
        Self {
            teams: teams.into(),
            watching: true,
            last_error: None,
        }
    }

    /// Returns the latest known teams in store order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// Returns the most recent subscription error, if not yet recovered
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Same list, with a subscription error recorded
    pub fn with_error(&self, reason: impl Into<String>) -> Self {
        Self {
            teams: Arc::clone(&self.teams),
            watching: self.watching,
            last_error: Some(reason.into()),
        }
    }

    /// Same list and error, with the watching flag set
    pub fn with_watching(&self, watching: bool) -> Self {
        Self {
            teams: Arc::clone(&self.teams),
            watching,
            last_error: self.last_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_empty_and_idle() {
        let state = TeamListState::default();

        assert!(state.teams().is_empty());
        assert!(!state.is_watching());
        assert!(state.last_error().is_none());
    }

    #[test]
    fn error_keeps_the_previous_list() {
        let state = TeamListState::live(vec![Team::new("River", "1901", "38", "")]);

        let failed = state.with_error("permission denied");

        assert_eq!(failed.teams().len(), 1);
        assert_eq!(failed.last_error(), Some("permission denied"));
        assert!(failed.is_watching());
        assert_eq!(failed.teams(), state.teams());
    }

    #[test]
    fn live_snapshot_clears_error() {
        let state = TeamListState::default().with_error("offline");

        let next = TeamListState::live(Vec::new());

        assert!(state.last_error().is_some());
        assert!(next.last_error().is_none());
        assert!(next.is_watching());
    }
}
