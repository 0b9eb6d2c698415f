use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::domain::repositories::{StoreError, TeamRepository, TeamSubscription};
use crate::domain::team::{Team, TeamListState};

/// Team Registry
///
/// Owns the in-process view of all registered teams and mediates writes and
/// reads against a [`TeamRepository`]. The list is derived state only: it
/// changes when the repository delivers a new snapshot, never otherwise.
///
/// Observers get the list through [`TeamRegistry::current_teams`], which
/// yields immutable [`TeamListState`] values; nothing outside the registry
/// can modify the published list.
///
/// The live subscription belongs to the registry and is released when the
/// registry is dropped.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use liga_registry::domain::team::Team;
/// use liga_registry::infrastructure::repositories::{InMemoryDocumentStore, TeamCollection};
/// use liga_registry::TeamRegistry;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = Arc::new(InMemoryDocumentStore::new());
/// let registry = TeamRegistry::new(Arc::new(TeamCollection::new(store)));
///
/// registry.register(&Team::new("River", "1901", "38", "")).await.unwrap();
/// assert!(registry.start_watching().await.unwrap());
///
/// let mut teams = registry.current_teams();
/// let state = teams.wait_for(|s| s.teams().len() == 1).await.unwrap();
/// assert_eq!(state.teams()[0].name(), "River");
/// # }
/// ```
pub struct TeamRegistry {
    repository: Arc<dyn TeamRepository>,
    state: Arc<watch::Sender<TeamListState>>,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl TeamRegistry {
    /// Creates a registry that is not watching yet and holds no teams
    pub fn new(repository: Arc<dyn TeamRepository>) -> Self {
        let (state, _) = watch::channel(TeamListState::default());

        Self {
            repository,
            state: Arc::new(state),
            watcher: Mutex::new(None),
        }
    }

    /// Registers a team
    ///
    /// Forwards straight to the repository: no validation, no retry.
    /// Resolves with the store-assigned ID once the write is accepted. The
    /// published list is not touched; the new team shows up through the
    /// subscription like any other change.
    pub async fn register(&self, team: &Team) -> Result<String, StoreError> {
        self.repository.insert(team).await
    }

    /// Registers a team without waiting for the outcome
    ///
    /// Exactly one of the continuations runs, exactly once: `on_success`
    /// after the store accepted the write, or `on_failure` with a
    /// human-readable message. Must be called from within a Tokio runtime.
    pub fn register_with<S, F>(&self, team: Team, on_success: S, on_failure: F) -> JoinHandle<()>
    where
        S: FnOnce() + Send + 'static,
        F: FnOnce(String) + Send + 'static,
    {
        let repository = Arc::clone(&self.repository);

        tokio::spawn(async move {
            match repository.insert(&team).await {
                Ok(_) => on_success(),
                Err(e) => on_failure(e.user_message()),
            }
        })
    }

    /// Starts following the team collection
    ///
    /// Idempotent: returns `Ok(true)` when a subscription was opened and
    /// `Ok(false)` when one is already live. If the subscription cannot be
    /// opened, the error is recorded in the published state, the registry
    /// stays not watching, and the error is returned.
    pub async fn start_watching(&self) -> Result<bool, StoreError> {
        let mut watcher = self.watcher.lock().await;

        // The forwarding task clears the flag as its last step, so a task
        // that is still exiting does not count as live.
        if self.state.borrow().is_watching() {
            tracing::debug!("Already watching team collection");
            return Ok(false);
        }

        let subscription = match self.repository.watch().await {
            Ok(subscription) => subscription,
            Err(e) => {
                tracing::warn!(error = %e, "Could not subscribe to team collection");
                self.state
                    .send_modify(|s| *s = s.with_error(e.user_message()));
                return Err(e);
            }
        };

        self.state.send_modify(|s| *s = s.with_watching(true));
        *watcher = Some(tokio::spawn(forward_snapshots(
            subscription,
            Arc::clone(&self.state),
        )));

        tracing::info!("Watching team collection");
        Ok(true)
    }

    /// Observable team list
    ///
    /// The receiver holds the latest state immediately and is notified of
    /// every later one.
    pub fn current_teams(&self) -> watch::Receiver<TeamListState> {
        self.state.subscribe()
    }

    /// Latest published state
    pub fn snapshot(&self) -> TeamListState {
        self.state.borrow().clone()
    }

    pub fn is_watching(&self) -> bool {
        self.state.borrow().is_watching()
    }
}

impl Drop for TeamRegistry {
    fn drop(&mut self) {
        if let Some(task) = self.watcher.get_mut().take() {
            task.abort();
        }
    }
}

/// Publishes every snapshot of a subscription until it ends
///
/// Errors keep the last good list and set `last_error`. When the
/// subscription ends the registry goes back to not watching so a later
/// `start_watching` can open a fresh one.
async fn forward_snapshots(
    mut subscription: TeamSubscription,
    state: Arc<watch::Sender<TeamListState>>,
) {
    while let Some(update) = subscription.next().await {
        match update {
            Ok(teams) => {
                tracing::debug!(count = teams.len(), "Team snapshot received");
                state.send_replace(TeamListState::live(teams));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Team subscription reported an error");
                state.send_modify(|s| *s = s.with_error(e.user_message()));
            }
        }
    }

    tracing::warn!("Team subscription closed");
    state.send_modify(|s| {
        *s = s
            .with_error(StoreError::Closed.user_message())
            .with_watching(false)
    });
}
