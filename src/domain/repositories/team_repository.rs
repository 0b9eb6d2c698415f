use async_trait::async_trait;

use super::document_store::SnapshotListener;
use super::error::StoreError;
use crate::domain::team::{decode_team, Team};

/// Repository trait for the team collection
///
/// This is the Remote Store Adapter contract: teams can be inserted and
/// the whole collection can be watched. Teams are never updated or deleted.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a new team and return the ID the store assigned
    ///
    /// The team's own `id` is ignored. Resolves only once the store has
    /// accepted the write.
    async fn insert(&self, team: &Team) -> Result<String, StoreError>;

    /// Subscribe to the full team list
    async fn watch(&self) -> Result<TeamSubscription, StoreError>;
}

/// Live team list subscription
///
/// Wraps a collection listener and runs every snapshot through
/// [`decode_team`]. Dropping it cancels the subscription.
#[derive(Debug)]
pub struct TeamSubscription {
    listener: SnapshotListener,
}

impl TeamSubscription {
    pub fn new(listener: SnapshotListener) -> Self {
        Self { listener }
    }

    /// Waits for the next decoded team list
    pub async fn next(&mut self) -> Option<Result<Vec<Team>, StoreError>> {
        let snapshot = self.listener.next().await?;
        Some(snapshot.map(|docs| docs.iter().map(decode_team).collect()))
    }
}
