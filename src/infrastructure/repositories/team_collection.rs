use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::repositories::{DocumentStore, StoreError, TeamRepository, TeamSubscription};
use crate::domain::team::{encode_team, Team, TEAMS_COLLECTION};

/// Team collection adapter over any DocumentStore
///
/// Implements TeamRepository by encoding teams into documents of one
/// collection and decoding every snapshot the collection delivers.
pub struct TeamCollection {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl TeamCollection {
    /// Creates an adapter over the default `equipos` collection
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_collection(store, TEAMS_COLLECTION)
    }

    /// Creates an adapter over a named collection
    pub fn with_collection(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }
}

#[async_trait]
impl TeamRepository for TeamCollection {
    async fn insert(&self, team: &Team) -> Result<String, StoreError> {
        let id = self
            .store
            .add(&self.collection, encode_team(team))
            .await
            .map_err(|e| {
                tracing::warn!(collection = %self.collection, error = %e, "Failed to insert team");
                e
            })?;

        tracing::info!(collection = %self.collection, team_id = %id, name = team.name(), "Team stored");
        Ok(id)
    }

    async fn watch(&self) -> Result<TeamSubscription, StoreError> {
        let listener = self.store.listen(&self.collection).await?;

        tracing::info!(collection = %self.collection, "Subscribed to team collection");
        Ok(TeamSubscription::new(listener))
    }
}
