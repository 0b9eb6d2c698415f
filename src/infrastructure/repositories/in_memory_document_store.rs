use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::domain::repositories::document_store::SnapshotResult;
use crate::domain::repositories::{DocumentStore, Fields, SnapshotListener, StoreError, StoredDocument};

#[derive(Debug, Default)]
struct Collection {
    documents: Vec<StoredDocument>,
    listeners: Vec<mpsc::UnboundedSender<SnapshotResult>>,
}

impl Collection {
    /// Sends an item to every listener, forgetting the ones that hung up
    fn publish(&mut self, item: SnapshotResult) {
        self.listeners.retain(|tx| tx.send(item.clone()).is_ok());
    }
}

/// In-memory implementation of DocumentStore
///
/// Documents keep insertion order. Every successful `add` publishes the
/// full collection to all listeners of that collection.
///
/// The store can be switched to unreachable, and subscription failures can
/// be injected, to exercise the error paths of its callers.
#[derive(Debug)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
    reachable: AtomicBool,
}

impl InMemoryDocumentStore {
    /// Create a new empty, reachable store
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            reachable: AtomicBool::new(true),
        }
    }

    /// Simulate losing or regaining connectivity
    ///
    /// While unreachable, `add` and `listen` fail with
    /// [`StoreError::Unavailable`]. Open listeners are left alone.
    pub fn set_reachable(&self, reachable: bool) {
        self.reachable.store(reachable, Ordering::SeqCst);
    }

    /// Deliver a subscription failure to every listener of a collection
    pub async fn fail_listeners(&self, collection: &str, reason: impl Into<String>) {
        let mut collections = self.collections.write().await;
        if let Some(entry) = collections.get_mut(collection) {
            entry.publish(Err(StoreError::Subscription(reason.into())));
        }
    }

    /// Current content of a collection
    pub async fn documents(&self, collection: &str) -> Vec<StoredDocument> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .map(|entry| entry.documents.clone())
            .unwrap_or_default()
    }

    /// Number of listeners on a collection that have not been dropped
    pub async fn listener_count(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .map(|entry| entry.listeners.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }

    fn ensure_reachable(&self) -> Result<(), StoreError> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(
                "document store is unreachable".to_string(),
            ))
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        self.ensure_reachable()?;

        let mut collections = self.collections.write().await;
        let entry = collections.entry(collection.to_string()).or_default();

        let id = Uuid::new_v4().to_string();
        entry.documents.push(StoredDocument::new(id.clone(), fields));

        let snapshot = entry.documents.clone();
        entry.publish(Ok(snapshot));

        Ok(id)
    }

    async fn listen(&self, collection: &str) -> Result<SnapshotListener, StoreError> {
        self.ensure_reachable()?;

        let mut collections = self.collections.write().await;
        let entry = collections.entry(collection.to_string()).or_default();

        let (tx, rx) = mpsc::unbounded_channel();
        // Receiver is in hand, so this send cannot fail
        let _ = tx.send(Ok(entry.documents.clone()));
        entry.listeners.push(tx);

        Ok(SnapshotListener::new(rx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn named(name: &str) -> Fields {
        let mut fields = Fields::new();
        fields.insert("nombre".to_string(), Value::from(name));
        fields
    }

    #[tokio::test]
    async fn add_assigns_unique_ids() {
        let store = InMemoryDocumentStore::new();

        let first = store.add("equipos", named("River")).await.unwrap();
        let second = store.add("equipos", named("Boca")).await.unwrap();

        assert!(!first.is_empty());
        assert_ne!(first, second);
        assert_eq!(store.documents("equipos").await.len(), 2);
    }

    #[tokio::test]
    async fn listener_gets_current_content_first() {
        let store = InMemoryDocumentStore::new();
        store.add("equipos", named("River")).await.unwrap();

        let mut listener = store.listen("equipos").await.unwrap();
        let snapshot = listener.next().await.unwrap().unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].fields["nombre"], "River");
    }

    #[tokio::test]
    async fn listener_gets_full_snapshot_after_each_add() {
        let store = InMemoryDocumentStore::new();
        let mut listener = store.listen("equipos").await.unwrap();
        assert!(listener.next().await.unwrap().unwrap().is_empty());

        store.add("equipos", named("River")).await.unwrap();
        store.add("equipos", named("Boca")).await.unwrap();

        assert_eq!(listener.next().await.unwrap().unwrap().len(), 1);
        assert_eq!(listener.next().await.unwrap().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn collections_are_isolated() {
        let store = InMemoryDocumentStore::new();
        let mut listener = store.listen("jugadores").await.unwrap();
        listener.next().await.unwrap().unwrap();

        store.add("equipos", named("River")).await.unwrap();
        store.fail_listeners("jugadores", "done").await;

        assert!(store.documents("jugadores").await.is_empty());
        assert!(listener.next().await.unwrap().is_err());
    }

    #[tokio::test]
    async fn unreachable_store_rejects_writes_and_subscriptions() {
        let store = InMemoryDocumentStore::new();
        store.set_reachable(false);

        let add = store.add("equipos", named("River")).await;
        let listen = store.listen("equipos").await;

        assert!(matches!(add, Err(StoreError::Unavailable(_))));
        assert!(matches!(listen, Err(StoreError::Unavailable(_))));
        assert!(store.documents("equipos").await.is_empty());

        store.set_reachable(true);
        assert!(store.add("equipos", named("River")).await.is_ok());
    }

    #[tokio::test]
    async fn injected_failure_reaches_listener() {
        let store = InMemoryDocumentStore::new();
        let mut listener = store.listen("equipos").await.unwrap();
        listener.next().await.unwrap().unwrap();

        store.fail_listeners("equipos", "permission denied").await;

        assert_eq!(
            listener.next().await.unwrap(),
            Err(StoreError::Subscription("permission denied".to_string()))
        );
    }

    #[tokio::test]
    async fn dropped_listeners_are_not_counted() {
        let store = InMemoryDocumentStore::new();
        let listener = store.listen("equipos").await.unwrap();
        assert_eq!(store.listener_count("equipos").await, 1);

        drop(listener);

        assert_eq!(store.listener_count("equipos").await, 0);
    }
}
