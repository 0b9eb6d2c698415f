use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::error::StoreError;

/// Schema-less document body: field name to JSON value
pub type Fields = Map<String, Value>;

/// One item delivered to a listener: the full collection, or a failure
pub type SnapshotResult = Result<Vec<StoredDocument>, StoreError>;

/// A document as read back from a collection
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// Store-generated identifier
    pub id: String,
    pub fields: Fields,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Document store contract
///
/// A store groups documents into named collections, assigns document IDs
/// itself, and supports live subscriptions that deliver the full current
/// content of a collection on every change.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Adds a document and returns the ID the store assigned
    ///
    /// Returns only after the store has accepted the write.
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Opens a live subscription on a whole collection
    ///
    /// The first item is the current content; every later item is a full
    /// snapshot taken after a change. Failures arrive as `Err` items on the
    /// same listener.
    async fn listen(&self, collection: &str) -> Result<SnapshotListener, StoreError>;
}

/// Receiving end of a collection subscription
///
/// Dropping the listener cancels the subscription, including any
/// background task the store spawned to feed it.
#[derive(Debug)]
pub struct SnapshotListener {
    rx: mpsc::UnboundedReceiver<SnapshotResult>,
    task: Option<JoinHandle<()>>,
}

impl SnapshotListener {
    /// Listener fed directly by the store
    pub fn new(rx: mpsc::UnboundedReceiver<SnapshotResult>) -> Self {
        Self { rx, task: None }
    }

    /// Listener fed by a background task that is aborted on drop
    pub fn with_task(rx: mpsc::UnboundedReceiver<SnapshotResult>, task: JoinHandle<()>) -> Self {
        Self {
            rx,
            task: Some(task),
        }
    }

    /// Waits for the next snapshot; `None` once the store stops sending
    pub async fn next(&mut self) -> Option<SnapshotResult> {
        self.rx.recv().await
    }
}

impl Drop for SnapshotListener {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn listener_yields_items_in_order_then_ends() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut listener = SnapshotListener::new(rx);

        tx.send(Ok(vec![StoredDocument::new("a", Fields::new())]))
            .expect("listener alive");
        tx.send(Err(StoreError::Subscription("boom".to_string())))
            .expect("listener alive");
        drop(tx);

        assert_eq!(listener.next().await.unwrap().unwrap().len(), 1);
        assert!(listener.next().await.unwrap().is_err());
        assert!(listener.next().await.is_none());
    }

    #[tokio::test]
    async fn dropping_listener_aborts_feeding_task() {
        let (_tx, rx) = mpsc::unbounded_channel::<SnapshotResult>();
        let (alive_tx, alive_rx) = tokio::sync::oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let _alive = alive_tx;
            std::future::pending::<()>().await;
        });

        drop(SnapshotListener::with_task(rx, task));

        assert!(alive_rx.await.is_err());
    }
}
