use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::postgres::{PgListener, PgPoolOptions};
use sqlx::PgPool;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::repositories::{DocumentStore, Fields, SnapshotListener, StoreError, StoredDocument};

/// Notification channel announcing that a collection changed
///
/// The payload is the collection name.
pub const CHANGE_CHANNEL: &str = "document_changes";

/// PostgreSQL implementation of DocumentStore
///
/// Documents are JSONB rows in a single `documents` table keyed by
/// collection and ID. Writes notify [`CHANGE_CHANNEL`]; listeners re-read
/// the collection on each notification and deliver the full snapshot.
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a new PostgresDocumentStore
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a pool to `database_url` and prepares the schema
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        let store = Self::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Creates the documents table if it does not exist
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Reads the whole collection
///
/// Rows whose data is not a JSON object come back as empty documents so
/// the decoding step can apply its defaults.
async fn load_collection(pool: &PgPool, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
    let rows: Vec<(String, Value)> = sqlx::query_as(
        r#"
        SELECT id, data
        FROM documents
        WHERE collection = $1
        ORDER BY created_at, id
        "#,
    )
    .bind(collection)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, data)| match data {
            Value::Object(fields) => StoredDocument::new(id, fields),
            _ => StoredDocument::new(id, Fields::new()),
        })
        .collect())
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Io(e) => StoreError::Unavailable(e.to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    async fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();

        // The notification is delivered when the transaction commits
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(collection)
        .bind(&id)
        .bind(Value::Object(fields))
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        sqlx::query("SELECT pg_notify($1, $2)")
            .bind(CHANGE_CHANNEL)
            .bind(collection)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(id)
    }

    async fn listen(&self, collection: &str) -> Result<SnapshotListener, StoreError> {
        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener.listen(CHANGE_CHANNEL).await?;

        let initial = load_collection(&self.pool, collection).await?;

        let (tx, rx) = mpsc::unbounded_channel();
        let _ = tx.send(Ok(initial));

        let pool = self.pool.clone();
        let collection = collection.to_string();

        let task = tokio::spawn(async move {
            loop {
                match listener.try_recv().await {
                    Ok(Some(notification)) => {
                        if notification.payload() != collection {
                            continue;
                        }
                        let snapshot = load_collection(&pool, &collection).await;
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        // Connection dropped; the next try_recv reconnects.
                        // Changes made meanwhile are picked up by re-reading.
                        tracing::warn!(collection = %collection, "Lost notification connection");
                        let lost = Err(StoreError::Subscription(
                            "lost connection to the document store".to_string(),
                        ));
                        if tx.send(lost).is_err() {
                            break;
                        }
                        let snapshot = load_collection(&pool, &collection).await;
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(collection = %collection, error = %e, "Notification listener failed");
                        let _ = tx.send(Err(StoreError::Subscription(e.to_string())));
                        break;
                    }
                }
            }
        });

        Ok(SnapshotListener::with_task(rx, task))
    }
}
