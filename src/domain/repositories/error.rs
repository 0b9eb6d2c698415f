use thiserror::Error;

/// Fallback shown when a store failure carries no message
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Errors reported by document stores and the adapters built on them
///
/// Variants carry plain messages so a single failure can be delivered to
/// every open subscription.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store could not be reached
    #[error("{0}")]
    Unavailable(String),

    /// The store refused the write
    #[error("{0}")]
    Rejected(String),

    /// The live subscription reported a failure
    #[error("{0}")]
    Subscription(String),

    /// The subscription ended and will deliver no more snapshots
    #[error("subscription closed")]
    Closed,

    #[error("{0}")]
    Database(String),

    #[error("{0}")]
    Serialization(String),
}

impl StoreError {
    /// Human-readable message for the failure continuation
    ///
    /// Falls back to [`UNKNOWN_ERROR`] when the underlying failure has no
    /// message of its own.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
