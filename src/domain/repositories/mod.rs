// Repository interfaces (ports)
// Adapters in the infrastructure layer implement these contracts

pub mod document_store;
pub mod error;
pub mod team_repository;

pub use document_store::{DocumentStore, Fields, SnapshotListener, StoredDocument};
pub use error::StoreError;
pub use team_repository::{TeamRepository, TeamSubscription};
