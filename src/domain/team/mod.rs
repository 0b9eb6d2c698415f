// Team domain module
// Contains the team entity, its document mapping, and the published list state

#![allow(clippy::module_inception)]

pub mod document;
pub mod snapshot;
pub mod team;
pub mod validation;

// Re-export main types for convenience
pub use document::{decode_team, encode_team, TEAMS_COLLECTION};
pub use snapshot::TeamListState;
pub use team::Team;
pub use validation::{require_fields, ValidationError};
