//! Liga Registry Library
//!
//! This library provides the team registry core: the team entity, the
//! document store ports and adapters, the observable registry, and the
//! HTTP adapter that drives it.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod registry;

pub use registry::TeamRegistry;
