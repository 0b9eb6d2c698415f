// HTTP handlers
// Thin adapters translating requests into registry calls

pub mod health;
pub mod teams;
