// Infrastructure layer module
// Contains document store adapters and the team collection adapter
// Follows Hexagonal Architecture

pub mod repositories;
