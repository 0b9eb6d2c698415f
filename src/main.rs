use std::error::Error;
use std::sync::Arc;

use liga_registry::api::{self, AppState};
use liga_registry::config::{AppConfig, StoreBackend};
use liga_registry::domain::repositories::DocumentStore;
use liga_registry::infrastructure::repositories::{
    InMemoryDocumentStore, PostgresDocumentStore, TeamCollection,
};
use liga_registry::TeamRegistry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env()?;

    let store: Arc<dyn DocumentStore> = match &config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store, data is lost on exit");
            Arc::new(InMemoryDocumentStore::new())
        }
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!("Connecting to database...");
            let store = PostgresDocumentStore::connect(database_url, *max_connections).await?;
            tracing::info!("Database connected successfully");
            Arc::new(store)
        }
    };

    let teams = TeamCollection::with_collection(store, config.collection.clone());
    let registry = Arc::new(TeamRegistry::new(Arc::new(teams)));

    // The list view stays live for the life of the service
    if let Err(e) = registry.start_watching().await {
        tracing::error!(error = %e, "Team list is not live; GET /api/teams reports the error");
    }

    let app = api::router(AppState::new(Arc::clone(&registry)));

    tracing::info!("Server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
