use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::InMemoryUserRepository;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first so config errors are rendered with context
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // Records live for the lifetime of the process
    let repository = InMemoryUserRepository::new();
    let api_routes = api::routes(repository.clone());

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &config.cors)?;

    let app = router
        .merge(health_router(config.app))
        .merge(api::index::router());

    info!(
        app = config.app.name,
        version = config.app.version,
        environment = ?config.environment,
        "Starting users API"
    );

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            let users = repository.len().await;
            info!(
                users,
                "Shutting down: in-memory users are discarded"
            );
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
