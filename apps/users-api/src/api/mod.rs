//! API routes module

pub mod index;

use axum::Router;
use domain_users::{InMemoryUserRepository, TracingEventPublisher, UserService, handlers};

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(repository: InMemoryUserRepository) -> Router {
    let users = UserService::with_publisher(repository, TracingEventPublisher);

    Router::new().nest("/users", handlers::router(users))
}
