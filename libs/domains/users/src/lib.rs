//! Users Domain
//!
//! CRUD over user records (id, email, first and last name) with email
//! uniqueness and value-object validation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (axum)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Use cases: create, get, list, update, delete
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Trait + in-memory store (via the mapper)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Domain    │  ← User aggregate, value objects, domain events
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{handlers, InMemoryUserRepository, UserService};
//!
//! let repository = InMemoryUserRepository::new();
//! let service = UserService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod domain;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod publisher;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use domain::{DomainEvent, Email, User, UserId, UserName};
pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use mapper::{UserMapper, UserPersistence};
pub use models::{CreateUserRequest, UpdateUserRequest, UserResponse};
pub use publisher::{EventPublisher, TracingEventPublisher};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
