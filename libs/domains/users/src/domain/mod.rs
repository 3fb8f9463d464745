//! Domain model: value objects, the `User` aggregate and its events.

pub mod events;
pub mod user;
pub mod value_objects;

pub use events::{DomainEvent, FieldChange, UserCreated, UserUpdated};
pub use user::User;
pub use value_objects::{Email, UserId, UserName};
