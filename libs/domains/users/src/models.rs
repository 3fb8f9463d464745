use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;

/// User representation returned by every read or write endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// `"{firstName} {lastName}"`
    pub full_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            email: user.email().as_str().to_string(),
            first_name: user.name().first_name().to_string(),
            last_name: user.name().last_name().to_string(),
            full_name: user.name().full_name(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
}

/// DTO for updating an existing user. Absent or empty fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UpdateUserRequest {
    pub fn email(&self) -> Option<&str> {
        provided(&self.email)
    }

    pub fn first_name(&self) -> Option<&str> {
        provided(&self.first_name)
    }

    pub fn last_name(&self) -> Option<&str> {
        provided(&self.last_name)
    }
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}
