//! Translation between the [`User`] aggregate and its flat storage record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Email, User, UserId, UserName};
use crate::error::{UserError, UserResult};

/// Storage shape of a user. Timestamps are ISO-8601 strings in UTC with
/// millisecond precision (`2024-05-01T09:30:00.000Z`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPersistence {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
    pub updated_at: String,
}

pub struct UserMapper;

impl UserMapper {
    pub fn to_persistence(user: &User) -> UserPersistence {
        UserPersistence {
            id: user.id().as_str().to_string(),
            email: user.email().as_str().to_string(),
            first_name: user.name().first_name().to_string(),
            last_name: user.name().last_name().to_string(),
            created_at: format_timestamp(user.created_at()),
            updated_at: format_timestamp(user.updated_at()),
        }
    }

    /// Rebuilds the aggregate, re-running every value-object check so a
    /// tampered record fails with [`UserError::Validation`].
    pub fn to_domain(record: &UserPersistence) -> UserResult<User> {
        let id = UserId::parse(&record.id)?;
        let email = Email::parse(&record.email)?;
        let name = UserName::restore(&record.first_name, &record.last_name)?;
        let created_at = parse_timestamp("createdAt", &record.created_at)?;
        let updated_at = parse_timestamp("updatedAt", &record.updated_at)?;

        Ok(User::reconstitute(id, email, name, created_at, updated_at))
    }
}

fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(field: &str, raw: &str) -> UserResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| UserError::Validation(format!("Invalid {} timestamp '{}': {}", field, raw, e)))
}
