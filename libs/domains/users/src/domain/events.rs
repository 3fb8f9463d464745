use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use super::value_objects::UserId;

/// Change recorded on a [`super::User`] since it was loaded or last drained.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum DomainEvent {
    UserCreated(UserCreated),
    UserUpdated(UserUpdated),
}

impl DomainEvent {
    pub fn user_id(&self) -> &UserId {
        match self {
            DomainEvent::UserCreated(e) => &e.user_id,
            DomainEvent::UserUpdated(e) => &e.user_id,
        }
    }

    pub fn occurred_on(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::UserCreated(e) => e.occurred_on,
            DomainEvent::UserUpdated(e) => e.occurred_on,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::UserCreated(_) => "UserCreated",
            DomainEvent::UserUpdated(_) => "UserUpdated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    pub user_id: UserId,
    pub email: String,
    pub full_name: String,
    pub occurred_on: DateTime<Utc>,
}

/// Old and new value of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub old: String,
    pub new: String,
}

/// `changes` is keyed by field name (`"email"` or `"name"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdated {
    pub user_id: UserId,
    pub changes: BTreeMap<String, FieldChange>,
    pub occurred_on: DateTime<Utc>,
}

impl UserUpdated {
    pub(crate) fn single(
        user_id: UserId,
        field: &str,
        old: String,
        new: String,
        occurred_on: DateTime<Utc>,
    ) -> Self {
        let mut changes = BTreeMap::new();
        changes.insert(field.to_string(), FieldChange { old, new });
        Self {
            user_id,
            changes,
            occurred_on,
        }
    }
}
