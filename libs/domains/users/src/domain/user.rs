use chrono::{DateTime, SubsecRound, Utc};

use super::events::{DomainEvent, UserCreated, UserUpdated};
use super::value_objects::{Email, UserId, UserName};

/// Current time at millisecond precision, the resolution of stored timestamps.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// User aggregate root.
///
/// Mutations go through [`User::update_email`] and [`User::update_name`],
/// which record a [`DomainEvent`] for every effective change.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    name: UserName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    domain_events: Vec<DomainEvent>,
}

impl User {
    /// New user with a generated id and a pending `UserCreated` event.
    pub fn create(email: Email, name: UserName) -> Self {
        let id = UserId::generate();
        let now = now();

        let created = UserCreated {
            user_id: id.clone(),
            email: email.as_str().to_string(),
            full_name: name.full_name(),
            occurred_on: now,
        };

        Self {
            id,
            email,
            name,
            created_at: now,
            updated_at: now,
            domain_events: vec![DomainEvent::UserCreated(created)],
        }
    }

    /// Rebuilds a stored user. No events are recorded.
    pub fn reconstitute(
        id: UserId,
        email: Email,
        name: UserName,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            created_at,
            updated_at,
            domain_events: Vec::new(),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn update_email(&mut self, new_email: Email) {
        if self.email == new_email {
            return;
        }

        let old = std::mem::replace(&mut self.email, new_email);
        self.updated_at = now();
        self.domain_events
            .push(DomainEvent::UserUpdated(UserUpdated::single(
                self.id.clone(),
                "email",
                old.as_str().to_string(),
                self.email.as_str().to_string(),
                self.updated_at,
            )));
    }

    pub fn update_name(&mut self, new_name: UserName) {
        if self.name == new_name {
            return;
        }

        let old = std::mem::replace(&mut self.name, new_name);
        self.updated_at = now();
        self.domain_events
            .push(DomainEvent::UserUpdated(UserUpdated::single(
                self.id.clone(),
                "name",
                old.full_name(),
                self.name.full_name(),
                self.updated_at,
            )));
    }

    /// Snapshot of the pending events, oldest first.
    pub fn domain_events(&self) -> Vec<DomainEvent> {
        self.domain_events.clone()
    }

    pub fn clear_domain_events(&mut self) {
        self.domain_events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> User {
        User::create(
            Email::parse("jane@example.com").unwrap(),
            UserName::new("Jane", "Doe").unwrap(),
        )
    }

    #[test]
    fn test_create_records_user_created() {
        let user = jane();
        assert_eq!(user.created_at(), user.updated_at());

        let events = user.domain_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            DomainEvent::UserCreated(e) => {
                assert_eq!(&e.user_id, user.id());
                assert_eq!(e.email, "jane@example.com");
                assert_eq!(e.full_name, "Jane Doe");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_reconstitute_records_nothing() {
        let original = jane();
        let user = User::reconstitute(
            original.id().clone(),
            original.email().clone(),
            original.name().clone(),
            original.created_at(),
            original.updated_at(),
        );
        assert!(user.domain_events().is_empty());
    }

    #[test]
    fn test_update_email_with_same_value_is_noop() {
        let mut user = jane();
        let before = user.updated_at();

        user.update_email(Email::parse("JANE@example.com").unwrap());

        assert_eq!(user.updated_at(), before);
        assert_eq!(user.domain_events().len(), 1);
    }

    #[test]
    fn test_update_email_records_delta() {
        let mut user = jane();
        user.clear_domain_events();

        user.update_email(Email::parse("janet@example.com").unwrap());

        assert_eq!(user.email().as_str(), "janet@example.com");
        let events = user.domain_events();
        assert_eq!(events.len(), 1);
        let DomainEvent::UserUpdated(updated) = &events[0] else {
            panic!("expected UserUpdated");
        };
        let change = &updated.changes["email"];
        assert_eq!(change.old, "jane@example.com");
        assert_eq!(change.new, "janet@example.com");
        assert_eq!(updated.changes.len(), 1);
    }

    #[test]
    fn test_update_name_records_full_names() {
        let mut user = jane();
        user.update_name(UserName::new("Jane", "Doe").unwrap());
        assert_eq!(user.domain_events().len(), 1);

        user.update_name(UserName::new("Janet", "Doe").unwrap());

        let events = user.domain_events();
        assert_eq!(events.len(), 2);
        let DomainEvent::UserUpdated(updated) = &events[1] else {
            panic!("expected UserUpdated");
        };
        assert_eq!(updated.changes["name"].old, "Jane Doe");
        assert_eq!(updated.changes["name"].new, "Janet Doe");
        assert!(user.updated_at() >= user.created_at());
    }

    #[test]
    fn test_domain_events_returns_a_snapshot() {
        let mut user = jane();
        let snapshot = user.domain_events();

        user.clear_domain_events();

        assert_eq!(snapshot.len(), 1);
        assert!(user.domain_events().is_empty());
    }
}
