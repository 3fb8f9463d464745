use std::sync::Arc;
use tracing::instrument;

use crate::domain::{Email, User, UserId, UserName};
use crate::error::{UserError, UserResult};
use crate::models::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::publisher::{EventPublisher, TracingEventPublisher};
use crate::repository::UserRepository;

/// Use cases for user management.
///
/// Each operation turns primitive input into value objects, performs at most
/// one repository write, and answers with a [`UserResponse`].
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    publisher: Arc<dyn EventPublisher>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self::with_publisher(repository, TracingEventPublisher)
    }

    pub fn with_publisher(repository: R, publisher: impl EventPublisher + 'static) -> Self {
        Self {
            repository: Arc::new(repository),
            publisher: Arc::new(publisher),
        }
    }

    /// Register a user; the email must not be taken.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUserRequest) -> UserResult<UserResponse> {
        let email = Email::parse(&input.email)?;
        let name = UserName::new(&input.first_name, &input.last_name)?;

        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(UserError::DuplicateEmail(email.to_string()));
        }

        let mut user = User::create(email, name);
        self.persist(&mut user).await?;

        Ok(UserResponse::from(&user))
    }

    /// Get a user by ID
    pub async fn get_user(&self, id: &str) -> UserResult<UserResponse> {
        let user = self.load(id).await?;
        Ok(UserResponse::from(&user))
    }

    /// All users, in repository order
    pub async fn get_all_users(&self) -> UserResult<Vec<UserResponse>> {
        let users = self.repository.find_all().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    /// Apply a partial update.
    ///
    /// A missing name half is filled from the current name. Changing the
    /// email to one registered to another user fails with
    /// [`UserError::DuplicateEmail`].
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, id: &str, input: UpdateUserRequest) -> UserResult<UserResponse> {
        let mut user = self.load(id).await?;

        if let Some(raw) = input.email() {
            let email = Email::parse(raw)?;
            if &email != user.email() {
                if let Some(owner) = self.repository.find_by_email(&email).await? {
                    if owner.id() != user.id() {
                        return Err(UserError::DuplicateEmail(email.to_string()));
                    }
                }
            }
            user.update_email(email);
        }

        if input.first_name().is_some() || input.last_name().is_some() {
            let first = input.first_name().unwrap_or(user.name().first_name());
            let last = input.last_name().unwrap_or(user.name().last_name());
            let name = UserName::new(first, last)?;
            user.update_name(name);
        }

        self.persist(&mut user).await?;

        Ok(UserResponse::from(&user))
    }

    /// Delete a user
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> UserResult<()> {
        let user_id = UserId::parse(id)?;

        if !self.repository.exists(&user_id).await? {
            return Err(UserError::NotFound(user_id.to_string()));
        }

        self.repository.delete(&user_id).await
    }

    async fn load(&self, id: &str) -> UserResult<User> {
        let user_id = UserId::parse(id)?;
        self.repository
            .find_by_id(&user_id)
            .await?
            .ok_or(UserError::NotFound(user_id.to_string()))
    }

    /// Saves the user, then hands its pending events to the publisher.
    async fn persist(&self, user: &mut User) -> UserResult<()> {
        self.repository.save(user).await?;

        let events = user.domain_events();
        user.clear_domain_events();
        if !events.is_empty() {
            self.publisher.publish(events).await;
        }

        Ok(())
    }
}
