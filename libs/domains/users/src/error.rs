use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    /// Malformed email, name or id
    #[error("{0}")]
    Validation(String),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("User with id {0} not found")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::DuplicateEmail(_) => {
                AppError::Conflict("User with this email already exists".to_string())
            }
            UserError::NotFound(id) => AppError::NotFound(format!("User with id {} not found", id)),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}
