use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;

/// Body message of the 409 answered for a taken e-mail.
pub const EMAIL_ALREADY_EXISTS: &str = "E-mail already exists.";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with e-mail '{0}' already exists")]
    AlreadyExists(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Only a duplicate e-mail is a client error; everything else is a 500.
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::AlreadyExists(_) => AppError::Conflict(EMAIL_ALREADY_EXISTS.to_string()),
            UserError::Database(e) => AppError::Database(e),
            UserError::PasswordHash(msg) | UserError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_already_exists_message_carries_email() {
        let err = UserError::AlreadyExists("juanFred@gmail.com".into());
        assert!(err.to_string().contains("juanFred@gmail.com"));
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::AlreadyExists("a@b.co".into()), StatusCode::CONFLICT),
            (
                UserError::PasswordHash("bad params".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                UserError::Database(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                UserError::Internal("join error".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
