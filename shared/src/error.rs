use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("authorization credential is missing")]
    MissingCredential,
    #[error("authorization credential is malformed")]
    MalformedCredential,
    #[error("authorization credential is expired")]
    ExpiredCredential,
    #[error("authorization credential is invalid")]
    InvalidCredential,
    #[error("credential verification failed")]
    CredentialVerificationError(#[source] anyhow::Error),
    #[error("authentication failed")]
    UnauthenticatedError,
    #[error("the operation is not permitted for this user")]
    ForbiddenOperation,
    #[error("{0}")]
    EntityNotFound(String),
    #[error(transparent)]
    ValidationError(#[from] garde::Report),
    #[error("update request contains no fields to change")]
    EmptyChangeset,
    #[error("field `{0}` must not be null")]
    UnexpectedNullField(&'static str),
    #[error("an active registration already exists for this user")]
    AlreadyRegistered,
    #[error("registration is closed")]
    RegistrationClosed,
    #[error("no places remain for this registration")]
    CapacityExceeded,
    #[error("{0}")]
    DuplicateKey(String),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("failed to convert a stored record: {0}")]
    ConversionEntityError(String),
    #[error(transparent)]
    SpecificOperationError(sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error(transparent)]
    TransactionError(sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            AppError::MissingCredential
            | AppError::MalformedCredential
            | AppError::ExpiredCredential
            | AppError::InvalidCredential
            | AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_)
            | AppError::EmptyChangeset
            | AppError::UnexpectedNullField(_) => StatusCode::BAD_REQUEST,
            AppError::AlreadyRegistered
            | AppError::RegistrationClosed
            | AppError::CapacityExceeded
            | AppError::DuplicateKey(_) => StatusCode::CONFLICT,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::CredentialVerificationError(_)
            | AppError::ConversionEntityError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::TransactionError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error.cause_chain = ?self, error.message = %self,
                "unexpected error happened"
            );
            // Storage and crypto detail stays out of the response body.
            return (status, Json(json!({ "error": "internal server error" }))).into_response();
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_dispositions() {
        for err in [
            AppError::AlreadyRegistered,
            AppError::RegistrationClosed,
            AppError::CapacityExceeded,
            AppError::DuplicateKey("email is already in use".into()),
        ] {
            assert_eq!(
                err.into_response().status(),
                StatusCode::CONFLICT
            );
        }
    }

    #[test]
    fn storage_detail_is_not_exposed() {
        let res = AppError::SpecificOperationError(sqlx::Error::RowNotFound).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn credential_failures_are_unauthorized() {
        for err in [
            AppError::MissingCredential,
            AppError::MalformedCredential,
            AppError::ExpiredCredential,
            AppError::InvalidCredential,
        ] {
            assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }
}
