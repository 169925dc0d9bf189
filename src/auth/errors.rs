use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{auth::dto::ErrorResponse, storage::StoreError};

pub const MISSING_CREDENTIALS: &str = "missing credentials";
pub const PASSWORD_TOO_SHORT: &str = "password too short";
pub const INVALID_BODY: &str = "invalid request body";
pub const USER_EXISTS: &str = "user exists";

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("{0}")]
    Conflict(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl RegisterError {
    pub fn status(&self) -> StatusCode {
        match self {
            RegisterError::Validation(_) => StatusCode::BAD_REQUEST,
            RegisterError::Conflict(_) => StatusCode::CONFLICT,
            RegisterError::Store(_) | RegisterError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RegisterError {
    fn into_response(self) -> Response {
        let message = match &self {
            RegisterError::Validation(m) | RegisterError::Conflict(m) => m.to_string(),
            // Backend detail goes to the log, not to the client.
            RegisterError::Store(_) | RegisterError::Internal(_) => "registration failed".into(),
        };
        (
            self.status(),
            Json(ErrorResponse {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}
