use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{error, instrument, warn};

use crate::{
    auth::{
        dto::{RegisterRequest, RegisterResponse},
        errors::{RegisterError, INVALID_BODY},
        jwt::JwtKeys,
        services,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/api/register", post(register))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, RegisterError> {
    let Json(payload) = payload.map_err(|e| {
        warn!(error = %e, "unreadable register body");
        RegisterError::Validation(INVALID_BODY)
    })?;

    let keys = JwtKeys::from_ref(&state);
    let registration =
        services::register(&state.users, &keys, &payload.username, &payload.password)
            .await
            .map_err(|e| {
                if e.status().is_server_error() {
                    error!(error = %e, username = %payload.username, "registration failed");
                }
                e
            })?;

    Ok(Json(registration.into()))
}
