use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use skytrip_core::SessionId;
use skytrip_shared::Masked;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub identifier: String,
    pub secret: Masked<String>,
}

#[derive(Debug, Serialize)]
struct SignedIn {
    session_id: SessionId,
}

#[derive(Debug, Serialize)]
struct SessionStatus {
    signed_in: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/auth/sign-in", post(sign_in))
        .route("/v1/auth/sign-up", post(sign_up))
        .route("/v1/auth/sign-out", post(sign_out))
        .route("/v1/auth/session", get(session_status))
}

/// POST /v1/auth/sign-in
async fn sign_in(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<SignedIn>, AppError> {
    let session_id = state
        .auth
        .sign_in(req.identifier.trim(), &req.secret)
        .await
        .map_err(AppError::from_auth)?;

    state.session.write().await.signed_in = true;
    Ok(Json(SignedIn { session_id }))
}

/// POST /v1/auth/sign-up
async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<(StatusCode, Json<SignedIn>), AppError> {
    let session_id = state
        .auth
        .sign_up(req.identifier.trim(), &req.secret)
        .await
        .map_err(AppError::from_auth)?;

    state.session.write().await.signed_in = true;
    Ok((StatusCode::CREATED, Json(SignedIn { session_id })))
}

/// POST /v1/auth/sign-out
///
/// Ends the provider session, then clears the trip, the saved itineraries
/// and anything persisted for them.
async fn sign_out(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.auth.sign_out().await.map_err(AppError::from_auth)?;

    // Searches still in flight must not repopulate the cleared session.
    state.search.invalidate();
    state.session.write().await.reset();
    if let Err(e) = state.persistor.purge().await {
        tracing::warn!("Failed to purge persisted state on sign-out: {}", e);
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /v1/auth/session
async fn session_status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(SessionStatus {
        signed_in: state.auth.is_session_active().await,
    })
}
