use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skytrip_core::AuthError;

use crate::session::SessionError;

#[derive(Debug)]
pub enum AppError {
    /// A rejected credential, reported against the form field it belongs to.
    CredentialError(AuthError),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    pub fn from_auth(err: AuthError) -> Self {
        match err {
            AuthError::Unknown(msg) => AppError::Anyhow(anyhow::anyhow!("auth provider: {}", msg)),
            rejected => AppError::CredentialError(rejected),
        }
    }

    pub fn from_session(err: SessionError) -> Self {
        match err {
            SessionError::UnknownItinerary(_) => AppError::NotFoundError(err.to_string()),
            SessionError::NoSeatMap => AppError::ConflictError("No seat map is open".to_string()),
            SessionError::Booking(e) => AppError::ConflictError(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::CredentialError(err) => match err.field_error() {
                Some(field) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "error": field.message, "field": field.field }),
                ),
                None => (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": err.to_string() })),
            },
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": "Internal Server Error" }))
            }
        };

        (status, Json(body)).into_response()
    }
}
