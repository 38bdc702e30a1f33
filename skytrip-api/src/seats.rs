use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use skytrip_catalog::{SeatId, SeatToggle};
use skytrip_order::Booking;

use crate::{error::AppError, session::SeatMapView, state::AppState};

#[derive(Debug, Deserialize)]
pub struct OpenSeatMapRequest {
    pub itinerary_id: String,
}

#[derive(Debug, Serialize)]
struct ToggleResponse {
    outcome: SeatToggle,
    seat_map: SeatMapView,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/seats", get(get_seat_map).post(open_seat_map))
        .route("/v1/seats/{seat}/toggle", post(toggle_seat))
        .route("/v1/seats/book", post(book))
}

/// POST /v1/seats
async fn open_seat_map(
    State(state): State<AppState>,
    Json(req): Json<OpenSeatMapRequest>,
) -> Result<Json<SeatMapView>, AppError> {
    let layout = state.layout.clone();
    let view = state
        .session
        .write()
        .await
        .open_seat_map(&req.itinerary_id, layout)
        .map_err(AppError::from_session)?;
    Ok(Json(view))
}

/// GET /v1/seats
async fn get_seat_map(State(state): State<AppState>) -> Result<Json<SeatMapView>, AppError> {
    let view = state
        .session
        .read()
        .await
        .seat_map_view()
        .map_err(AppError::from_session)?;
    Ok(Json(view))
}

/// POST /v1/seats/{seat}/toggle
async fn toggle_seat(
    State(state): State<AppState>,
    Path(seat): Path<String>,
) -> Result<Json<ToggleResponse>, AppError> {
    let seat: SeatId = seat
        .parse()
        .map_err(|e: skytrip_catalog::SeatMapError| AppError::ValidationError(e.to_string()))?;

    let (outcome, seat_map) = state
        .session
        .write()
        .await
        .toggle_seat(seat)
        .map_err(AppError::from_session)?;
    Ok(Json(ToggleResponse { outcome, seat_map }))
}

/// POST /v1/seats/book
async fn book(State(state): State<AppState>) -> Result<(StatusCode, Json<Booking>), AppError> {
    let booking = state
        .session
        .write()
        .await
        .book()
        .map_err(AppError::from_session)?;
    state.persist().await;
    Ok((StatusCode::CREATED, Json(booking)))
}
