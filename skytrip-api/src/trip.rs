use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use skytrip_core::{CabinClass, TripAction};

use crate::{session::TripView, state::AppState};

#[derive(Debug, Deserialize)]
pub struct DatePress {
    pub date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct CabinOption {
    value: CabinClass,
    label: &'static str,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/trip", get(get_trip))
        .route("/v1/trip/actions", post(dispatch))
        .route("/v1/trip/cabins", get(cabin_options))
        .route("/v1/trip/dates/press", post(press_date))
        .route("/v1/trip/dates/edit", post(edit_dates))
}

/// GET /v1/trip
async fn get_trip(State(state): State<AppState>) -> Json<TripView> {
    Json(state.session.read().await.trip_view())
}

/// POST /v1/trip/actions
async fn dispatch(State(state): State<AppState>, Json(action): Json<TripAction>) -> Json<TripView> {
    tracing::debug!("Trip action {:?}", action);
    let view = {
        let mut session = state.session.write().await;
        session.dispatch(action);
        session.trip_view()
    };
    state.persist().await;
    Json(view)
}

/// GET /v1/trip/cabins
async fn cabin_options() -> Json<Vec<CabinOption>> {
    Json(
        CabinClass::ALL
            .iter()
            .map(|&value| CabinOption { value, label: value.label() })
            .collect(),
    )
}

/// POST /v1/trip/dates/press
///
/// Taps before today or more than a year ahead change nothing.
async fn press_date(State(state): State<AppState>, Json(req): Json<DatePress>) -> Json<TripView> {
    let view = {
        let mut session = state.session.write().await;
        session.press_date(req.date, Utc::now().date_naive());
        session.trip_view()
    };
    state.persist().await;
    Json(view)
}

/// POST /v1/trip/dates/edit
async fn edit_dates(State(state): State<AppState>) -> Json<TripView> {
    let view = {
        let mut session = state.session.write().await;
        session.edit_dates(Utc::now().date_naive());
        session.trip_view()
    };
    state.persist().await;
    Json(view)
}
