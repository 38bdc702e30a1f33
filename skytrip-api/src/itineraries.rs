use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use skytrip_core::Itinerary;

use crate::state::AppState;

#[derive(Debug, Serialize)]
struct ImportResponse {
    added: usize,
    total: usize,
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/v1/itineraries",
        get(list_saved).post(import_saved).delete(clear_saved),
    )
}

/// GET /v1/itineraries
///
/// Most recently saved first.
async fn list_saved(State(state): State<AppState>) -> Json<Vec<Itinerary>> {
    Json(state.session.read().await.state.saved.as_slice().to_vec())
}

/// POST /v1/itineraries
///
/// Bulk merge; itineraries whose id is already saved are skipped.
async fn import_saved(
    State(state): State<AppState>,
    Json(batch): Json<Vec<Itinerary>>,
) -> Json<ImportResponse> {
    let response = {
        let mut session = state.session.write().await;
        let added = session.state.saved.add_many(batch);
        ImportResponse {
            added,
            total: session.state.saved.len(),
        }
    };
    tracing::info!("Imported {} itineraries ({} saved)", response.added, response.total);
    state.persist().await;
    Json(response)
}

/// DELETE /v1/itineraries
async fn clear_saved(State(state): State<AppState>) -> StatusCode {
    state.session.write().await.state.saved.clear();
    state.persist().await;
    StatusCode::NO_CONTENT
}
