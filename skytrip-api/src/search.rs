use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use skytrip_core::{Airport, Itinerary, SearchNotReady};

use crate::facade::{FlightSearchOutcome, Lookup, SearchState};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AirportSearchParams {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Serialize)]
struct AirportSearchResponse {
    #[serde(flatten)]
    state: SearchState<Airport>,
    /// A newer lookup replaced this one; `results` shows the latest known list.
    superseded: bool,
}

#[derive(Debug, Serialize)]
struct FlightSearchResponse {
    #[serde(flatten)]
    state: SearchState<Itinerary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    not_ready: Option<SearchNotReady>,
    superseded: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/airports", get(search_airports))
        .route("/v1/flights", get(current_flights))
        .route("/v1/flights/search", post(search_flights))
}

/// GET /v1/airports?query=...
async fn search_airports(
    State(state): State<AppState>,
    Query(params): Query<AirportSearchParams>,
) -> Json<AirportSearchResponse> {
    state.session.write().await.airports.begin();

    let lookup = state.search.lookup_airports(&params.query).await;

    let mut session = state.session.write().await;
    let superseded = match lookup {
        Lookup::Results(airports) => {
            session.airports.finish(airports);
            false
        }
        Lookup::Superseded => true,
    };
    Json(AirportSearchResponse {
        state: session.airports.clone(),
        superseded,
    })
}

/// GET /v1/flights
async fn current_flights(State(state): State<AppState>) -> Json<SearchState<Itinerary>> {
    Json(state.session.read().await.flights.clone())
}

/// POST /v1/flights/search
async fn search_flights(State(state): State<AppState>) -> Json<FlightSearchResponse> {
    let trip = {
        let mut session = state.session.write().await;
        session.flights.begin();
        session.trip().clone()
    };

    let outcome = state.search.search_flights(&trip).await;

    let mut session = state.session.write().await;
    let (not_ready, superseded) = match outcome {
        FlightSearchOutcome::NotReady(reason) => {
            tracing::info!("Flight search not ready: {}", reason);
            session.flights.clear();
            (Some(reason), false)
        }
        FlightSearchOutcome::Results(itineraries) => {
            session.flights.finish(itineraries);
            (None, false)
        }
        FlightSearchOutcome::Superseded => (None, true),
    };
    Json(FlightSearchResponse {
        state: session.flights.clone(),
        not_ready,
        superseded,
    })
}
