use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod client;
pub mod error;
pub mod facade;
pub mod itineraries;
pub mod search;
pub mod seats;
pub mod session;
pub mod state;
pub mod trip;

pub use client::SkyScrapperClient;
pub use facade::SearchFacade;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::USER_AGENT]);

    Router::new()
        .merge(auth::routes())
        .merge(trip::routes())
        .merge(search::routes())
        .merge(seats::routes())
        .merge(itineraries::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
