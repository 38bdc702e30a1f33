use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::airport::Airport;
use crate::itinerary::Itinerary;
use crate::trip::{CabinClass, TripSelection};

pub const DEFAULT_LOCALE: &str = "en-US";

/// Free-text airport lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AirportQuery {
    pub query: String,
    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl AirportQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            locale: default_locale(),
        }
    }

    /// Empty queries are answered locally with no results.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }
}

/// Parameters of a one-way flight search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FlightSearchRequest {
    pub origin_sky_id: String,
    pub destination_sky_id: String,
    pub origin_entity_id: String,
    pub destination_entity_id: String,
    pub date: NaiveDate,
    pub cabin_class: CabinClass,
    pub adults: u32,
}

impl FlightSearchRequest {
    /// Build the request from the current trip, or say what is still missing.
    pub fn from_trip(trip: &TripSelection) -> Result<Self, SearchNotReady> {
        let origin = trip
            .origin
            .as_ref()
            .filter(|a| a.is_searchable())
            .ok_or(SearchNotReady::MissingOrigin)?;
        let destination = trip
            .destination
            .as_ref()
            .filter(|a| a.is_searchable())
            .ok_or(SearchNotReady::MissingDestination)?;
        if trip.travelers == 0 {
            return Err(SearchNotReady::NoTravelers);
        }

        Ok(Self {
            origin_sky_id: origin.sky_id.clone(),
            destination_sky_id: destination.sky_id.clone(),
            origin_entity_id: origin.entity_id.clone(),
            destination_entity_id: destination.entity_id.clone(),
            date: trip.departure_date,
            cabin_class: trip.cabin_class,
            adults: trip.travelers,
        })
    }
}

/// The trip is not complete enough to search; distinct from a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum SearchNotReady {
    #[error("origin airport not selected")]
    MissingOrigin,
    #[error("destination airport not selected")]
    MissingDestination,
    #[error("at least one traveler is required")]
    NoTravelers,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("search API returned {status}: {message}")]
    Status {
        status: u16,
        message: String,
    },

    #[error("invalid search response: {0}")]
    Decode(String),

    #[error("search API reported an unsuccessful lookup")]
    Unsuccessful,
}

/// The external flight search provider.
#[async_trait]
pub trait SearchApi: Send + Sync {
    async fn search_airports(&self, query: &AirportQuery) -> Result<Vec<Airport>, SearchError>;

    /// Itineraries ranked by the provider ("best" first).
    async fn search_flights(&self, request: &FlightSearchRequest) -> Result<Vec<Itinerary>, SearchError>;
}
