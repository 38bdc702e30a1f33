//! HTTP client for the Sky Scrapper flight search API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use skytrip_core::{Airport, AirportQuery, FlightSearchRequest, Itinerary, SearchApi, SearchError};
use skytrip_shared::Masked;
use skytrip_store::app_config::SearchApiConfig;

const AIRPORT_SEARCH_PATH: &str = "/api/v1/flights/searchAirport";
const FLIGHT_SEARCH_PATH: &str = "/api/v2/flights/searchFlights";
const SORT_BY: &str = "best";

#[derive(Debug, Deserialize)]
struct AirportSearchResponse {
    status: bool,
    #[serde(default)]
    data: Vec<Airport>,
}

#[derive(Debug, Deserialize)]
struct FlightSearchResponse {
    status: bool,
    data: Option<FlightSearchData>,
}

#[derive(Debug, Deserialize)]
struct FlightSearchData {
    #[serde(default)]
    itineraries: Vec<Itinerary>,
}

#[derive(Clone)]
pub struct SkyScrapperClient {
    base_url: String,
    host: String,
    api_key: Masked<String>,
    currency: String,
    market: String,
    country_code: String,
    client: reqwest::Client,
}

impl SkyScrapperClient {
    pub fn new(config: &SearchApiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            host: config.host.clone(),
            api_key: config.api_key.clone(),
            currency: config.currency.clone(),
            market: config.market.clone(),
            country_code: config.country_code.clone(),
            client,
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SearchError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .header("x-rapidapi-key", self.api_key.expose())
            .header("x-rapidapi-host", &self.host)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SearchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SearchApi for SkyScrapperClient {
    async fn search_airports(&self, query: &AirportQuery) -> Result<Vec<Airport>, SearchError> {
        let response: AirportSearchResponse = self
            .get(
                AIRPORT_SEARCH_PATH,
                &[("query", query.query.clone()), ("locale", query.locale.clone())],
            )
            .await?;
        if !response.status {
            return Err(SearchError::Unsuccessful);
        }
        tracing::info!("Airport search '{}' returned {} suggestions", query.query, response.data.len());
        Ok(response.data)
    }

    async fn search_flights(&self, request: &FlightSearchRequest) -> Result<Vec<Itinerary>, SearchError> {
        let params = [
            ("originSkyId", request.origin_sky_id.clone()),
            ("destinationSkyId", request.destination_sky_id.clone()),
            ("originEntityId", request.origin_entity_id.clone()),
            ("destinationEntityId", request.destination_entity_id.clone()),
            ("date", request.date.format("%Y-%m-%d").to_string()),
            ("cabinClass", request.cabin_class.as_str().to_string()),
            ("adults", request.adults.to_string()),
            ("sortBy", SORT_BY.to_string()),
            ("currency", self.currency.clone()),
            ("market", self.market.clone()),
            ("countryCode", self.country_code.clone()),
        ];
        let response: FlightSearchResponse = self.get(FLIGHT_SEARCH_PATH, &params).await?;
        if !response.status {
            return Err(SearchError::Unsuccessful);
        }
        let itineraries = response.data.map(|d| d.itineraries).unwrap_or_default();
        tracing::info!(
            "Flight search {} -> {} on {} returned {} itineraries",
            request.origin_sky_id,
            request.destination_sky_id,
            request.date,
            itineraries.len()
        );
        Ok(itineraries)
    }
}
