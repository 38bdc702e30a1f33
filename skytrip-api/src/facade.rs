use serde::Serialize;
use skytrip_core::{
    Airport, AirportQuery, FlightSearchRequest, Itinerary, SearchApi, SearchNotReady, TripSelection,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// A list that is loaded from the search provider.
#[derive(Debug, Clone, Serialize)]
pub struct SearchState<T> {
    pub searching: bool,
    pub results: Vec<T>,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            searching: false,
            results: Vec::new(),
        }
    }
}

impl<T> SearchState<T> {
    pub fn begin(&mut self) {
        self.searching = true;
    }

    pub fn finish(&mut self, results: Vec<T>) {
        self.searching = false;
        self.results = results;
    }

    pub fn clear(&mut self) {
        self.finish(Vec::new());
    }
}

/// Outcome of one airport lookup.
#[derive(Debug)]
pub enum Lookup<T> {
    Results(Vec<T>),
    /// A newer lookup started while this one was pending; drop the result.
    Superseded,
}

#[derive(Debug)]
pub enum FlightSearchOutcome {
    NotReady(SearchNotReady),
    Results(Vec<Itinerary>),
    Superseded,
}

/// Debounced, cancellable entry point to the [`SearchApi`].
///
/// Every call takes a generation number. A result is only returned if no
/// newer call of the same kind started in the meantime, so late responses
/// never overwrite fresher ones. Provider failures are logged and surface
/// as an empty result.
#[derive(Clone)]
pub struct SearchFacade {
    api: Arc<dyn SearchApi>,
    locale: String,
    debounce: Duration,
    airport_generation: Arc<AtomicU64>,
    flight_generation: Arc<AtomicU64>,
}

impl SearchFacade {
    pub fn new(api: Arc<dyn SearchApi>, locale: impl Into<String>, debounce: Duration) -> Self {
        Self {
            api,
            locale: locale.into(),
            debounce,
            airport_generation: Arc::new(AtomicU64::new(0)),
            flight_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn lookup_airports(&self, text: &str) -> Lookup<Airport> {
        let generation = self.airport_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let query = AirportQuery {
            query: text.trim().to_string(),
            locale: self.locale.clone(),
        };

        // Clearing the box supersedes anything in flight without a request.
        if query.is_empty() {
            return Lookup::Results(Vec::new());
        }

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
            if !self.is_current(&self.airport_generation, generation) {
                debug!("Airport lookup '{}' superseded while debouncing", query.query);
                return Lookup::Superseded;
            }
        }

        let result = self.api.search_airports(&query).await;
        if !self.is_current(&self.airport_generation, generation) {
            debug!("Discarding stale airport results for '{}'", query.query);
            return Lookup::Superseded;
        }

        match result {
            Ok(airports) => Lookup::Results(airports),
            Err(e) => {
                warn!("Airport lookup '{}' failed: {}", query.query, e);
                Lookup::Results(Vec::new())
            }
        }
    }

    pub async fn search_flights(&self, trip: &TripSelection) -> FlightSearchOutcome {
        // An unready trip still supersedes whatever search is in flight.
        let generation = self.flight_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let request = match FlightSearchRequest::from_trip(trip) {
            Ok(request) => request,
            Err(reason) => return FlightSearchOutcome::NotReady(reason),
        };

        let result = self.api.search_flights(&request).await;
        if !self.is_current(&self.flight_generation, generation) {
            debug!(
                "Discarding stale flight results for {} -> {}",
                request.origin_sky_id, request.destination_sky_id
            );
            return FlightSearchOutcome::Superseded;
        }

        match result {
            Ok(itineraries) => FlightSearchOutcome::Results(itineraries),
            Err(e) => {
                warn!(
                    "Flight search {} -> {} failed: {}",
                    request.origin_sky_id, request.destination_sky_id, e
                );
                FlightSearchOutcome::Results(Vec::new())
            }
        }
    }

    /// Mark every pending lookup and search as stale.
    pub fn invalidate(&self) {
        self.airport_generation.fetch_add(1, Ordering::SeqCst);
        self.flight_generation.fetch_add(1, Ordering::SeqCst);
        debug!("Pending searches invalidated");
    }

    fn is_current(&self, counter: &AtomicU64, generation: u64) -> bool {
        counter.load(Ordering::SeqCst) == generation
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::{airport, ScriptedSearchApi};
    use super::*;
    use chrono::NaiveDate;
    use skytrip_core::TripAction;

    fn facade(api: Arc<ScriptedSearchApi>, debounce_ms: u64) -> SearchFacade {
        SearchFacade::new(api, "en-US", Duration::from_millis(debounce_ms))
    }

    fn ready_trip() -> TripSelection {
        TripSelection::new(NaiveDate::from_ymd_opt(2024, 10, 18).unwrap())
            .reduce(TripAction::SetOrigin(airport("BOM", "1", "Mumbai")))
            .reduce(TripAction::SetDestination(airport("DEL", "2", "New Delhi")))
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_request() {
        let api = Arc::new(ScriptedSearchApi::default());
        let result = facade(api.clone(), 0).lookup_airports("   ").await;
        assert!(matches!(result, Lookup::Results(ref v) if v.is_empty()));
        assert_eq!(api.airport_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_debounce_collapses_rapid_keystrokes() {
        let api = Arc::new(ScriptedSearchApi::default());
        let facade = facade(api.clone(), 30);

        let (first, second, third) = tokio::join!(
            facade.lookup_airports("l"),
            facade.lookup_airports("lo"),
            facade.lookup_airports("lon"),
        );

        assert!(matches!(first, Lookup::Superseded));
        assert!(matches!(second, Lookup::Superseded));
        match third {
            Lookup::Results(airports) => assert_eq!(airports[0].sky_id, "LON"),
            Lookup::Superseded => panic!("latest lookup must win"),
        }
        assert_eq!(api.airport_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_slow_earlier_response_is_discarded() {
        let api = Arc::new(ScriptedSearchApi::default());
        let facade = facade(api.clone(), 0);

        let slow = facade.lookup_airports("l");
        let fast = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            facade.lookup_airports("londo").await
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert!(matches!(slow, Lookup::Superseded));
        assert!(matches!(fast, Lookup::Results(ref v) if v[0].sky_id == "LONDO"));
        assert_eq!(api.airport_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_yields_empty_results() {
        let api = Arc::new(ScriptedSearchApi { fail: true, ..Default::default() });
        let result = facade(api, 0).lookup_airports("london").await;
        assert!(matches!(result, Lookup::Results(ref v) if v.is_empty()));
    }

    #[tokio::test]
    async fn test_flight_search_requires_both_airports() {
        let api = Arc::new(ScriptedSearchApi::default());
        let trip = TripSelection::new(NaiveDate::from_ymd_opt(2024, 10, 18).unwrap());

        let outcome = facade(api.clone(), 0).search_flights(&trip).await;
        assert!(matches!(outcome, FlightSearchOutcome::NotReady(SearchNotReady::MissingOrigin)));
        assert_eq!(api.flight_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_flight_search_returns_itineraries() {
        let api = Arc::new(ScriptedSearchApi::default());
        match facade(api, 0).search_flights(&ready_trip()).await {
            FlightSearchOutcome::Results(itineraries) => assert_eq!(itineraries[0].id, "BOM-DEL"),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_flight_search_failure_is_empty() {
        let api = Arc::new(ScriptedSearchApi { fail: true, ..Default::default() });
        let outcome = facade(api, 0).search_flights(&ready_trip()).await;
        assert!(matches!(outcome, FlightSearchOutcome::Results(ref v) if v.is_empty()));
    }

    #[tokio::test]
    async fn test_invalidate_discards_pending_searches() {
        let api = Arc::new(ScriptedSearchApi {
            flight_delay: Duration::from_millis(40),
            ..Default::default()
        });
        let facade = facade(api, 0);

        let trip = ready_trip();
        let pending = facade.search_flights(&trip);
        let invalidate = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            facade.invalidate();
        };
        let (outcome, ()) = tokio::join!(pending, invalidate);
        assert!(matches!(outcome, FlightSearchOutcome::Superseded));

        let airports = facade.lookup_airports("l");
        let invalidate = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            facade.invalidate();
        };
        let (lookup, ()) = tokio::join!(airports, invalidate);
        assert!(matches!(lookup, Lookup::Superseded));
    }

    #[tokio::test]
    async fn test_unready_search_supersedes_pending_one() {
        let api = Arc::new(ScriptedSearchApi {
            flight_delay: Duration::from_millis(40),
            ..Default::default()
        });
        let facade = facade(api.clone(), 0);
        let unready = TripSelection::new(NaiveDate::from_ymd_opt(2024, 10, 18).unwrap());

        let trip = ready_trip();
        let pending = facade.search_flights(&trip);
        let later = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            facade.search_flights(&unready).await
        };
        let (first, second) = tokio::join!(pending, later);
        assert!(matches!(first, FlightSearchOutcome::Superseded));
        assert!(matches!(second, FlightSearchOutcome::NotReady(SearchNotReady::MissingOrigin)));
        assert_eq!(api.flight_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_search_state_transitions() {
        let mut state: SearchState<u32> = SearchState::default();
        state.begin();
        assert!(state.searching);
        state.finish(vec![1, 2]);
        assert!(!state.searching);
        assert_eq!(state.results, vec![1, 2]);
        state.clear();
        assert!(state.results.is_empty());
    }
}
