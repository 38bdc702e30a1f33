use serde::{Deserialize, Serialize};
use skytrip_core::{Itinerary, TripAction, TripSelection};

use crate::saved::SavedItineraries;

/// The slice of app state that survives navigation and can be persisted:
/// the trip being planned and the itineraries already booked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub trip: TripSelection,
    #[serde(default)]
    pub saved: SavedItineraries,
}

impl SessionState {
    pub fn new(trip: TripSelection) -> Self {
        Self {
            trip,
            saved: SavedItineraries::new(),
        }
    }

    pub fn dispatch(&mut self, action: TripAction) {
        self.trip.apply(action);
    }

    pub fn save_itinerary(&mut self, itinerary: Itinerary) -> bool {
        self.saved.add(itinerary)
    }

    /// Logout companion: forget booked itineraries and start a fresh trip.
    pub fn clear_all(&mut self) {
        self.saved.clear();
        self.trip = TripSelection::default();
        tracing::info!("Session state cleared");
    }
}
