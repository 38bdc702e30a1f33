use chrono::NaiveDate;
use serde::Serialize;
use skytrip_catalog::{SeatId, SeatLayout, SeatMap, SeatRow, SeatToggle};
use skytrip_core::{Airport, DatePicker, Itinerary, PickerPhase, TripAction, TripSelection};
use skytrip_order::{Booking, BookingDesk, BookingError, SessionState};
use std::sync::Arc;

use crate::facade::SearchState;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Itinerary {0} is not in the current results")]
    UnknownItinerary(String),

    #[error("No seat map is open")]
    NoSeatMap,

    #[error(transparent)]
    Booking(#[from] BookingError),
}

/// Seat selection in progress for one itinerary.
#[derive(Debug, Clone)]
pub struct OpenSeatMap {
    pub itinerary: Itinerary,
    pub map: SeatMap,
}

/// Everything one user of the service sees: the persisted trip and saved
/// itineraries plus the transient screen state around them.
#[derive(Debug, Default)]
pub struct Session {
    pub state: SessionState,
    pub date_picker: DatePicker,
    pub airports: SearchState<Airport>,
    pub flights: SearchState<Itinerary>,
    pub seat_map: Option<OpenSeatMap>,
    pub signed_in: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TripView {
    pub trip: TripSelection,
    pub picker_phase: PickerPhase,
    pub selection_label: &'static str,
    pub date_range: String,
    pub cabin_label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatMapView {
    pub itinerary_id: String,
    pub travelers: u32,
    pub rows: Vec<SeatRow>,
    pub progress: String,
    pub selected: String,
    pub complete: bool,
}

impl Session {
    pub fn new(state: SessionState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn trip(&self) -> &TripSelection {
        &self.state.trip
    }

    pub fn dispatch(&mut self, action: TripAction) {
        self.state.dispatch(action);
    }

    pub fn press_date(&mut self, day: NaiveDate, today: NaiveDate) {
        for action in self.date_picker.press(&self.state.trip, day, today) {
            self.state.dispatch(action);
        }
    }

    pub fn edit_dates(&mut self, today: NaiveDate) {
        for action in self.date_picker.edit(today) {
            self.state.dispatch(action);
        }
    }

    pub fn trip_view(&self) -> TripView {
        TripView {
            trip: self.state.trip.clone(),
            picker_phase: self.date_picker.phase(),
            selection_label: self.date_picker.selection_label(&self.state.trip),
            date_range: skytrip_core::date_picker::date_range_summary(&self.state.trip),
            cabin_label: self.state.trip.cabin_class.label(),
        }
    }

    /// Start seat selection for one of the current flight results.
    /// Any previous selection is discarded.
    pub fn open_seat_map(&mut self, itinerary_id: &str, layout: Arc<SeatLayout>) -> Result<SeatMapView, SessionError> {
        let itinerary = self
            .flights
            .results
            .iter()
            .find(|i| i.id == itinerary_id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownItinerary(itinerary_id.to_string()))?;

        let map = SeatMap::new(layout, self.state.trip.travelers);
        tracing::info!("Opened seat map for itinerary {} ({} traveler(s))", itinerary.id, map.travelers());
        self.seat_map = Some(OpenSeatMap { itinerary, map });
        self.seat_map_view()
    }

    pub fn toggle_seat(&mut self, seat: SeatId) -> Result<(SeatToggle, SeatMapView), SessionError> {
        let open = self.seat_map.as_mut().ok_or(SessionError::NoSeatMap)?;
        let outcome = open.map.toggle(seat);
        Ok((outcome, self.seat_map_view()?))
    }

    pub fn seat_map_view(&self) -> Result<SeatMapView, SessionError> {
        let open = self.seat_map.as_ref().ok_or(SessionError::NoSeatMap)?;
        Ok(SeatMapView {
            itinerary_id: open.itinerary.id.clone(),
            travelers: open.map.travelers(),
            rows: open.map.rows(),
            progress: open.map.progress_label(),
            selected: open.map.selected_label(),
            complete: open.map.is_complete(),
        })
    }

    /// Book the open seat map. On an incomplete selection the map stays open.
    pub fn book(&mut self) -> Result<Booking, SessionError> {
        let open = self.seat_map.as_ref().ok_or(SessionError::NoSeatMap)?;
        BookingDesk::ensure_complete(&open.map)?;

        let OpenSeatMap { itinerary, map } = self.seat_map.take().ok_or(SessionError::NoSeatMap)?;
        Ok(BookingDesk::book(map, itinerary, &mut self.state.saved)?)
    }

    /// Sign-out: forget everything tied to the user.
    pub fn reset(&mut self) {
        self.state.clear_all();
        self.date_picker = DatePicker::new();
        self.airports.clear();
        self.flights.clear();
        self.seat_map = None;
        self.signed_in = false;
    }
}
