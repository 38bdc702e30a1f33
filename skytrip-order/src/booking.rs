use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skytrip_catalog::{SeatId, SeatMap};
use skytrip_core::Itinerary;
use uuid::Uuid;

use crate::saved::SavedItineraries;

/// Confirmation of a booked itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub itinerary_id: String,
    pub seats: Vec<SeatId>,
    pub travelers: u32,
    pub booked_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Seat selection incomplete: {selected} of {required} seats chosen")]
    SelectionIncomplete {
        selected: usize,
        required: u32,
    },
}

/// Turns a completed seat selection into a saved itinerary.
pub struct BookingDesk;

impl BookingDesk {
    /// Booking is only offered once every traveler has a seat.
    pub fn ensure_complete(seat_map: &SeatMap) -> Result<(), BookingError> {
        if seat_map.is_complete() {
            Ok(())
        } else {
            Err(BookingError::SelectionIncomplete {
                selected: seat_map.selection().len(),
                required: seat_map.travelers(),
            })
        }
    }

    /// Consume the seat map and save the itinerary.
    pub fn book(
        seat_map: SeatMap,
        itinerary: Itinerary,
        saved: &mut SavedItineraries,
    ) -> Result<Booking, BookingError> {
        Self::ensure_complete(&seat_map)?;

        let travelers = seat_map.travelers();
        let booking = Booking {
            id: Uuid::new_v4(),
            itinerary_id: itinerary.id.clone(),
            seats: seat_map.into_selection(),
            travelers,
            booked_at: Utc::now(),
        };

        if !saved.add(itinerary) {
            tracing::info!("Itinerary {} was already saved", booking.itinerary_id);
        }
        tracing::info!(
            "Booked itinerary {} for {} traveler(s), booking {}",
            booking.itinerary_id,
            booking.travelers,
            booking.id
        );

        Ok(booking)
    }
}
