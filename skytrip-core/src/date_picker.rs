use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::trip::{TripAction, TripSelection};

/// Which date the next calendar tap fills in.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PickerPhase {
    #[default]
    SelectingDeparture,
    SelectingReturn,
}

/// Two-phase calendar picker.
///
/// The picker owns only its phase. Taps are translated into [`TripAction`]s
/// which the caller feeds to the trip reducer, so the trip stays the single
/// source of truth for the dates.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatePicker {
    phase: PickerPhase,
}

impl DatePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PickerPhase {
        self.phase
    }

    /// Handle a tap on `day`, returning the trip mutations it implies.
    /// Days outside [`bookable_range`] are ignored.
    pub fn press(&mut self, trip: &TripSelection, day: NaiveDate, today: NaiveDate) -> Vec<TripAction> {
        let (first, last) = bookable_range(today);
        if day < first || day > last {
            tracing::debug!("Ignoring tap on {} outside {}..={}", day, first, last);
            return Vec::new();
        }

        if trip.is_one_way() {
            self.phase = PickerPhase::SelectingDeparture;
            return Self::anchor(day);
        }

        match self.phase {
            PickerPhase::SelectingDeparture => {
                self.phase = PickerPhase::SelectingReturn;
                Self::anchor(day)
            }
            // Earlier than departure: start over from the new day instead of rejecting.
            PickerPhase::SelectingReturn if day < trip.departure_date => Self::anchor(day),
            PickerPhase::SelectingReturn => {
                self.phase = PickerPhase::SelectingDeparture;
                vec![TripAction::SetReturnDate(Some(day))]
            }
        }
    }

    /// The "edit" button: back to picking a departure, starting from today.
    pub fn edit(&mut self, today: NaiveDate) -> Vec<TripAction> {
        self.phase = PickerPhase::SelectingDeparture;
        Self::anchor(today)
    }

    pub fn selection_label(&self, trip: &TripSelection) -> &'static str {
        if trip.is_one_way() || self.phase == PickerPhase::SelectingDeparture {
            "SELECT DEPARTURE DATE"
        } else {
            "SELECT RETURN DATE"
        }
    }

    fn anchor(day: NaiveDate) -> Vec<TripAction> {
        vec![
            TripAction::SetDepartureDate(day),
            TripAction::SetReturnDate(None),
        ]
    }
}

/// First and last selectable day: today through the same date next year.
pub fn bookable_range(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let last = today.checked_add_months(Months::new(12)).unwrap_or(NaiveDate::MAX);
    (today, last)
}

/// "Oct 18"
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Header text for the picker, e.g. "Oct 18 — Oct 21".
pub fn date_range_summary(trip: &TripSelection) -> String {
    let departure = format_short_date(trip.departure_date);
    if trip.is_one_way() {
        return departure;
    }
    match trip.return_date {
        Some(ret) => format!("{} — {}", departure, format_short_date(ret)),
        None => format!("{} — Select return date", departure),
    }
}
