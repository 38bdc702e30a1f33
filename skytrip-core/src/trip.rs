use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::airport::Airport;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TripType {
    OneWay,
    #[default]
    RoundTrip,
}

/// Cabin requested from the flight search.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    #[default]
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    pub const ALL: [CabinClass; 4] = [
        CabinClass::Economy,
        CabinClass::PremiumEconomy,
        CabinClass::Business,
        CabinClass::First,
    ];

    /// Value of the `cabinClass` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            CabinClass::Economy => "economy",
            CabinClass::PremiumEconomy => "premium_economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CabinClass::Economy => "Economy",
            CabinClass::PremiumEconomy => "Premium Economy",
            CabinClass::Business => "Business",
            CabinClass::First => "First",
        }
    }
}

/// User actions that mutate the trip selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TripAction {
    SetOrigin(Airport),
    SetDestination(Airport),
    SwapOriginDestination,
    SetDepartureDate(NaiveDate),
    SetReturnDate(Option<NaiveDate>),
    SetTripType(TripType),
    SetCabinClass(CabinClass),
    IncrementTravelers,
    DecrementTravelers,
    Reset,
}

/// Origin, destination, dates and party size shared by the search, seat and
/// booking steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripSelection {
    pub origin: Option<Airport>,
    pub destination: Option<Airport>,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub travelers: u32,
    #[serde(default)]
    pub trip_type: TripType,
    #[serde(default)]
    pub cabin_class: CabinClass,
}

impl TripSelection {
    /// Fresh selection: departing `today`, returning the day after, one traveler.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            origin: None,
            destination: None,
            departure_date: today,
            return_date: today.succ_opt(),
            travelers: 1,
            trip_type: TripType::default(),
            cabin_class: CabinClass::default(),
        }
    }

    /// Pure reducer form of [`TripSelection::apply`].
    pub fn reduce(mut self, action: TripAction) -> Self {
        self.apply(action);
        self
    }

    pub fn apply(&mut self, action: TripAction) {
        match action {
            TripAction::SetOrigin(airport) => self.origin = Some(airport),
            TripAction::SetDestination(airport) => self.destination = Some(airport),
            TripAction::SwapOriginDestination => {
                std::mem::swap(&mut self.origin, &mut self.destination);
            }
            TripAction::SetDepartureDate(date) => {
                self.departure_date = date;
                if self.trip_type == TripType::OneWay {
                    self.return_date = None;
                }
            }
            TripAction::SetReturnDate(date) => self.return_date = date,
            TripAction::SetTripType(trip_type) => {
                self.trip_type = trip_type;
                if trip_type == TripType::OneWay {
                    self.return_date = None;
                }
            }
            TripAction::SetCabinClass(cabin_class) => self.cabin_class = cabin_class,
            TripAction::IncrementTravelers => self.travelers = self.travelers.saturating_add(1),
            TripAction::DecrementTravelers => {
                // Floor of one traveler; going below is ignored, not reported.
                if self.travelers > 1 {
                    self.travelers -= 1;
                }
            }
            TripAction::Reset => *self = Self::default(),
        }
    }

    pub fn is_one_way(&self) -> bool {
        self.trip_type == TripType::OneWay
    }
}

impl Default for TripSelection {
    fn default() -> Self {
        Self::new(Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::fixtures::airport;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 18).unwrap()
    }

    #[test]
    fn test_defaults() {
        let trip = TripSelection::new(today());
        assert_eq!(trip.departure_date, today());
        assert_eq!(trip.return_date, NaiveDate::from_ymd_opt(2024, 10, 19));
        assert_eq!(trip.travelers, 1);
        assert!(trip.origin.is_none());
        assert!(trip.destination.is_none());
        assert_eq!(trip.cabin_class, CabinClass::Economy);
    }

    #[test]
    fn test_decrement_at_one_is_noop() {
        let trip = TripSelection::new(today()).reduce(TripAction::DecrementTravelers);
        assert_eq!(trip.travelers, 1);

        let trip = trip
            .reduce(TripAction::IncrementTravelers)
            .reduce(TripAction::IncrementTravelers)
            .reduce(TripAction::DecrementTravelers);
        assert_eq!(trip.travelers, 2);
    }

    #[test]
    fn test_swap_twice_restores_original() {
        let bom = airport("BOM", "95673320", "Mumbai");
        let del = airport("DEL", "95673498", "New Delhi");
        let trip = TripSelection::new(today())
            .reduce(TripAction::SetOrigin(bom.clone()))
            .reduce(TripAction::SetDestination(del.clone()));

        let swapped = trip.clone().reduce(TripAction::SwapOriginDestination);
        assert_eq!(swapped.origin.as_ref(), Some(&del));
        assert_eq!(swapped.destination.as_ref(), Some(&bom));

        let restored = swapped.reduce(TripAction::SwapOriginDestination);
        assert_eq!(restored, trip);
    }

    #[test]
    fn test_swap_with_one_side_empty() {
        let bom = airport("BOM", "95673320", "Mumbai");
        let trip = TripSelection::new(today())
            .reduce(TripAction::SetOrigin(bom.clone()))
            .reduce(TripAction::SwapOriginDestination);
        assert!(trip.origin.is_none());
        assert_eq!(trip.destination, Some(bom));
    }

    #[test]
    fn test_same_origin_and_destination_is_accepted() {
        let bom = airport("BOM", "95673320", "Mumbai");
        let trip = TripSelection::new(today())
            .reduce(TripAction::SetOrigin(bom.clone()))
            .reduce(TripAction::SetDestination(bom.clone()));
        assert_eq!(trip.origin, trip.destination);
    }

    #[test]
    fn test_one_way_clears_return_and_keeps_departure() {
        let departure = NaiveDate::from_ymd_opt(2024, 11, 2).unwrap();
        let trip = TripSelection::new(today())
            .reduce(TripAction::SetDepartureDate(departure))
            .reduce(TripAction::SetReturnDate(NaiveDate::from_ymd_opt(2024, 11, 9)));
        assert!(trip.return_date.is_some());

        let trip = trip.reduce(TripAction::SetTripType(TripType::OneWay));
        assert_eq!(trip.return_date, None);
        assert_eq!(trip.departure_date, departure);
    }

    #[test]
    fn test_departure_on_one_way_clears_return() {
        let mut trip = TripSelection::new(today());
        trip.trip_type = TripType::OneWay;
        trip.apply(TripAction::SetDepartureDate(NaiveDate::from_ymd_opt(2024, 12, 1).unwrap()));
        assert_eq!(trip.return_date, None);

        let round_trip = TripSelection::new(today())
            .reduce(TripAction::SetDepartureDate(NaiveDate::from_ymd_opt(2024, 10, 18).unwrap()));
        assert!(round_trip.return_date.is_some());
    }

    #[test]
    fn test_action_wire_format() {
        let action: TripAction =
            serde_json::from_str(r#"{"type":"SET_CABIN_CLASS","payload":"premium_economy"}"#).unwrap();
        assert_eq!(action, TripAction::SetCabinClass(CabinClass::PremiumEconomy));

        let action: TripAction = serde_json::from_str(r#"{"type":"DECREMENT_TRAVELERS"}"#).unwrap();
        assert_eq!(action, TripAction::DecrementTravelers);
    }
}
