pub mod airport;
pub mod itinerary;
pub mod trip;
pub mod date_picker;
pub mod search;
pub mod identity;

pub use airport::Airport;
pub use itinerary::{Itinerary, Leg};
pub use trip::{CabinClass, TripAction, TripSelection, TripType};
pub use date_picker::{DatePicker, PickerPhase};
pub use search::{AirportQuery, FlightSearchRequest, SearchApi, SearchError, SearchNotReady};
pub use identity::{AuthError, AuthField, AuthProvider, FieldError, InMemoryAuthProvider, SessionId};
