pub mod saved;
pub mod booking;
pub mod session;

pub use saved::SavedItineraries;
pub use booking::{Booking, BookingDesk, BookingError};
pub use session::SessionState;
