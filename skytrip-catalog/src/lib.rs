pub mod seat;
pub mod layout;
pub mod seat_map;

pub use seat::{SeatId, SeatStatus};
pub use layout::SeatLayout;
pub use seat_map::{SeatMap, SeatRow, SeatToggle};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeatMapError {
    #[error("Invalid seat label: {0}")]
    InvalidSeat(String),

    #[error("Seat {0} is outside the cabin layout")]
    OutsideLayout(String),

    #[error("Seat {0} is listed as both occupied and unavailable")]
    OverlappingStatus(String),

    #[error("Cabin layout must have at least one row and one column")]
    EmptyLayout,
}
