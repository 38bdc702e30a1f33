use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::SeatMapError;

/// A seat position: row number plus column letter, written "12C".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SeatId {
    row: u16,
    column: char,
}

impl SeatId {
    pub fn new(row: u16, column: char) -> Result<Self, SeatMapError> {
        let column = column.to_ascii_uppercase();
        if row == 0 || !column.is_ascii_uppercase() {
            return Err(SeatMapError::InvalidSeat(format!("{}{}", row, column)));
        }
        Ok(Self { row, column })
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    pub fn column(&self) -> char {
        self.column
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

impl FromStr for SeatId {
    type Err = SeatMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SeatMapError::InvalidSeat(s.to_string());
        let s = s.trim();
        let mut chars = s.chars();
        let column = chars.next_back().ok_or_else(invalid)?;
        let row: u16 = chars.as_str().parse().map_err(|_| invalid())?;
        Self::new(row, column).map_err(|_| invalid())
    }
}

impl TryFrom<String> for SeatId {
    type Error = SeatMapError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SeatId> for String {
    fn from(seat: SeatId) -> Self {
        seat.to_string()
    }
}

/// Display state of a seat. Precedence when several apply:
/// occupied, then unavailable, then selected, then available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    Available,
    Occupied,
    Unavailable,
    Selected,
}

impl SeatStatus {
    /// Occupied and unavailable seats are shown disabled.
    pub fn is_interactive(&self) -> bool {
        matches!(self, SeatStatus::Available | SeatStatus::Selected)
    }
}
