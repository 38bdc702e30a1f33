use std::collections::BTreeSet;

use crate::seat::SeatId;
use crate::SeatMapError;

/// Cabin geometry plus the seats that can never be picked.
///
/// Occupied and unavailable seats are fixed for the lifetime of the layout;
/// one layout is shared by every seat map opened for the same aircraft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatLayout {
    rows: u16,
    columns: Vec<char>,
    occupied: BTreeSet<SeatId>,
    unavailable: BTreeSet<SeatId>,
}

pub const STANDARD_ROWS: u16 = 29;
pub const STANDARD_COLUMNS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

const STANDARD_OCCUPIED: &[&str] = &[
    "1A", "1B", "3C", "4D", "5E", "7B", "9A", "12C", "15D", "16E", "17F", "19B", "22D", "26A",
    "27C", "28E", "29F",
];

// 16E is occupied, so it is not repeated here.
const STANDARD_UNAVAILABLE: &[&str] = &[
    "16A", "16B", "16C", "16D", "16F", "17A", "17B", "17C", "17D", "17E", "19A", "19C", "19D",
    "19E", "19F", "22A", "22B", "22C", "22E", "22F", "26B", "26C", "26D", "26E", "26F", "27A",
    "27B", "27D", "27E", "27F",
];

impl SeatLayout {
    pub fn new(
        rows: u16,
        columns: Vec<char>,
        occupied: BTreeSet<SeatId>,
        unavailable: BTreeSet<SeatId>,
    ) -> Result<Self, SeatMapError> {
        let columns: Vec<char> = columns.into_iter().map(|c| c.to_ascii_uppercase()).collect();
        if rows == 0 || columns.is_empty() {
            return Err(SeatMapError::EmptyLayout);
        }

        let layout = Self {
            rows,
            columns,
            occupied: BTreeSet::new(),
            unavailable: BTreeSet::new(),
        };

        for seat in occupied.iter().chain(unavailable.iter()) {
            if !layout.contains(seat) {
                return Err(SeatMapError::OutsideLayout(seat.to_string()));
            }
        }
        if let Some(seat) = occupied.intersection(&unavailable).next() {
            return Err(SeatMapError::OverlappingStatus(seat.to_string()));
        }

        Ok(Self {
            occupied,
            unavailable,
            ..layout
        })
    }

    /// Build a layout from seat labels such as "12C", as found in configuration.
    pub fn from_labels<S: AsRef<str>>(
        rows: u16,
        columns: &str,
        occupied: &[S],
        unavailable: &[S],
    ) -> Result<Self, SeatMapError> {
        Self::new(
            rows,
            columns.chars().filter(|c| !c.is_whitespace()).collect(),
            parse_labels(occupied)?,
            parse_labels(unavailable)?,
        )
    }

    /// The 29-row, six-abreast cabin used when no layout is configured.
    pub fn standard() -> Self {
        let to_set = |labels: &[&str]| -> BTreeSet<SeatId> {
            labels.iter().filter_map(|label| label.parse().ok()).collect()
        };
        Self {
            rows: STANDARD_ROWS,
            columns: STANDARD_COLUMNS.to_vec(),
            occupied: to_set(STANDARD_OCCUPIED),
            unavailable: to_set(STANDARD_UNAVAILABLE),
        }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn columns(&self) -> &[char] {
        &self.columns
    }

    pub fn seat_count(&self) -> usize {
        self.rows as usize * self.columns.len()
    }

    pub fn contains(&self, seat: &SeatId) -> bool {
        seat.row() <= self.rows && self.columns.contains(&seat.column())
    }

    pub fn is_occupied(&self, seat: &SeatId) -> bool {
        self.occupied.contains(seat)
    }

    pub fn is_unavailable(&self, seat: &SeatId) -> bool {
        self.unavailable.contains(seat)
    }

    /// Every seat in row-major order.
    pub fn seats(&self) -> impl Iterator<Item = SeatId> + '_ {
        (1..=self.rows).flat_map(move |row| {
            self.columns
                .iter()
                .filter_map(move |&column| SeatId::new(row, column).ok())
        })
    }
}

impl Default for SeatLayout {
    fn default() -> Self {
        Self::standard()
    }
}

fn parse_labels<S: AsRef<str>>(labels: &[S]) -> Result<BTreeSet<SeatId>, SeatMapError> {
    labels.iter().map(|label| label.as_ref().parse()).collect()
}
