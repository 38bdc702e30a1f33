use serde::Serialize;
use std::sync::Arc;

use crate::layout::SeatLayout;
use crate::seat::{SeatId, SeatStatus};

/// Result of a tap on a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeatToggle {
    Selected,
    Deselected,
    /// Nothing changed: the seat is taken or blocked, or every traveler
    /// already has a seat.
    Rejected,
}

/// One rendered row of the seat map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatRow {
    pub row: u16,
    pub seats: Vec<(SeatId, SeatStatus)>,
}

/// Seat selection for one itinerary.
///
/// Holds at most one seat per traveler. Open a fresh map for each itinerary;
/// booking consumes it.
#[derive(Debug, Clone)]
pub struct SeatMap {
    layout: Arc<SeatLayout>,
    travelers: u32,
    selection: Vec<SeatId>,
}

impl SeatMap {
    pub fn new(layout: Arc<SeatLayout>, travelers: u32) -> Self {
        Self {
            layout,
            travelers: travelers.max(1),
            selection: Vec::new(),
        }
    }

    pub fn travelers(&self) -> u32 {
        self.travelers
    }

    pub fn layout(&self) -> &SeatLayout {
        &self.layout
    }

    /// Selected seats in the order they were picked.
    pub fn selection(&self) -> &[SeatId] {
        &self.selection
    }

    pub fn status_of(&self, seat: &SeatId) -> SeatStatus {
        if !self.layout.contains(seat) {
            return SeatStatus::Unavailable;
        }
        if self.layout.is_occupied(seat) {
            SeatStatus::Occupied
        } else if self.layout.is_unavailable(seat) {
            SeatStatus::Unavailable
        } else if self.selection.contains(seat) {
            SeatStatus::Selected
        } else {
            SeatStatus::Available
        }
    }

    pub fn toggle(&mut self, seat: SeatId) -> SeatToggle {
        let status = self.status_of(&seat);
        if !status.is_interactive() {
            tracing::debug!("Ignoring tap on seat {} ({:?})", seat, status);
            return SeatToggle::Rejected;
        }

        if status == SeatStatus::Selected {
            self.selection.retain(|s| *s != seat);
            SeatToggle::Deselected
        } else if (self.selection.len() as u32) < self.travelers {
            self.selection.push(seat);
            SeatToggle::Selected
        } else {
            tracing::debug!("Ignoring tap on seat {}: all {} traveler(s) seated", seat, self.travelers);
            SeatToggle::Rejected
        }
    }

    /// Every traveler has a seat; booking may proceed.
    pub fn is_complete(&self) -> bool {
        self.selection.len() as u32 == self.travelers
    }

    /// "1/2 selected"
    pub fn progress_label(&self) -> String {
        format!("{}/{} selected", self.selection.len(), self.travelers)
    }

    /// "3B, 3C", or "None" before anything is picked.
    pub fn selected_label(&self) -> String {
        if self.selection.is_empty() {
            return "None".to_string();
        }
        self.selection
            .iter()
            .map(|seat| seat.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn rows(&self) -> Vec<SeatRow> {
        (1..=self.layout.rows())
            .map(|row| SeatRow {
                row,
                seats: self
                    .layout
                    .columns()
                    .iter()
                    .filter_map(|&column| SeatId::new(row, column).ok())
                    .map(|seat| (seat, self.status_of(&seat)))
                    .collect(),
            })
            .collect()
    }

    pub fn into_selection(self) -> Vec<SeatId> {
        self.selection
    }
}
