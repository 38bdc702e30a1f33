use serde::{Deserialize, Serialize};
use skytrip_core::Itinerary;
use std::collections::HashSet;

/// Itineraries the user has booked, newest first, one entry per itinerary id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedItineraries {
    items: Vec<Itinerary>,
}

impl SavedItineraries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Itinerary> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Insert at the front unless an itinerary with the same id is already saved.
    pub fn add(&mut self, itinerary: Itinerary) -> bool {
        if self.contains(&itinerary.id) {
            return false;
        }
        self.items.insert(0, itinerary);
        true
    }

    /// Merge a batch. New itineraries keep their input order and go ahead of
    /// everything saved before; ids already present (or repeated within the
    /// batch) are skipped. Returns how many were inserted.
    pub fn add_many(&mut self, itineraries: impl IntoIterator<Item = Itinerary>) -> usize {
        let mut seen: HashSet<String> = self.items.iter().map(|item| item.id.clone()).collect();
        let batch: Vec<Itinerary> = itineraries
            .into_iter()
            .filter(|itinerary| seen.insert(itinerary.id.clone()))
            .collect();

        let inserted = batch.len();
        self.items.splice(0..0, batch);
        inserted
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Itinerary> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Itinerary] {
        &self.items
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::json;
    use skytrip_core::Itinerary;

    pub fn itinerary(id: &str) -> Itinerary {
        serde_json::from_value(json!({
            "id": id,
            "price": { "raw": 100.0, "formatted": "₹100" },
            "legs": []
        }))
        .expect("fixture itinerary")
    }
}
