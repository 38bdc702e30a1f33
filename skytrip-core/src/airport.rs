use serde::{Deserialize, Serialize};

/// Whether a suggestion points at a single airport or a whole city.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceType {
    Airport,
    City,
}

/// An airport (or city) suggestion as returned by the airport search API.
///
/// Kept in the provider's shape so it can be stored and replayed verbatim;
/// the accessors give the flattened view the booking flow needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Airport {
    pub sky_id: String,
    pub entity_id: String,
    pub presentation: Presentation,
    pub navigation: Navigation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub title: String,
    pub suggestion_title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub entity_id: String,
    pub entity_type: PlaceType,
    pub localized_name: String,
    pub relevant_flight_params: RelevantFlightParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_hotel_params: Option<RelevantHotelParams>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelevantFlightParams {
    pub sky_id: String,
    pub entity_id: String,
    pub flight_place_type: PlaceType,
    pub localized_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RelevantHotelParams {
    pub entity_id: String,
    pub entity_type: PlaceType,
    pub localized_name: String,
}

impl Airport {
    /// Label shown in suggestion lists, e.g. "London Heathrow (LHR)".
    pub fn display_name(&self) -> &str {
        &self.presentation.suggestion_title
    }

    pub fn subtitle(&self) -> &str {
        &self.presentation.subtitle
    }

    pub fn city(&self) -> &str {
        &self.navigation.localized_name
    }

    /// Both identifiers the flight search needs are present.
    pub fn is_searchable(&self) -> bool {
        !self.sky_id.is_empty() && !self.entity_id.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn airport(sky_id: &str, entity_id: &str, city: &str) -> Airport {
        Airport {
            sky_id: sky_id.to_string(),
            entity_id: entity_id.to_string(),
            presentation: Presentation {
                title: city.to_string(),
                suggestion_title: format!("{} ({})", city, sky_id),
                subtitle: "Country".to_string(),
            },
            navigation: Navigation {
                entity_id: entity_id.to_string(),
                entity_type: PlaceType::Airport,
                localized_name: city.to_string(),
                relevant_flight_params: RelevantFlightParams {
                    sky_id: sky_id.to_string(),
                    entity_id: entity_id.to_string(),
                    flight_place_type: PlaceType::Airport,
                    localized_name: city.to_string(),
                },
                relevant_hotel_params: None,
            },
        }
    }
}
