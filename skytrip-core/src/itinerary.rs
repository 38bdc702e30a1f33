use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One priced flight option as returned by the flight search API.
///
/// Treated as an opaque value: the typed fields cover what the booking flow
/// reads, everything else the provider sends is carried in `extra` so the
/// record round-trips unchanged. Only `id` takes part in deduplication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub raw: f64,
    pub formatted: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub origin: Place,
    #[serde(default)]
    pub destination: Place,
    #[serde(default)]
    pub duration_in_minutes: u32,
    #[serde(default)]
    pub stop_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<NaiveDateTime>,
    #[serde(default)]
    pub carriers: Carriers,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Carriers {
    #[serde(default)]
    pub marketing: Vec<Carrier>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Carrier {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single flight inside a leg; legs with stops have several.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub origin: Place,
    #[serde(default)]
    pub destination: Place,
    #[serde(default)]
    pub flight_number: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Itinerary {
    /// The outbound leg, which is what result cards display.
    pub fn first_leg(&self) -> Option<&Leg> {
        self.legs.first()
    }

    /// Provider-formatted price such as "₹5,421".
    pub fn price_label(&self) -> Option<&str> {
        self.price.as_ref().map(|price| price.formatted.as_str())
    }

    pub fn is_cheapest(&self) -> bool {
        self.tags.iter().any(|tag| tag == "cheapest")
    }
}

impl Leg {
    /// "2h 5m"
    pub fn duration_label(&self) -> String {
        format!("{}h {}m", self.duration_in_minutes / 60, self.duration_in_minutes % 60)
    }

    pub fn stop_label(&self) -> String {
        match self.stop_count {
            0 => "Non-stop".to_string(),
            1 => "1 stop".to_string(),
            n => format!("{} stops", n),
        }
    }

    pub fn primary_carrier(&self) -> Option<&Carrier> {
        self.carriers.marketing.first()
    }

    /// Name of the first intermediate stop, if the leg has one.
    pub fn via(&self) -> Option<&str> {
        if self.stop_count == 0 {
            return None;
        }
        self.segments.first().map(|segment| segment.destination.name.as_str())
    }

    /// 24-hour "HH:MM" for departure and arrival, when the provider sent them.
    pub fn departure_time_label(&self) -> Option<String> {
        self.departure.map(|at| at.format("%H:%M").to_string())
    }

    pub fn arrival_time_label(&self) -> Option<String> {
        self.arrival.map(|at| at.format("%H:%M").to_string())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use serde_json::json;

    pub fn itinerary(id: &str) -> Itinerary {
        serde_json::from_value(json!({
            "id": id,
            "price": { "raw": 5421.0, "formatted": "₹5,421" },
            "legs": [{
                "id": format!("{}-leg", id),
                "origin": { "id": "BOM", "name": "Mumbai", "displayCode": "BOM", "city": "Mumbai" },
                "destination": { "id": "DEL", "name": "Indira Gandhi International", "displayCode": "DEL", "city": "New Delhi" },
                "durationInMinutes": 125,
                "stopCount": 0,
                "departure": "2024-10-18T06:10:00",
                "arrival": "2024-10-18T08:15:00",
                "carriers": { "marketing": [{ "id": -32213, "name": "IndiGo", "logoUrl": "https://logos.example/6E.png" }] },
                "segments": []
            }],
            "tags": ["cheapest"]
        }))
        .expect("fixture itinerary")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_survive_round_trip() {
        let raw = json!({
            "id": "13554-2410180610--32213-0-10957-2410180815",
            "price": { "raw": 5421.0, "formatted": "₹5,421", "pricingOptionId": "abc" },
            "legs": [],
            "isSelfTransfer": false,
            "farePolicy": { "isChangeAllowed": false }
        });
        let itinerary: Itinerary = serde_json::from_value(raw.clone()).unwrap();
        assert!(itinerary.tags.is_empty());
        assert_eq!(itinerary.extra["farePolicy"]["isChangeAllowed"], json!(false));

        let back = serde_json::to_value(&itinerary).unwrap();
        assert_eq!(back["price"]["pricingOptionId"], json!("abc"));
        assert_eq!(back["isSelfTransfer"], json!(false));
    }

    #[test]
    fn test_leg_labels() {
        let itinerary = fixtures::itinerary("x");
        let leg = itinerary.first_leg().unwrap();
        assert_eq!(leg.duration_label(), "2h 5m");
        assert_eq!(leg.stop_label(), "Non-stop");
        assert_eq!(leg.departure_time_label().as_deref(), Some("06:10"));
        assert_eq!(leg.arrival_time_label().as_deref(), Some("08:15"));
        assert_eq!(itinerary.price_label(), Some("₹5,421"));
        assert_eq!(leg.primary_carrier().unwrap().name, "IndiGo");
        assert_eq!(leg.via(), None);
        assert!(itinerary.is_cheapest());
    }

    #[test]
    fn test_only_id_is_required() {
        let itineraries: Vec<Itinerary> = serde_json::from_str(r#"[{"id":"x"},{"id":"y"}]"#).unwrap();
        assert_eq!(itineraries.len(), 2);
        assert_eq!(itineraries[0].id, "x");
        assert_eq!(itineraries[0].price_label(), None);
        assert!(itineraries[0].first_leg().is_none());

        let back = serde_json::to_value(&itineraries[1]).unwrap();
        assert_eq!(back["id"], json!("y"));
        assert!(back.get("price").is_none());
    }

    #[test]
    fn test_partial_leg_still_decodes() {
        let itinerary: Itinerary = serde_json::from_value(json!({
            "id": "x",
            "legs": [{ "id": "leg", "stopCount": 1 }]
        }))
        .unwrap();
        let leg = itinerary.first_leg().unwrap();
        assert_eq!(leg.stop_label(), "1 stop");
        assert_eq!(leg.duration_label(), "0h 0m");
        assert_eq!(leg.departure_time_label(), None);
        assert!(leg.primary_carrier().is_none());
        assert_eq!(leg.via(), None);
    }

    #[test]
    fn test_via_uses_first_segment_destination() {
        let mut itinerary = fixtures::itinerary("x");
        let leg = &mut itinerary.legs[0];
        leg.stop_count = 2;
        leg.segments = vec![Segment {
            id: "s1".to_string(),
            origin: Place { name: "Mumbai".to_string(), ..Place::default() },
            destination: Place { name: "Ahmedabad".to_string(), ..Place::default() },
            flight_number: "6E 123".to_string(),
            extra: Map::new(),
        }];
        assert_eq!(leg.stop_label(), "2 stops");
        assert_eq!(leg.via(), Some("Ahmedabad"));
    }
}
