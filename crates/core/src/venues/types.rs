use serde::{Deserialize, Serialize};

/// A venue as returned by a nearby search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Full details for a single venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueDetails {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_missing_optional_fields() {
        let venue: Venue = serde_json::from_str(
            r#"{"id":"a","name":"Mercado del Puerto","latitude":-34.9,"longitude":-56.2}"#,
        )
        .unwrap();
        assert_eq!(venue.address, None);
        assert!(venue.categories.is_empty());
    }

    #[test]
    fn test_details_flatten_venue_fields() {
        let details: VenueDetails = serde_json::from_str(
            r#"{"id":"a","name":"Teatro Solís","latitude":-34.9,"longitude":-56.2,"rating":9.1}"#,
        )
        .unwrap();
        assert_eq!(details.venue.name, "Teatro Solís");
        assert_eq!(details.rating, Some(9.1));

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["id"], "a");
        assert!(json.get("description").is_none());
    }
}
