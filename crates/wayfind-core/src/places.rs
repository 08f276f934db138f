//! Place candidate values shared by the curation pipeline and its consumers.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Provider rating for a place. Serializes as a number, or the string
/// `"N/A"` when the provider had nothing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Rating {
    Score(f64),
    #[default]
    NotAvailable,
}

impl Rating {
    /// Interprets free-form provider text. Anything that is not a finite
    /// number becomes [`Rating::NotAvailable`].
    #[must_use]
    pub fn from_text(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map_or(Rating::NotAvailable, Rating::Score)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Score(v) => write!(f, "{v}"),
            Rating::NotAvailable => write!(f, "N/A"),
        }
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(v) => serializer.serialize_f64(*v),
            Rating::NotAvailable => serializer.serialize_str("N/A"),
        }
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawRating {
            Number(f64),
            Text(String),
        }

        Ok(match Option::<RawRating>::deserialize(deserializer)? {
            Some(RawRating::Number(v)) if v.is_finite() => Rating::Score(v),
            Some(RawRating::Text(text)) => Rating::from_text(&text),
            _ => Rating::NotAvailable,
        })
    }
}

/// Lifecycle state of a candidate. Only `Active` exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CandidateStatus {
    #[default]
    Active,
}

/// A place under consideration for recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub address: Option<String>,
    pub location: GeoPoint,
    /// Stable identity from the source provider, unique within one fetch batch.
    pub provider_id: String,
    pub rating: Rating,
    /// Great-circle distance from the search origin, once gated.
    pub distance_km: Option<f64>,
    pub status: CandidateStatus,
}

impl Candidate {
    /// Human-readable distance, e.g. `"3.4 km"`, or `"N/A"` when unknown.
    #[must_use]
    pub fn distance_label(&self) -> String {
        self.distance_km
            .map_or_else(|| "N/A".to_string(), |km| format!("{km:.1} km"))
    }
}
