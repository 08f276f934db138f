//! Wire types for the Ola Maps Places API.

use serde::{Deserialize, Serialize};
use wayfind_core::Rating;

/// Envelope returned by `/places/v1/autocomplete`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    pub place_id: Option<String>,
    pub description: Option<String>,
}

/// Envelope returned by `/places/v1/details`.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailsResponse {
    #[serde(default)]
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailsResult {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub rating: Rating,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Envelope returned by `/places/v1/reverse-geocode`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReverseGeocodeResponse {
    #[serde(default)]
    pub results: Vec<ReverseGeocodeHit>,
}

/// The best reverse-geocoding match for a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseGeocodeHit {
    pub formatted_address: Option<String>,
    pub name: Option<String>,
    pub place_id: Option<String>,
}
