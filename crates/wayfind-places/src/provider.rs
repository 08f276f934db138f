//! The search provider seam.
//!
//! The curation pipeline only ever talks to a [`PlaceProvider`]. The
//! production implementation is [`crate::OlaMapsClient`]; tests substitute a
//! scripted in-memory provider.

use async_trait::async_trait;
use wayfind_core::{GeoPoint, Rating};

use crate::error::PlacesError;

/// An opaque search hit that still has to be resolved to full details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRef {
    pub place_id: String,
    /// Provider-supplied label, used as the name when details omit one.
    pub description: Option<String>,
}

/// Full details for one [`PlaceRef`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub location: Option<GeoPoint>,
    pub rating: Rating,
}

#[async_trait]
pub trait PlaceProvider: Send + Sync {
    /// Returns the provider's first page of references for `term` near `near`.
    async fn search(&self, term: &str, near: GeoPoint) -> Result<Vec<PlaceRef>, PlacesError>;

    /// Resolves one reference to its details.
    async fn details(&self, place: &PlaceRef) -> Result<PlaceDetails, PlacesError>;
}
