//! HTTP client for the Ola Maps Places API.
//!
//! Wraps `reqwest` with provider-specific status handling, API key
//! management and typed response deserialization. Requests are retried on
//! transient failures via [`crate::retry::retry_with_backoff`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use wayfind_core::GeoPoint;

use crate::error::PlacesError;
use crate::provider::{PlaceDetails, PlaceProvider, PlaceRef};
use crate::retry::retry_with_backoff;
use crate::types::{AutocompleteResponse, DetailsResponse, ReverseGeocodeHit, ReverseGeocodeResponse};

const DEFAULT_BASE_URL: &str = "https://api.olamaps.io/";
const AUTOCOMPLETE_PATH: &str = "places/v1/autocomplete";
const DETAILS_PATH: &str = "places/v1/details";
const REVERSE_GEOCODE_PATH: &str = "places/v1/reverse-geocode";

/// Client for the Ola Maps Places API.
///
/// Use [`OlaMapsClient::new`] for production or
/// [`OlaMapsClient::with_base_url`] to point at a mock server in tests.
pub struct OlaMapsClient {
    client: Client,
    api_key: String,
    base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay for exponential backoff, in milliseconds.
    backoff_base_ms: u64,
}

impl OlaMapsClient {
    /// Creates a client pointed at the production Ola Maps API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL, timeout_secs, user_agent)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// Retries are disabled until [`OlaMapsClient::with_retry_policy`] is applied.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        base_url: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so relative joins append to the path
        // instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Sets how many times transient failures are retried and the base
    /// back-off delay between attempts.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Calls the autocomplete endpoint for `term`, biased towards `near`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::RateLimited`]: HTTP 429 after all retries.
    /// - [`PlacesError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`PlacesError::Http`]: network or TLS failure after all retries.
    /// - [`PlacesError::Deserialize`]: body does not match the expected shape.
    pub async fn autocomplete(
        &self,
        term: &str,
        near: GeoPoint,
    ) -> Result<AutocompleteResponse, PlacesError> {
        let location = near.to_string();
        let url = self.endpoint(AUTOCOMPLETE_PATH, &[("input", term), ("location", &location)])?;
        self.get_json(url, &format!("autocomplete(input={term})"))
            .await
    }

    /// Calls the details endpoint for one place id.
    ///
    /// # Errors
    ///
    /// Same as [`OlaMapsClient::autocomplete`].
    pub async fn place_details(&self, place_id: &str) -> Result<DetailsResponse, PlacesError> {
        let url = self.endpoint(DETAILS_PATH, &[("place_id", place_id)])?;
        self.get_json(url, &format!("details(place_id={place_id})"))
            .await
    }

    /// Resolves a coordinate to its best matching address, or `None` when
    /// the provider has no result for it.
    ///
    /// # Errors
    ///
    /// Same as [`OlaMapsClient::autocomplete`].
    pub async fn reverse_geocode(
        &self,
        point: GeoPoint,
    ) -> Result<Option<ReverseGeocodeHit>, PlacesError> {
        let latlng = point.to_string();
        let url = self.endpoint(REVERSE_GEOCODE_PATH, &[("latlng", &latlng)])?;
        let response: ReverseGeocodeResponse = self
            .get_json(url, &format!("reverse-geocode(latlng={latlng})"))
            .await?;
        Ok(response.results.into_iter().next())
    }

    /// Builds the full request URL with percent-encoded query parameters
    /// and the API key appended last.
    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("api_key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request with retry, maps error statuses to typed errors,
    /// and deserializes the body.
    ///
    /// Errors never carry the query string, which holds the API key.
    async fn get_json<T: DeserializeOwned>(&self, url: Url, context: &str) -> Result<T, PlacesError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let path = url.path().to_owned();
                let response = self
                    .client
                    .get(url)
                    .header(reqwest::header::ACCEPT, "application/json")
                    .send()
                    .await
                    .map_err(|e| PlacesError::Http(e.without_url()))?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(1);
                    return Err(PlacesError::RateLimited { retry_after_secs });
                }

                if !status.is_success() {
                    return Err(PlacesError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: path,
                    });
                }

                let body = response
                    .text()
                    .await
                    .map_err(|e| PlacesError::Http(e.without_url()))?;
                serde_json::from_str::<T>(&body).map_err(|e| PlacesError::Deserialize {
                    context: context.to_owned(),
                    source: e,
                })
            }
        })
        .await
    }
}

#[async_trait]
impl PlaceProvider for OlaMapsClient {
    async fn search(&self, term: &str, near: GeoPoint) -> Result<Vec<PlaceRef>, PlacesError> {
        let response = self.autocomplete(term, near).await?;
        Ok(response
            .predictions
            .into_iter()
            .filter_map(|p| {
                let place_id = p.place_id.filter(|id| !id.trim().is_empty())?;
                Some(PlaceRef {
                    place_id,
                    description: p.description,
                })
            })
            .collect())
    }

    async fn details(&self, place: &PlaceRef) -> Result<PlaceDetails, PlacesError> {
        let response = self.place_details(&place.place_id).await?;
        let Some(result) = response.result else {
            return Ok(PlaceDetails::default());
        };

        let location = result
            .geometry
            .and_then(|g| g.location)
            .and_then(|loc| Some(GeoPoint::new(loc.lat?, loc.lng?)));

        Ok(PlaceDetails {
            name: result.name.filter(|n| !n.trim().is_empty()),
            formatted_address: result.formatted_address.filter(|a| !a.trim().is_empty()),
            location,
            rating: result.rating,
        })
    }
}
