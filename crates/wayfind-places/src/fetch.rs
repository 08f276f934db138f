//! The I/O edge of curation: bounded, timed provider calls that never fail
//! the batch.

use std::collections::HashSet;
use std::time::Duration;

use futures::stream::{self, BoxStream, StreamExt};
use wayfind_core::GeoPoint;

use crate::error::PlacesError;
use crate::provider::{PlaceDetails, PlaceProvider, PlaceRef};

pub struct CandidateFetcher<'a, P: PlaceProvider + ?Sized> {
    provider: &'a P,
    call_timeout: Duration,
    concurrency: usize,
}

impl<'a, P: PlaceProvider + ?Sized> CandidateFetcher<'a, P> {
    #[must_use]
    pub fn new(provider: &'a P, call_timeout: Duration, concurrency: usize) -> Self {
        Self {
            provider,
            call_timeout,
            concurrency: concurrency.max(1),
        }
    }

    /// First `window` distinct references for `term`. A failed or timed-out
    /// search yields an empty list.
    pub async fn search(&self, term: &str, origin: GeoPoint, window: usize) -> Vec<PlaceRef> {
        let outcome = tokio::time::timeout(self.call_timeout, self.provider.search(term, origin))
            .await
            .unwrap_or_else(|_| {
                Err(PlacesError::Timeout {
                    context: format!("search(term={term})"),
                })
            });

        let refs = match outcome {
            Ok(refs) => refs,
            Err(e) => {
                tracing::warn!(term, error = %e, "place search failed");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        refs.into_iter()
            .filter(|r| seen.insert(r.place_id.clone()))
            .take(window)
            .collect()
    }

    /// Resolves `refs` with up to `concurrency` calls in flight, yielding
    /// results in reference order. Dropping the stream stops further calls.
    pub fn resolve(&self, refs: Vec<PlaceRef>) -> BoxStream<'_, (PlaceRef, Option<PlaceDetails>)> {
        let provider: &P = self.provider;
        let call_timeout = self.call_timeout;
        stream::iter(refs)
            .map(move |place| async move {
                let details = fetch_details(provider, call_timeout, &place).await;
                (place, details)
            })
            .buffered(self.concurrency)
            .boxed()
    }
}

async fn fetch_details<P: PlaceProvider + ?Sized>(
    provider: &P,
    call_timeout: Duration,
    place: &PlaceRef,
) -> Option<PlaceDetails> {
    let outcome = tokio::time::timeout(call_timeout, provider.details(place))
        .await
        .unwrap_or_else(|_| {
            Err(PlacesError::Timeout {
                context: format!("details(place_id={})", place.place_id),
            })
        });

    match outcome {
        Ok(details) => Some(details),
        Err(e) => {
            tracing::warn!(
                place_id = %place.place_id,
                error = %e,
                "skipping candidate after detail fetch failure"
            );
            None
        }
    }
}
