//! The public "search for a category near a point" operation.
//!
//! Order of work for one request:
//!
//! 1. Directory override. A museum or zoo query returns the curated table
//!    and the provider is never called.
//! 2. The query is classified once and refined for the provider.
//! 3. Primary pass: search, resolve details in reference order, then drop
//!    candidates without coordinates, failing the relevance filter, or
//!    outside the distance gate. Stops once the minimum count is accepted.
//! 4. Fallback passes, each only while the count is below the minimum,
//!    skipping ids already accepted. Each stops at the cap.
//! 5. Near-duplicate names are merged, first seen wins.

use std::collections::HashSet;
use std::time::Duration;

use futures::StreamExt;
use wayfind_core::{AppConfig, Candidate, CandidateStatus, GeoPoint};

use crate::category::QueryProfile;
use crate::dedup::deduplicate;
use crate::directory;
use crate::fallback::plan_fallbacks;
use crate::fetch::CandidateFetcher;
use crate::filter::RelevanceFilter;
use crate::gate::DistanceGate;
use crate::provider::{PlaceDetails, PlaceProvider, PlaceRef};
use crate::refine::refine_query;

/// Tunables for one [`Curator`].
#[derive(Debug, Clone, PartialEq)]
pub struct CurationConfig {
    pub dense_radius_km: f64,
    pub sparse_radius_km: f64,
    /// Names scoring strictly above this are merged.
    pub similarity_threshold: f64,
    /// Fallbacks run while fewer than this many candidates are accepted.
    pub min_results: usize,
    /// Fallback passes stop accepting at this total.
    pub max_results: usize,
    pub scan_window: usize,
    pub fallback_scan_window: usize,
    /// Deadline for each provider call, search or details.
    pub call_timeout: Duration,
    pub detail_concurrency: usize,
}

impl Default for CurationConfig {
    fn default() -> Self {
        Self {
            dense_radius_km: 7.0,
            sparse_radius_km: 30.0,
            similarity_threshold: 0.8,
            min_results: 3,
            max_results: 5,
            scan_window: 50,
            fallback_scan_window: 25,
            call_timeout: Duration::from_secs(10),
            detail_concurrency: 4,
        }
    }
}

impl CurationConfig {
    /// Takes the radii, threshold and concurrency from `config`. The call
    /// deadline covers every HTTP attempt the client may make.
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        let attempts = u64::from(config.places_max_retries) + 1;
        Self {
            dense_radius_km: config.dense_radius_km,
            sparse_radius_km: config.sparse_radius_km,
            similarity_threshold: config.similarity_threshold,
            call_timeout: Duration::from_secs(
                config.places_request_timeout_secs.saturating_mul(attempts),
            ),
            detail_concurrency: config.detail_concurrency,
            ..Self::default()
        }
    }
}

/// Runs the curation pipeline against a [`PlaceProvider`].
pub struct Curator<P> {
    provider: P,
    config: CurationConfig,
}

impl<P: PlaceProvider> Curator<P> {
    #[must_use]
    pub fn new(provider: P, config: CurationConfig) -> Self {
        Self { provider, config }
    }

    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Curated candidates for `query` near `origin`, each with a resolved
    /// distance. Provider failures degrade to a short or empty list.
    pub async fn curate(&self, query: &str, origin: GeoPoint) -> Vec<Candidate> {
        if let Some(curated) = directory::lookup(query, origin) {
            return curated;
        }

        let profile = QueryProfile::classify(query);
        let refined = refine_query(query);
        let pass = Pass {
            fetcher: CandidateFetcher::new(
                &self.provider,
                self.config.call_timeout,
                self.config.detail_concurrency,
            ),
            filter: RelevanceFilter::for_profile(&profile),
            gate: DistanceGate::for_profile(
                &profile,
                self.config.dense_radius_km,
                self.config.sparse_radius_km,
            ),
            origin,
        };
        tracing::debug!(
            query,
            category = ?profile.primary(),
            max_km = pass.gate.max_km(),
            "curating candidates"
        );

        let mut accepted = Vec::new();
        pass.sweep(
            &refined,
            self.config.scan_window,
            self.config.min_results,
            &mut accepted,
        )
        .await;

        for plan in plan_fallbacks(&profile, query) {
            if accepted.len() >= self.config.min_results {
                break;
            }
            tracing::info!(
                query,
                fallback = plan.kind.label(),
                term = %plan.term,
                found = accepted.len(),
                "running fallback search"
            );
            pass.sweep(
                &plan.term,
                self.config.fallback_scan_window,
                self.config.max_results,
                &mut accepted,
            )
            .await;
        }

        let curated = deduplicate(accepted, self.config.similarity_threshold);
        tracing::info!(query, count = curated.len(), "curation complete");
        curated
    }
}

/// Per-request pipeline state shared by the primary and fallback passes.
struct Pass<'a, P: PlaceProvider + ?Sized> {
    fetcher: CandidateFetcher<'a, P>,
    filter: RelevanceFilter,
    gate: DistanceGate,
    origin: GeoPoint,
}

impl<P: PlaceProvider + ?Sized> Pass<'_, P> {
    /// Searches `term` and appends admitted candidates to `accepted` until
    /// it holds `limit` entries. References already accepted are skipped
    /// before their details are fetched.
    async fn sweep(&self, term: &str, window: usize, limit: usize, accepted: &mut Vec<Candidate>) {
        if accepted.len() >= limit {
            return;
        }

        let known: HashSet<String> = accepted.iter().map(|c| c.provider_id.clone()).collect();
        let refs: Vec<PlaceRef> = self
            .fetcher
            .search(term, self.origin, window)
            .await
            .into_iter()
            .filter(|r| !known.contains(&r.place_id))
            .collect();

        let mut resolved = self.fetcher.resolve(refs);
        while let Some((place, details)) = resolved.next().await {
            let Some(details) = details else {
                continue;
            };
            if let Some(candidate) = self.admit(place, details) {
                accepted.push(candidate);
                if accepted.len() >= limit {
                    break;
                }
            }
        }
    }

    fn admit(&self, place: PlaceRef, details: PlaceDetails) -> Option<Candidate> {
        let Some(name) = details.name.or(place.description) else {
            tracing::debug!(place_id = %place.place_id, "rejected candidate without a name");
            return None;
        };
        let Some(location) = details.location else {
            tracing::debug!(name = %name, "rejected candidate without coordinates");
            return None;
        };
        if let Err(reason) = self.filter.check(&name) {
            tracing::debug!(name = %name, reason = %reason, "rejected candidate");
            return None;
        }
        let Some(distance_km) = self.gate.admit(self.origin, location) else {
            tracing::debug!(
                name = %name,
                max_km = self.gate.max_km(),
                "rejected candidate beyond distance gate"
            );
            return None;
        };

        Some(Candidate {
            name,
            address: details.formatted_address,
            location,
            provider_id: place.place_id,
            rating: details.rating,
            distance_km: Some(distance_km),
            status: CandidateStatus::Active,
        })
    }
}
