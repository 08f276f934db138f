//! Relevance filtering for live search results.
//!
//! Discards directory duplicates, street-address fragments and names that
//! carry an excluded keyword. The exclusion set is a base list composed with
//! category overlays, evaluated once per request.

use crate::category::{CategoryClass, QueryProfile};
use crate::directory;

/// Location-infrastructure terms that are never venues.
const BASE_EXCLUSIONS: &[&str] = &[
    "parking",
    "metro",
    "ward",
    "road",
    "junction",
    "bus stop",
    "railway",
    "station",
    "atm",
    "toll",
    "post office",
];

/// Residential, commercial real-estate and logistics names that crowd out
/// real venues on sightseeing and cinema searches.
const ACTIVITY_EXCLUSIONS: &[&str] = &[
    "hotel",
    "inn",
    "residency",
    "packers",
    "movers",
    "travels",
    "lodge",
    "school",
    "college",
    "university",
    "academy",
    "class",
    "openhouse",
    "developers",
    "enclave",
    "apartment",
    "building",
    "tower",
    "mall",
    "shopping",
    "store",
    "outlet",
    "estate",
    "tech park",
    "industrial",
    "campus",
    "office",
    "corporate",
    "sez",
    "zone",
    "business park",
    "export",
    "infra",
    "infrastructure",
    "construction",
    "pvt ltd",
    "private limited",
    "limited",
    "shipping",
    "courier",
    "online",
    "logistics",
    "cargo",
    "freight",
    "import",
    "inc",
    "builders",
    "contractors",
    "event",
    "flingg",
    "decor",
    "planter",
    "cabinet",
    "furniture",
    "nursery",
];

const FOOD_SERVICE_EXCLUSIONS: &[&str] = &["cafe", "coffee", "tea", "restaurant", "food", "dining"];
const RETAIL_TERMS: &[&str] = &["mall", "shopping", "store", "outlet"];
const THEATER_EXCLUSIONS: &[&str] = &["maac", "animation", "education", "coaching"];
const BREWERY_EXCLUSIONS: &[&str] = &["coffee", "cafe", "tea"];
const GYM_EXCLUSIONS: &[&str] = &["school", "academy", "class"];
const RESTAURANT_EXCLUSIONS: &[&str] = &[
    "tyre",
    "wheel",
    "residency",
    "apartment",
    "lodge",
    "pg",
    "paying guest",
];

/// Street-address markers; a name carrying one is an address fragment.
const ADDRESS_MARKERS: &[&str] = &["near ", "opp ", "opposite "];

/// A category-conditional change to the exclusion set.
struct Overlay {
    applies: fn(&QueryProfile) -> bool,
    add: &'static [&'static str],
    remove: &'static [&'static str],
}

fn is_outing(profile: &QueryProfile) -> bool {
    profile.has(CategoryClass::Activity) || profile.has(CategoryClass::Theater)
}

const OVERLAYS: &[Overlay] = &[
    Overlay {
        applies: is_outing,
        add: ACTIVITY_EXCLUSIONS,
        remove: &[],
    },
    // A shopping trip must not exclude its own target category, and cafes
    // are noise there instead.
    Overlay {
        applies: |p| is_outing(p) && p.has(CategoryClass::Shopping),
        add: FOOD_SERVICE_EXCLUSIONS,
        remove: RETAIL_TERMS,
    },
    Overlay {
        applies: |p| p.has(CategoryClass::Theater),
        add: THEATER_EXCLUSIONS,
        remove: &[],
    },
    Overlay {
        applies: |p| p.has(CategoryClass::Brewery),
        add: BREWERY_EXCLUSIONS,
        remove: &[],
    },
    Overlay {
        applies: |p| p.has(CategoryClass::Gym),
        add: GYM_EXCLUSIONS,
        remove: &[],
    },
    Overlay {
        applies: |p| p.has(CategoryClass::Restaurant),
        add: RESTAURANT_EXCLUSIONS,
        remove: &[],
    },
];

/// The final keyword exclusion list for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSet {
    terms: Vec<&'static str>,
}

impl ExclusionSet {
    /// Composes the base list with every overlay that applies to `profile`.
    /// Removals are applied after all additions.
    #[must_use]
    pub fn for_profile(profile: &QueryProfile) -> Self {
        let active: Vec<&Overlay> = OVERLAYS.iter().filter(|o| (o.applies)(profile)).collect();

        let mut terms: Vec<&'static str> = BASE_EXCLUSIONS.to_vec();
        for overlay in &active {
            for term in overlay.add {
                if !terms.contains(term) {
                    terms.push(term);
                }
            }
        }
        for overlay in &active {
            terms.retain(|t| !overlay.remove.contains(t));
        }

        Self { terms }
    }

    /// First excluded term found as a substring of `name_lower`.
    #[must_use]
    pub fn first_match(&self, name_lower: &str) -> Option<&'static str> {
        self.terms.iter().copied().find(|t| name_lower.contains(t))
    }

    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(&term)
    }

    #[must_use]
    pub fn terms(&self) -> &[&'static str] {
        &self.terms
    }
}

/// Why a candidate was discarded by the relevance filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The name overlaps a curated directory entry.
    DirectoryCollision(String),
    /// The name looks like a street-address fragment.
    AddressMarker,
    /// The name contains an excluded keyword.
    Keyword(&'static str),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::DirectoryCollision(entry) => write!(f, "exists in directory as '{entry}'"),
            Rejection::AddressMarker => write!(f, "address marker"),
            Rejection::Keyword(term) => write!(f, "matched keyword '{term}'"),
        }
    }
}

/// Per-request relevance filter.
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    exclusions: ExclusionSet,
    directory_names: Vec<String>,
}

impl RelevanceFilter {
    #[must_use]
    pub fn for_profile(profile: &QueryProfile) -> Self {
        Self {
            exclusions: ExclusionSet::for_profile(profile),
            directory_names: directory::all_names_lowercase().collect(),
        }
    }

    #[must_use]
    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Checks a candidate name; the first failing rule wins.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] describing why the name is not a venue.
    pub fn check(&self, name: &str) -> Result<(), Rejection> {
        let lowered = name.to_lowercase();

        if let Some(entry) = self
            .directory_names
            .iter()
            .find(|dir| dir.contains(&lowered) || lowered.contains(dir.as_str()))
        {
            return Err(Rejection::DirectoryCollision(entry.clone()));
        }

        let starts_with_digit = lowered.chars().next().is_some_and(char::is_numeric);
        if starts_with_digit || ADDRESS_MARKERS.iter().any(|m| lowered.contains(m)) {
            return Err(Rejection::AddressMarker);
        }

        if let Some(term) = self.exclusions.first_match(&lowered) {
            return Err(Rejection::Keyword(term));
        }

        Ok(())
    }
}
