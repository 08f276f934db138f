//! Query classification.
//!
//! A query is classified once per request into the set of category
//! families it signals. The relevance filter, distance gate and fallback
//! planner all read that profile instead of re-testing keywords.

/// A category family a query can signal. A query may signal several
/// (`"park and brewery"` is both [`CategoryClass::Park`] and
/// [`CategoryClass::Brewery`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryClass {
    /// Nothing specific; only the base exclusions apply.
    Generic,
    /// Venue types with few true instances, searched over a wide radius.
    SparseLandmark,
    Park,
    Shopping,
    Theater,
    Brewery,
    Gym,
    Restaurant,
    /// Sightseeing-style outings (parks, attractions, shopping trips).
    Activity,
}

const SPARSE_TERMS: &[&str] = &[
    "museum",
    "zoo",
    "amusement park",
    "stadium",
    "airport",
    "theme park",
];

const ACTIVITY_TERMS: &[&str] = &[
    "park",
    "activity",
    "activities",
    "tourist",
    "sightseeing",
    "attraction",
    "place",
    "shopping",
    "mall",
    "market",
];

const SHOPPING_TERMS: &[&str] = &["shopping", "mall", "market"];
const THEATER_TERMS: &[&str] = &["theater", "theatre", "movie", "cinema"];
const RESTAURANT_TERMS: &[&str] = &["restaurant", "cafe"];

/// The classification of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryProfile {
    lowered: String,
    classes: Vec<CategoryClass>,
}

impl QueryProfile {
    /// Classifies `query` by case-insensitive substring tests.
    #[must_use]
    pub fn classify(query: &str) -> Self {
        let lowered = query.to_lowercase();
        let any = |terms: &[&str]| terms.iter().any(|t| lowered.contains(t));

        let mut classes = Vec::new();
        if any(SPARSE_TERMS) {
            classes.push(CategoryClass::SparseLandmark);
        }
        if lowered.contains("park") {
            classes.push(CategoryClass::Park);
        }
        if any(SHOPPING_TERMS) {
            classes.push(CategoryClass::Shopping);
        }
        if any(THEATER_TERMS) {
            classes.push(CategoryClass::Theater);
        }
        if lowered.contains("brewery") {
            classes.push(CategoryClass::Brewery);
        }
        if lowered.contains("gym") {
            classes.push(CategoryClass::Gym);
        }
        if any(RESTAURANT_TERMS) {
            classes.push(CategoryClass::Restaurant);
        }
        if any(ACTIVITY_TERMS) {
            classes.push(CategoryClass::Activity);
        }

        Self { lowered, classes }
    }

    #[must_use]
    pub fn has(&self, class: CategoryClass) -> bool {
        match class {
            CategoryClass::Generic => self.classes.is_empty(),
            other => self.classes.contains(&other),
        }
    }

    /// The most specific class, used for logging.
    #[must_use]
    pub fn primary(&self) -> CategoryClass {
        self.classes
            .first()
            .copied()
            .unwrap_or(CategoryClass::Generic)
    }

    #[must_use]
    pub fn is_sparse(&self) -> bool {
        self.has(CategoryClass::SparseLandmark)
    }

    /// The lower-cased query the profile was built from.
    #[must_use]
    pub fn lowered(&self) -> &str {
        &self.lowered
    }
}
