//! Hand-curated place directory for categories whose live search is sparse
//! or noisy.
//!
//! When a query names one of these categories the directory is
//! authoritative: the pipeline returns its entries sorted by distance and
//! never touches the search provider.

use wayfind_core::{Candidate, CandidateStatus, GeoPoint, Rating};

use crate::geo::haversine_km;

/// Rating assigned to every directory entry.
const DIRECTORY_RATING: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryCategory {
    Museum,
    Zoo,
}

impl DirectoryCategory {
    /// Detects a directory category by plain substring on the lower-cased
    /// query. Museum wins when both are present.
    #[must_use]
    pub fn detect(query: &str) -> Option<Self> {
        let lowered = query.to_lowercase();
        if lowered.contains("museum") {
            Some(Self::Museum)
        } else if lowered.contains("zoo") {
            Some(Self::Zoo)
        } else {
            None
        }
    }

    #[must_use]
    pub fn entries(self) -> &'static [DirectoryEntry] {
        match self {
            Self::Museum => MUSEUMS,
            Self::Zoo => ZOOS,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Museum => "museum",
            Self::Zoo => "zoo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectoryEntry {
    pub name: &'static str,
    pub address: &'static str,
    pub location: GeoPoint,
}

impl DirectoryEntry {
    /// Synthetic provider id, stable for a given name.
    #[must_use]
    pub fn provider_id(&self) -> String {
        format!("dir_{}", self.name.replace(' ', "_"))
    }

    fn to_candidate(self, origin: GeoPoint) -> Candidate {
        Candidate {
            name: self.name.to_owned(),
            address: Some(self.address.to_owned()),
            location: self.location,
            provider_id: self.provider_id(),
            rating: Rating::Score(DIRECTORY_RATING),
            distance_km: Some(haversine_km(origin, self.location)),
            status: CandidateStatus::Active,
        }
    }
}

const MUSEUMS: &[DirectoryEntry] = &[
    DirectoryEntry {
        name: "Visvesvaraya Industrial and Technological Museum",
        address: "Kasturba Rd, Ambedkar Veedhi, Bengaluru, Karnataka 560001",
        location: GeoPoint::new(12.975_3, 77.596_3),
    },
    DirectoryEntry {
        name: "Government Museum",
        address: "Kasturba Rd, Ambedkar Veedhi, Bengaluru, Karnataka 560001",
        location: GeoPoint::new(12.976_7, 77.595_8),
    },
    DirectoryEntry {
        name: "HAL Heritage Centre and Aerospace Museum",
        address: "HAL Old Airport Rd, Marathahalli, Bengaluru, Karnataka 560037",
        location: GeoPoint::new(12.953_2, 77.681_6),
    },
    DirectoryEntry {
        name: "Jawaharlal Nehru Planetarium",
        address: "Sri T, Sankey Rd, High Grounds, Bengaluru, Karnataka 560001",
        location: GeoPoint::new(12.984_9, 77.589_6),
    },
    DirectoryEntry {
        name: "Indian Music Experience Museum",
        address: "JP Nagar 7th Phase, Bengaluru, Karnataka 560078",
        location: GeoPoint::new(12.891_4, 77.586_1),
    },
    DirectoryEntry {
        name: "Brain Museum",
        address: "NIMHANS, Hosur Road, Bengaluru, Karnataka 560029",
        location: GeoPoint::new(12.934_4, 77.593_3),
    },
];

const ZOOS: &[DirectoryEntry] = &[DirectoryEntry {
    name: "Bannerghatta Biological Park",
    address: "Bannerghatta Rd, Bengaluru, Karnataka 560083",
    location: GeoPoint::new(12.800_9, 77.577_7),
}];

/// Returns the curated candidates for `query`, nearest first, or `None`
/// when the query is not a directory category.
#[must_use]
pub fn lookup(query: &str, origin: GeoPoint) -> Option<Vec<Candidate>> {
    let category = DirectoryCategory::detect(query)?;
    tracing::info!(category = category.label(), "using curated directory");

    let mut candidates: Vec<Candidate> = category
        .entries()
        .iter()
        .map(|entry| entry.to_candidate(origin))
        .collect();
    candidates.sort_by(|a, b| {
        a.distance_km
            .unwrap_or(f64::INFINITY)
            .total_cmp(&b.distance_km.unwrap_or(f64::INFINITY))
    });
    Some(candidates)
}

/// Lower-cased names of every directory entry across all categories.
pub(crate) fn all_names_lowercase() -> impl Iterator<Item = String> {
    MUSEUMS
        .iter()
        .chain(ZOOS.iter())
        .map(|entry| entry.name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBBON_PARK: GeoPoint = GeoPoint::new(12.976_3, 77.592_9);

    #[test]
    fn detect_uses_substring_match() {
        assert_eq!(
            DirectoryCategory::detect("Museums near me"),
            Some(DirectoryCategory::Museum)
        );
        assert_eq!(
            DirectoryCategory::detect("petting ZOO"),
            Some(DirectoryCategory::Zoo)
        );
        assert_eq!(DirectoryCategory::detect("Italian restaurant"), None);
    }

    #[test]
    fn museum_wins_over_zoo() {
        assert_eq!(
            DirectoryCategory::detect("zoo or museum"),
            Some(DirectoryCategory::Museum)
        );
    }

    #[test]
    fn lookup_returns_every_entry_sorted_by_distance() {
        let results = lookup("Museum near me", CUBBON_PARK).unwrap();
        assert_eq!(results.len(), MUSEUMS.len());
        let distances: Vec<f64> = results.iter().map(|c| c.distance_km.unwrap()).collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]), "{distances:?}");
        assert_eq!(results[0].name, "Government Museum");
    }

    #[test]
    fn lookup_annotates_synthetic_fields() {
        let results = lookup("zoo", CUBBON_PARK).unwrap();
        assert_eq!(results.len(), 1);
        let zoo = &results[0];
        assert_eq!(zoo.provider_id, "dir_Bannerghatta_Biological_Park");
        assert_eq!(zoo.rating, Rating::Score(4.5));
        assert_eq!(zoo.status, CandidateStatus::Active);
        assert!(zoo.distance_km.unwrap() > 15.0);
    }

    #[test]
    fn lookup_ignores_other_categories() {
        assert!(lookup("brewery", CUBBON_PARK).is_none());
    }
}
