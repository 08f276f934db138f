//! Near-duplicate name merging.
//!
//! Two names are duplicates when one contains the other (case-insensitive)
//! or their gestalt similarity ratio exceeds the threshold. The ratio is
//! Ratcliff/Obershelp: twice the matched characters over the total length,
//! where matches are found by recursively taking the longest common block.

use wayfind_core::Candidate;

/// Symmetric similarity of two strings in `[0, 1]`.
///
/// The longest-block search is order-sensitive on ties, so the ratio is
/// taken in both directions and the larger one wins.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    gestalt_ratio(&a, &b).max(gestalt_ratio(&b, &a))
}

#[allow(clippy::cast_precision_loss)]
fn gestalt_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(a, b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

/// Earliest longest common contiguous run: `(start_in_a, start_in_b, len)`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        let mut row = vec![0usize; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            if ca == cb {
                let run = prev[j] + 1;
                row[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            }
        }
        prev = row;
    }
    best
}

/// Whether two venue names refer to the same place.
#[must_use]
pub fn is_duplicate(a: &str, b: &str, threshold: f64) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a) || similarity(&a, &b) > threshold
}

/// Greedy first-seen-wins merge, preserving arrival order.
#[must_use]
pub fn deduplicate(candidates: Vec<Candidate>, threshold: f64) -> Vec<Candidate> {
    let mut unique: Vec<Candidate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if let Some(kept) = unique
            .iter()
            .find(|kept| is_duplicate(&kept.name, &candidate.name, threshold))
        {
            tracing::debug!(
                dropped = %candidate.name,
                kept = %kept.name,
                "merged duplicate candidate"
            );
            continue;
        }
        unique.push(candidate);
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_core::{CandidateStatus, GeoPoint, Rating};

    fn candidate(name: &str) -> Candidate {
        Candidate {
            name: name.to_owned(),
            address: None,
            location: GeoPoint::new(12.97, 77.59),
            provider_id: format!("id-{name}"),
            rating: Rating::NotAvailable,
            distance_km: Some(1.0),
            status: CandidateStatus::Active,
        }
    }

    #[test]
    fn identical_strings_score_one() {
        assert!((similarity("toit", "toit") - 1.0).abs() < f64::EPSILON);
        assert!((similarity("", "") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert!(similarity("abc", "xyz").abs() < f64::EPSILON);
    }

    #[test]
    fn known_ratio() {
        // Matching blocks "ab" and "d": 2 * 3 / 8.
        assert!((similarity("abcd", "abxd") - 0.75).abs() < 1e-9);
    }

    #[test]
    fn containment_is_a_duplicate_either_way() {
        assert!(is_duplicate("Toit", "Toit Brewpub", 0.8));
        assert!(is_duplicate("TOIT BREWPUB", "toit", 0.8));
    }

    #[test]
    fn close_spellings_are_duplicates() {
        assert!(is_duplicate("Cubbon Park", "Cubbon Parks", 0.8));
        assert!(is_duplicate("Lalbagh Botanical Garden", "Lal Bagh Botanical Garden", 0.8));
    }

    #[test]
    fn threshold_is_strict() {
        // "abcd" / "abxd" is exactly 0.75.
        assert!(!is_duplicate("abcd", "abxd", 0.75));
        assert!(is_duplicate("abcd", "abxd", 0.74));
    }

    #[test]
    fn different_venues_are_kept_apart() {
        assert!(!is_duplicate("Toit", "Arbor Brewing Company", 0.8));
        assert!(!is_duplicate("PVR Orion", "INOX Garuda", 0.8));
    }

    #[test]
    fn duplicate_check_is_symmetric() {
        let names = [
            "Cubbon Park",
            "cubbon parks",
            "Lalbagh",
            "Lal Bagh",
            "abcabd",
            "abdabc",
            "Phoenix Marketcity",
            "Phoenix Mall",
            "",
        ];
        for a in names {
            for b in names {
                assert_eq!(
                    is_duplicate(a, b, 0.8),
                    is_duplicate(b, a, 0.8),
                    "{a:?} vs {b:?}"
                );
                assert!((similarity(a, b) - similarity(b, a)).abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn deduplicate_keeps_first_seen_in_order() {
        let merged = deduplicate(
            vec![
                candidate("Toit Brewpub"),
                candidate("Arbor Brewing Company"),
                candidate("Toit"),
                candidate("Windmills Craftworks"),
                candidate("Arbor Brewing Co"),
            ],
            0.8,
        );
        let names: Vec<&str> = merged.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Toit Brewpub", "Arbor Brewing Company", "Windmills Craftworks"]
        );
    }
}
