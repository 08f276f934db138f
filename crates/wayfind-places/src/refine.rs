//! Rewrites loose interest strings into search terms the provider matches
//! better, e.g. `"gym"` → `"Gymnasium Fitness Center"`.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

/// Rewrite rules in priority order: `(key, replacement)`.
const REFINEMENTS: &[(&str, &str)] = &[
    ("parks", "Park"),
    ("park", "Park"),
    ("brewery", "Microbrewery"),
    ("gym", "Gymnasium Fitness Center"),
    ("library", "Public Library"),
    ("arcade", "Shopping Mall"),
    ("shopping", "Shopping Mall"),
    ("theaters", "Cinema"),
    ("movies", "Cinema"),
];

static RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    REFINEMENTS
        .iter()
        .map(|(key, value)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(key));
            (
                Regex::new(&pattern).expect("valid refinement regex"),
                *value,
            )
        })
        .collect()
});

/// Lower-cased replacements that are not simply a re-cased key. A query
/// holding one of these has already been refined.
static REFINED_TERMS: LazyLock<Vec<String>> = LazyLock::new(|| {
    let mut terms: Vec<String> = REFINEMENTS
        .iter()
        .filter(|(key, value)| !key.eq_ignore_ascii_case(value))
        .map(|(_, value)| value.to_lowercase())
        .collect();
    terms.dedup();
    terms
});

/// Rewrites the key of the first rule that matches `query` as a whole word
/// and whose replacement is not already present (case-insensitively).
///
/// At most one rule fires. A query that already carries a refined term is
/// returned unchanged, so refining twice gives the same result as once.
#[must_use]
pub fn refine_query(query: &str) -> String {
    let lowered = query.to_lowercase();
    if let Some(term) = REFINED_TERMS.iter().find(|term| lowered.contains(term.as_str())) {
        tracing::debug!(query, term = %term, "query already carries refined term");
        return query.to_owned();
    }

    for (pattern, value) in RULES.iter() {
        if !pattern.is_match(query) || lowered.contains(&value.to_lowercase()) {
            continue;
        }
        let refined = pattern.replace_all(query, NoExpand(value)).into_owned();
        tracing::info!(query, refined = %refined, "refined search query");
        return refined;
    }

    query.to_owned()
}
