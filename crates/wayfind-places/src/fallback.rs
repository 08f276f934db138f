//! Alternate search terms tried when the primary pass comes back short.

use crate::category::{CategoryClass, QueryProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackKind {
    /// Park queries retried as gardens.
    Garden,
    /// Shopping queries retried without the "Shopping Mall" rewrite.
    GenericShopping,
}

impl FallbackKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Garden => "garden",
            Self::GenericShopping => "generic_shopping",
        }
    }
}

/// One fallback pass: which kind it is and the search term to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackPlan {
    pub kind: FallbackKind,
    pub term: String,
}

/// The fallback passes that apply to a query, in the order they run.
///
/// `original_query` is the caller's text before refinement; the shopping
/// fallback searches with it verbatim.
#[must_use]
pub fn plan_fallbacks(profile: &QueryProfile, original_query: &str) -> Vec<FallbackPlan> {
    let lowered = profile.lowered();
    let mut plans = Vec::new();

    if profile.has(CategoryClass::Park) && !lowered.contains("garden") {
        plans.push(FallbackPlan {
            kind: FallbackKind::Garden,
            term: lowered.replace("parks", "garden").replace("park", "garden"),
        });
    }

    if lowered.contains("shopping") && !lowered.contains("mall") {
        plans.push(FallbackPlan {
            kind: FallbackKind::GenericShopping,
            term: original_query.to_owned(),
        });
    }

    plans
}
