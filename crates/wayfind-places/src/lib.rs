pub mod category;
pub mod client;
pub mod curate;
pub mod dedup;
pub mod directory;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod filter;
pub mod gate;
pub mod geo;
pub mod provider;
pub mod refine;
pub(crate) mod retry;
pub mod types;

pub use category::{CategoryClass, QueryProfile};
pub use client::OlaMapsClient;
pub use curate::{CurationConfig, Curator};
pub use dedup::{deduplicate, is_duplicate};
pub use directory::DirectoryCategory;
pub use error::PlacesError;
pub use filter::{ExclusionSet, Rejection, RelevanceFilter};
pub use gate::DistanceGate;
pub use provider::{PlaceDetails, PlaceProvider, PlaceRef};
pub use refine::refine_query;
pub use types::ReverseGeocodeHit;
