//! Client for the ESPN core API (`sports.core.api.espn.com`).
//!
//! The API exposes injuries as a two-level reference graph: a team endpoint
//! lists `$ref` pointers, each of which must be fetched separately for the
//! injury detail.

pub mod errors;
pub mod fetcher;
pub mod json;
pub mod models;
pub mod reference;

pub use errors::FetchError;
pub use fetcher::{Fetch, HttpFetcher, ReferenceFetcher};
pub use models::{InjuryDetail, TeamInjuryList};
pub use reference::Reference;
