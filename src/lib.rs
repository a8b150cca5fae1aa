//! Injury report ingestion for leagues served by the ESPN core API.
//!
//! Each league's teams are fetched concurrently; every team lists `$ref`
//! pointers that are resolved concurrently into injury details, matched
//! against a local athlete catalog, and normalized into [`InjuryRecord`]s.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod espn;
pub mod export;
pub mod league;
pub mod logging;
pub mod pipeline;
pub mod utils;

#[cfg(test)]
mod testing;

pub use catalog::IdentityCatalog;
pub use league::{League, TeamEndpointMap, UrlTemplate};
pub use pipeline::{InjuryRecord, LeaguePipeline, LeagueReport, PipelineSettings};
