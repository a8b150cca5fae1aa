//! The concurrent reference-resolution ingestion pipeline.
//!
//! Orchestrator → Collector → Resolver → Fetcher, each level a bounded
//! fan-out over the next.

pub mod collector;
pub mod log;
pub mod orchestrator;
pub mod record;
pub mod resolver;

pub use collector::{ListStatus, TeamInjuryCollector, TeamOutcome};
pub use log::{LogDrain, LogEntry, LogLevel, RunLog};
pub use orchestrator::{LeaguePipeline, LeagueReport, PipelineSettings, TeamSummary};
pub use record::InjuryRecord;
pub use resolver::DetailResolver;
