//! League-level fan-out over every team, joined into one report.

use futures::StreamExt;
use futures::stream;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Instrument, info, info_span};

use crate::catalog::IdentityCatalog;
use crate::espn::{Fetch, ReferenceFetcher};
use crate::league::{TeamEndpointMap, UrlTemplate};
use crate::pipeline::collector::{ListStatus, TeamInjuryCollector, TeamOutcome};
use crate::pipeline::log::{LogEntry, RunLog};
use crate::pipeline::record::InjuryRecord;
use crate::utils::fmt_duration;

/// Concurrency and deadline knobs for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Teams collected at once; `0` is unbounded.
    pub team_concurrency: usize,
    /// Detail fetches in flight per team; `0` is unbounded.
    pub reference_concurrency: usize,
    /// Wall-clock budget for the whole league.
    pub deadline: Option<Duration>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            team_concurrency: 8,
            reference_concurrency: 16,
            deadline: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSummary {
    pub team: String,
    pub records: usize,
    pub list: ListStatus,
}

/// Output of one league run, handed whole to the export stage.
#[derive(Debug, Clone)]
pub struct LeagueReport {
    pub league: String,
    /// Unordered; see [`LeagueReport::sorted_records`].
    pub records: Vec<InjuryRecord>,
    /// Stable within a team, interleaved across teams.
    pub log: Vec<LogEntry>,
    /// One entry per team, in team-table order.
    pub teams: Vec<TeamSummary>,
    pub elapsed: Duration,
}

impl LeagueReport {
    /// Records in a stable order (team, then injury id).
    pub fn sorted_records(&self) -> Vec<InjuryRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| {
            (a.team.as_str(), a.injury_id.as_str(), a.athlete_id.as_str()).cmp(&(
                b.team.as_str(),
                b.injury_id.as_str(),
                b.athlete_id.as_str(),
            ))
        });
        records
    }

    /// Teams whose list endpoint could not be read or ran out of time.
    pub fn unavailable_teams(&self) -> impl Iterator<Item = &TeamSummary> {
        self.teams
            .iter()
            .filter(|t| matches!(t.list, ListStatus::Unavailable | ListStatus::TimedOut))
    }
}

/// Runs every team of a league through the collector and merges the results.
///
/// A run is either in progress (the `run` future is pending) or complete; it
/// cannot be cancelled or resumed, and one team's failure never stops another.
pub struct LeaguePipeline {
    fetch: Arc<dyn Fetch>,
    settings: PipelineSettings,
}

impl LeaguePipeline {
    pub fn new(fetch: Arc<dyn Fetch>, settings: PipelineSettings) -> Self {
        Self { fetch, settings }
    }

    pub async fn run(
        &self,
        league: &str,
        teams: &TeamEndpointMap,
        template: UrlTemplate,
        catalog: Arc<IdentityCatalog>,
    ) -> LeagueReport {
        let span = info_span!("league_pipeline", league);
        self.run_inner(league, teams, template, catalog)
            .instrument(span)
            .await
    }

    async fn run_inner(
        &self,
        league: &str,
        teams: &TeamEndpointMap,
        template: UrlTemplate,
        catalog: Arc<IdentityCatalog>,
    ) -> LeagueReport {
        let start = Instant::now();
        let deadline = self
            .settings
            .deadline
            .map(|budget| tokio::time::Instant::now() + budget);
        let limit = match self.settings.team_concurrency {
            0 => teams.len().max(1),
            n => n,
        };

        info!(
            teams = teams.len(),
            team_concurrency = limit,
            reference_concurrency = self.settings.reference_concurrency,
            deadline = ?self.settings.deadline,
            "starting league pipeline"
        );

        let (log, drain) = RunLog::channel();
        let collector = TeamInjuryCollector::new(
            ReferenceFetcher::new(self.fetch.clone(), log.clone()),
            template,
            catalog,
            self.settings.reference_concurrency,
        );

        let mut outcomes: Vec<(usize, TeamOutcome)> = stream::iter(teams.iter().enumerate())
            .map(|(position, (team, team_id))| {
                let collector = &collector;
                let log = log.scoped(team);
                async move {
                    let outcome = match deadline {
                        None => collector.collect(team, team_id).await,
                        Some(at) => tokio::time::timeout_at(at, collector.collect(team, team_id))
                            .await
                            .unwrap_or_else(|_| {
                                log.warn(format!("{team}: Deadline exceeded, skipped."));
                                TeamOutcome {
                                    team: team.to_owned(),
                                    records: Vec::new(),
                                    list: ListStatus::TimedOut,
                                }
                            }),
                    };
                    (position, outcome)
                }
            })
            .buffer_unordered(limit)
            .collect()
            .await;

        // Every producer must be gone before the drain can finish.
        drop(collector);
        drop(log);
        let log = drain.collect().await;

        outcomes.sort_by_key(|(position, _)| *position);
        let mut records = Vec::new();
        let mut summaries = Vec::with_capacity(outcomes.len());
        for (_, outcome) in outcomes {
            summaries.push(TeamSummary {
                team: outcome.team,
                records: outcome.records.len(),
                list: outcome.list,
            });
            records.extend(outcome.records);
        }

        let elapsed = start.elapsed();
        info!(
            records = records.len(),
            log_lines = log.len(),
            duration = fmt_duration(elapsed),
            "league pipeline complete"
        );

        LeagueReport {
            league: league.to_owned(),
            records,
            log,
            teams: summaries,
            elapsed,
        }
    }
}
