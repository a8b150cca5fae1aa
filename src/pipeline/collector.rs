//! Per-team collection: list → references → details → records.

use serde::Serialize;
use std::sync::Arc;
use tracing::{Instrument, debug, info_span};

use crate::catalog::IdentityCatalog;
use crate::espn::{ReferenceFetcher, TeamInjuryList};
use crate::league::UrlTemplate;
use crate::pipeline::record::InjuryRecord;
use crate::pipeline::resolver::DetailResolver;

/// What the team-level list fetch produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ListStatus {
    /// The list could not be fetched or decoded.
    Unavailable,
    /// The list was fetched and had no items: a healthy team.
    Empty,
    /// `references` pointers were listed, `failed` of them could not be resolved.
    Resolved { references: usize, failed: usize },
    /// The run deadline passed before this team finished.
    TimedOut,
}

/// Everything one team contributed to a run.
#[derive(Debug, Clone)]
pub struct TeamOutcome {
    pub team: String,
    pub records: Vec<InjuryRecord>,
    pub list: ListStatus,
}

/// Collects one team's injuries. Never fails; gaps are explained in the run log.
#[derive(Clone)]
pub struct TeamInjuryCollector {
    fetcher: ReferenceFetcher,
    template: UrlTemplate,
    catalog: Arc<IdentityCatalog>,
    reference_concurrency: usize,
}

impl TeamInjuryCollector {
    pub fn new(
        fetcher: ReferenceFetcher,
        template: UrlTemplate,
        catalog: Arc<IdentityCatalog>,
        reference_concurrency: usize,
    ) -> Self {
        Self {
            fetcher,
            template,
            catalog,
            reference_concurrency,
        }
    }

    pub async fn collect(&self, team: &str, team_id: u32) -> TeamOutcome {
        let span = info_span!("collect_team", team, team_id);
        self.collect_inner(team, team_id).instrument(span).await
    }

    async fn collect_inner(&self, team: &str, team_id: u32) -> TeamOutcome {
        let fetcher = self.fetcher.for_team(team);
        let log = fetcher.log().clone();
        let empty = |list: ListStatus| TeamOutcome {
            team: team.to_owned(),
            records: Vec::new(),
            list,
        };

        let url = match self.template.render(team_id) {
            Ok(url) => url,
            Err(e) => {
                log.error(format!("{team}: {e}"));
                return empty(ListStatus::Unavailable);
            }
        };

        let list = match fetcher.fetch::<TeamInjuryList>(&url).await {
            Some(list) if !list.items().is_empty() => list,
            fetched => {
                log.warn(format!("{team}: No injuries found."));
                let status = if fetched.is_some() {
                    ListStatus::Empty
                } else {
                    ListStatus::Unavailable
                };
                return empty(status);
            }
        };

        let listed = list.items().len();
        let references = list.references();
        if references.len() < listed {
            debug!(skipped = listed - references.len(), "skipping malformed list items");
        }

        debug!(references = references.len(), "resolving injury details");
        let resolver = DetailResolver::new(fetcher, self.reference_concurrency);
        let details = resolver.resolve(&references).await;

        let records: Vec<InjuryRecord> = details
            .iter()
            .flatten()
            .map(|detail| InjuryRecord::from_detail(detail, team, &self.catalog))
            .collect();

        log.info(format!("{team}: Retrieved {} injury records.", records.len()));

        TeamOutcome {
            team: team.to_owned(),
            list: ListStatus::Resolved {
                references: listed,
                failed: listed - records.len(),
            },
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::log::{LogLevel, RunLog};
    use crate::testing::StaticUpstream;

    const TEAM_URL: &str = "http://x.test/teams/{team_id}/injuries";

    fn collector(upstream: StaticUpstream, log: RunLog, catalog: IdentityCatalog) -> TeamInjuryCollector {
        TeamInjuryCollector::new(
            ReferenceFetcher::new(Arc::new(upstream), log),
            UrlTemplate::new(TEAM_URL).unwrap(),
            Arc::new(catalog),
            4,
        )
    }

    #[tokio::test]
    async fn empty_list_is_healthy_team() {
        let upstream = StaticUpstream::new().json("http://x.test/teams/7/injuries", r#"{"count": 0, "items": []}"#);
        let (log, drain) = RunLog::channel();
        let outcome = collector(upstream, log, IdentityCatalog::empty())
            .collect("Denver Broncos", 7)
            .await;

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.list, ListStatus::Empty);
        let entries = drain.collect().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Warn);
        assert_eq!(entries[0].message, "Denver Broncos: No injuries found.");
    }

    #[tokio::test]
    async fn unavailable_list_logs_error_then_no_injuries() {
        let upstream = StaticUpstream::new().status("http://x.test/teams/8/injuries", 404);
        let (log, drain) = RunLog::channel();
        let outcome = collector(upstream, log, IdentityCatalog::empty())
            .collect("Detroit Lions", 8)
            .await;

        assert_eq!(outcome.list, ListStatus::Unavailable);
        let messages: Vec<String> = drain.collect().await.into_iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![
                "Failed to fetch http://x.test/teams/8/injuries (Status: 404)".to_owned(),
                "Detroit Lions: No injuries found.".to_owned(),
            ]
        );
    }

    #[tokio::test]
    async fn failed_detail_does_not_block_siblings() {
        let upstream = StaticUpstream::new()
            .json(
                "http://x.test/teams/9/injuries",
                r#"{"items": [
                    {"$ref": "http://x.test/injuries/1"},
                    {"$ref": "http://x.test/injuries/2"},
                    {"$ref": "http://x.test/injuries/3"}
                ]}"#,
            )
            .json(
                "http://x.test/injuries/1",
                r#"{"id": "1", "status": "Out", "athlete": {"$ref": "http://x.test/athletes/10?lang=en"}}"#,
            )
            .status("http://x.test/injuries/2", 500)
            .json(
                "http://x.test/injuries/3",
                r#"{"id": "3", "athlete": {"$ref": "http://x.test/athletes/30"}}"#,
            );
        let (log, drain) = RunLog::channel();
        let catalog = IdentityCatalog::from_pairs([("10", "Ten"), ("30", "Thirty")]);
        let outcome = collector(upstream, log, catalog).collect("Green Bay Packers", 9).await;

        let mut names: Vec<&str> = outcome.records.iter().map(|r| r.player_name.as_str()).collect();
        names.sort();
        assert_eq!(names, vec!["Ten", "Thirty"]);
        assert_eq!(outcome.list, ListStatus::Resolved { references: 3, failed: 1 });
        assert!(outcome.records.iter().all(|r| r.team == "Green Bay Packers"));

        let entries = drain.collect().await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, LogLevel::Error);
        assert_eq!(entries[1].message, "Green Bay Packers: Retrieved 2 injury records.");
    }

    #[tokio::test]
    async fn malformed_list_item_costs_only_itself() {
        let upstream = StaticUpstream::new()
            .json(
                "http://x.test/teams/9/injuries",
                r#"{"count": 2, "items": [
                    {"$ref": "http://x.test/injuries/1"},
                    {"href": "http://x.test/injuries/2"}
                ]}"#,
            )
            .json(
                "http://x.test/injuries/1",
                r#"{"id": "1", "athlete": {"$ref": "http://x.test/athletes/10"}}"#,
            );
        let (log, drain) = RunLog::channel();
        let catalog = IdentityCatalog::from_pairs([("10", "Ten")]);
        let outcome = collector(upstream, log, catalog).collect("Houston Texans", 9).await;

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].player_name, "Ten");
        assert_eq!(outcome.list, ListStatus::Resolved { references: 2, failed: 1 });

        let entries = drain.collect().await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[0].message, "Houston Texans: Retrieved 1 injury records.");
    }
}
