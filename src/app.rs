use crate::catalog::IdentityCatalog;
use crate::config::Config;
use crate::espn::HttpFetcher;
use crate::export::{ExportPaths, write_report};
use crate::league::League;
use crate::pipeline::{LeaguePipeline, LeagueReport};
use crate::utils::fmt_duration;
use anyhow::Context;
use chrono::Local;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};
use url::Url;

/// Wires configuration, the HTTP client, and the pipeline together for a run.
pub struct App {
    config: Config,
    base_url: Url,
    pipeline: LeaguePipeline,
}

impl App {
    pub fn new(config: Config) -> Result<Self, anyhow::Error> {
        let base_url = config.base_url()?;
        let fetcher = HttpFetcher::new(&config.user_agent, config.request_timeout)
            .context("Failed to build HTTP client")?;
        let pipeline = LeaguePipeline::new(Arc::new(fetcher), config.pipeline_settings());

        info!(
            base_url = %base_url,
            request_timeout = fmt_duration(config.request_timeout),
            team_concurrency = config.team_concurrency,
            reference_concurrency = config.reference_concurrency,
            "application configured"
        );

        Ok(Self {
            config,
            base_url,
            pipeline,
        })
    }

    /// Collect one league: load its catalog, run the pipeline.
    pub async fn collect_league(&self, league: League) -> Result<LeagueReport, anyhow::Error> {
        let catalog_path = self.config.catalog_dir.join(league.catalog_file_name());
        let catalog = IdentityCatalog::load(&catalog_path)?;
        let template = league.injuries_template(&self.base_url)?;

        info!(%league, catalog_entries = catalog.len(), "collecting league");
        Ok(self
            .pipeline
            .run(&league.to_string(), &league.teams(), template, Arc::new(catalog))
            .await)
    }

    /// Collect and export every requested league. One league failing does not
    /// stop the others, but makes the exit code non-zero.
    pub async fn run(&self, leagues: &[League]) -> ExitCode {
        let today = Local::now().date_naive();
        let mut failures = 0usize;

        for &league in leagues {
            let result = async {
                let report = self.collect_league(league).await?;
                let paths = ExportPaths::new(&self.config.output_dir, league.slug(), today);
                write_report(&report, &paths)?;
                Ok::<_, anyhow::Error>((report, paths))
            }
            .await;

            match result {
                Ok((report, paths)) => {
                    for team in report.unavailable_teams() {
                        warn!(%league, team = team.team.as_str(), status = ?team.list, "team list unavailable");
                    }
                    println!(
                        "✅ {league}: {} injury records from {} teams in {}. Data saved in {}.",
                        report.records.len(),
                        report.teams.len(),
                        fmt_duration(report.elapsed),
                        paths.folder.display()
                    );
                }
                Err(e) => {
                    failures += 1;
                    error!(%league, error = ?e, "league run failed");
                }
            }
        }

        if failures == 0 {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}
