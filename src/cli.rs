use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::league::League;

/// Fetch current injury reports for ESPN-backed leagues.
#[derive(Debug, Parser)]
#[command(name = "injury-feed", version, about)]
pub struct Args {
    /// Leagues to collect (default: all).
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub league: Vec<League>,

    /// TOML config file (default: ./injury_feed.toml if present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the configured output directory.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = TracingFormat::Pretty)]
    pub tracing: TracingFormat,
}

impl Args {
    pub fn leagues(&self) -> Vec<League> {
        if self.league.is_empty() {
            League::all().to_vec()
        } else {
            let mut leagues = self.league.clone();
            leagues.dedup();
            leagues
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TracingFormat {
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_every_league() {
        let args = Args::parse_from(["injury-feed"]);
        assert_eq!(args.leagues(), League::all().to_vec());
        assert_eq!(args.tracing, TracingFormat::Pretty);
    }

    #[test]
    fn comma_separated_leagues() {
        let args = Args::parse_from(["injury-feed", "--league", "nba,nhl", "--tracing", "json"]);
        assert_eq!(args.leagues(), vec![League::Nba, League::Nhl]);
        assert_eq!(args.tracing, TracingFormat::Json);
    }

    #[test]
    fn rejects_unknown_league() {
        assert!(Args::try_parse_from(["injury-feed", "--league", "afl"]).is_err());
    }
}
