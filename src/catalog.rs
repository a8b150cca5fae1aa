//! Athlete identity catalog: athlete id → display name.
//!
//! Populated out of band (one roster listing per league, cached as CSV) and
//! only read here. Lookups take `&str` and never allocate.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Display name used when an athlete id is not in the catalog.
pub const UNKNOWN_PLAYER: &str = "Unknown";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read athlete catalog {path}")]
    Read {
        path: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Athlete ID")]
    athlete_id: String,
    #[serde(rename = "Player Name")]
    player_name: String,
}

/// Immutable lookup table, shared read-only across a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct IdentityCatalog {
    names: HashMap<String, String>,
}

impl IdentityCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            names: pairs
                .into_iter()
                .map(|(id, name)| (id.into(), name.into()))
                .collect(),
        }
    }

    /// Load a catalog CSV with `Athlete ID` and `Player Name` columns.
    ///
    /// A missing file is not an error: the catalog is empty and every lookup
    /// resolves to [`UNKNOWN_PLAYER`]. Ids are kept as text, leading zeros intact.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            warn!(path = %path.display(), "Athlete catalog not found, all names will be Unknown");
            return Ok(Self::empty());
        }

        let read_err = |source: csv::Error| CatalogError::Read {
            path: path.display().to_string(),
            source,
        };

        let mut reader = csv::Reader::from_path(path).map_err(read_err)?;
        let mut names = HashMap::new();
        for row in reader.deserialize::<CatalogRow>() {
            let row = row.map_err(read_err)?;
            let id = row.athlete_id.trim();
            if id.is_empty() {
                continue;
            }
            // First occurrence wins, matching a first-match scan of the table.
            names
                .entry(id.to_owned())
                .or_insert_with(|| row.player_name.trim().to_owned());
        }

        debug!(path = %path.display(), entries = names.len(), "Loaded athlete catalog");
        Ok(Self { names })
    }

    /// Exact, case-sensitive lookup; `None` on miss.
    pub fn get(&self, athlete_id: &str) -> Option<&str> {
        self.names.get(athlete_id).map(String::as_str)
    }

    /// Display name for `athlete_id`, or [`UNKNOWN_PLAYER`].
    pub fn lookup(&self, athlete_id: &str) -> &str {
        self.get(athlete_id).unwrap_or(UNKNOWN_PLAYER)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
