//! Canonical injury record and the single payload → record mapping.

use serde::{Deserialize, Serialize};

use crate::catalog::{IdentityCatalog, UNKNOWN_PLAYER};
use crate::espn::InjuryDetail;

/// Defaults applied when a payload field is absent or malformed.
pub mod defaults {
    pub const ATHLETE_ID: &str = "";
    pub const STATUS: &str = "Unknown";
    pub const INJURY_TYPE: &str = "Unknown";
    pub const RETURN_DATE: &str = "Unknown";
    pub const SHORT_COMMENT: &str = "";
    pub const LONG_COMMENT: &str = "";
    pub const REPORTED_DATE: &str = "";
    /// Position, location, detail, side, fantasy status.
    pub const EXTRA: &str = "";
}

/// One normalized injury row, identical in shape across leagues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjuryRecord {
    #[serde(rename = "Player Name")]
    pub player_name: String,
    #[serde(rename = "Athlete ID")]
    pub athlete_id: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Injury ID")]
    pub injury_id: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Injury Type")]
    pub injury_type: String,
    #[serde(rename = "Return Date")]
    pub return_date: String,
    #[serde(rename = "Short Comment")]
    pub short_comment: String,
    #[serde(rename = "Long Comment")]
    pub long_comment: String,
    #[serde(rename = "Reported Date")]
    pub reported_date: String,
    #[serde(rename = "Position", default)]
    pub position: String,
    #[serde(rename = "Location", default)]
    pub location: String,
    #[serde(rename = "Detail", default)]
    pub detail: String,
    #[serde(rename = "Side", default)]
    pub side: String,
    #[serde(rename = "Fantasy Status", default)]
    pub fantasy_status: String,
}

impl InjuryRecord {
    /// Map a resolved detail payload to a record for `team`.
    ///
    /// Every field falls back to its entry in [`defaults`]; a record is never
    /// dropped because of payload shape.
    pub fn from_detail(detail: &InjuryDetail, team: &str, catalog: &IdentityCatalog) -> Self {
        let athlete_id = detail.athlete_id().unwrap_or(defaults::ATHLETE_ID);
        let player_name = if athlete_id.is_empty() {
            UNKNOWN_PLAYER
        } else {
            catalog.lookup(athlete_id)
        };
        let injury_id = detail
            .id()
            .unwrap_or_else(|| synthesize_injury_id(team, player_name));
        let text = |value: Option<&str>, default: &str| value.unwrap_or(default).to_owned();

        Self {
            player_name: player_name.to_owned(),
            athlete_id: athlete_id.to_owned(),
            team: team.to_owned(),
            injury_id,
            status: text(detail.status(), defaults::STATUS),
            injury_type: text(detail.injury_type(), defaults::INJURY_TYPE),
            return_date: text(detail.return_date(), defaults::RETURN_DATE),
            short_comment: text(detail.short_comment(), defaults::SHORT_COMMENT),
            long_comment: text(detail.long_comment(), defaults::LONG_COMMENT),
            reported_date: text(detail.date(), defaults::REPORTED_DATE),
            position: text(detail.position(), defaults::EXTRA),
            location: text(detail.location(), defaults::EXTRA),
            detail: text(detail.detail(), defaults::EXTRA),
            side: text(detail.side(), defaults::EXTRA),
            fantasy_status: text(detail.fantasy_status(), defaults::EXTRA),
        }
    }
}

/// Key for sources without injury ids: `"<team>_<player>"`, lower-cased,
/// spaces replaced by underscores.
pub fn synthesize_injury_id(team: &str, player: &str) -> String {
    format!("{team}_{player}").to_lowercase().replace(' ', "_")
}
