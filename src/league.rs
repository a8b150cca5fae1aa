//! Leagues served by the ESPN core API and their static team tables.

use clap::ValueEnum;
use indexmap::IndexMap;
use std::fmt;
use url::Url;

/// Default host of the ESPN core API.
pub const ESPN_CORE_BASE: &str = "https://sports.core.api.espn.com";

/// Placeholder substituted by [`UrlTemplate::render`].
const TEAM_ID_PLACEHOLDER: &str = "{team_id}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum League {
    Nfl,
    Nba,
    Mlb,
    Nhl,
}

impl League {
    pub fn all() -> [League; 4] {
        [League::Nfl, League::Nba, League::Mlb, League::Nhl]
    }

    /// Lowercase short name used in paths (`nfl`).
    pub fn slug(self) -> &'static str {
        match self {
            League::Nfl => "nfl",
            League::Nba => "nba",
            League::Mlb => "mlb",
            League::Nhl => "nhl",
        }
    }

    fn sport(self) -> &'static str {
        match self {
            League::Nfl => "football",
            League::Nba => "basketball",
            League::Mlb => "baseball",
            League::Nhl => "hockey",
        }
    }

    /// Catalog file written by the roster builder, e.g. `NFL_Players.csv`.
    pub fn catalog_file_name(self) -> String {
        format!("{}_Players.csv", self.slug().to_uppercase())
    }

    /// Team injury-list endpoint template rooted at `base`.
    pub fn injuries_template(self, base: &Url) -> Result<UrlTemplate, TemplateError> {
        let base = base.as_str().trim_end_matches('/');
        UrlTemplate::new(format!(
            "{base}/v2/sports/{sport}/leagues/{league}/teams/{TEAM_ID_PLACEHOLDER}/injuries",
            sport = self.sport(),
            league = self.slug(),
        ))
    }

    /// ESPN team ids for every team in the league, in display order.
    pub fn teams(self) -> TeamEndpointMap {
        let table: &[(&str, u32)] = match self {
            League::Nfl => NFL_TEAMS,
            League::Nba => NBA_TEAMS,
            League::Mlb => MLB_TEAMS,
            League::Nhl => NHL_TEAMS,
        };
        table.iter().copied().collect()
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug().to_uppercase())
    }
}

/// Ordered team name → ESPN team id mapping for one league.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamEndpointMap(IndexMap<String, u32>);

impl TeamEndpointMap {
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for TeamEndpointMap {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("URL template {0:?} has no {{team_id}} placeholder")]
    MissingPlaceholder(String),
    #[error("URL template {template:?} renders an invalid URL")]
    InvalidUrl {
        template: String,
        #[source]
        source: url::ParseError,
    },
}

/// A URL with a `{team_id}` slot, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        if !template.contains(TEAM_ID_PLACEHOLDER) {
            return Err(TemplateError::MissingPlaceholder(template));
        }
        let probe = template.replace(TEAM_ID_PLACEHOLDER, "0");
        if let Err(source) = Url::parse(&probe) {
            return Err(TemplateError::InvalidUrl { template, source });
        }
        Ok(Self(template))
    }

    pub fn render(&self, team_id: u32) -> Result<Url, TemplateError> {
        let rendered = self.0.replace(TEAM_ID_PLACEHOLDER, &team_id.to_string());
        Url::parse(&rendered).map_err(|source| TemplateError::InvalidUrl {
            template: self.0.clone(),
            source,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

const NFL_TEAMS: &[(&str, u32)] = &[
    ("Arizona Cardinals", 22),
    ("Atlanta Falcons", 1),
    ("Baltimore Ravens", 33),
    ("Buffalo Bills", 2),
    ("Carolina Panthers", 29),
    ("Chicago Bears", 3),
    ("Cincinnati Bengals", 4),
    ("Cleveland Browns", 5),
    ("Dallas Cowboys", 6),
    ("Denver Broncos", 7),
    ("Detroit Lions", 8),
    ("Green Bay Packers", 9),
    ("Houston Texans", 34),
    ("Indianapolis Colts", 11),
    ("Jacksonville Jaguars", 30),
    ("Kansas City Chiefs", 12),
    ("Las Vegas Raiders", 13),
    ("Los Angeles Chargers", 24),
    ("Los Angeles Rams", 14),
    ("Miami Dolphins", 15),
    ("Minnesota Vikings", 16),
    ("New England Patriots", 17),
    ("New Orleans Saints", 18),
    ("New York Giants", 19),
    ("New York Jets", 20),
    ("Philadelphia Eagles", 21),
    ("Pittsburgh Steelers", 23),
    ("San Francisco 49ers", 25),
    ("Seattle Seahawks", 26),
    ("Tampa Bay Buccaneers", 27),
    ("Tennessee Titans", 10),
    ("Washington Commanders", 28),
];

const NBA_TEAMS: &[(&str, u32)] = &[
    ("Atlanta Hawks", 1),
    ("Boston Celtics", 2),
    ("Brooklyn Nets", 17),
    ("Charlotte Hornets", 30),
    ("Chicago Bulls", 4),
    ("Cleveland Cavaliers", 5),
    ("Dallas Mavericks", 6),
    ("Denver Nuggets", 7),
    ("Detroit Pistons", 8),
    ("Golden State Warriors", 9),
    ("Houston Rockets", 10),
    ("Indiana Pacers", 11),
    ("LA Clippers", 12),
    ("Los Angeles Lakers", 13),
    ("Memphis Grizzlies", 29),
    ("Miami Heat", 14),
    ("Milwaukee Bucks", 15),
    ("Minnesota Timberwolves", 16),
    ("New Orleans Pelicans", 3),
    ("New York Knicks", 18),
    ("Oklahoma City Thunder", 25),
    ("Orlando Magic", 19),
    ("Philadelphia 76ers", 20),
    ("Phoenix Suns", 21),
    ("Portland Trail Blazers", 22),
    ("Sacramento Kings", 23),
    ("San Antonio Spurs", 24),
    ("Toronto Raptors", 28),
    ("Utah Jazz", 26),
    ("Washington Wizards", 27),
];

const MLB_TEAMS: &[(&str, u32)] = &[
    ("Arizona Diamondbacks", 29),
    ("Atlanta Braves", 15),
    ("Baltimore Orioles", 1),
    ("Boston Red Sox", 2),
    ("Chicago Cubs", 16),
    ("Chicago White Sox", 4),
    ("Cincinnati Reds", 17),
    ("Cleveland Guardians", 5),
    ("Colorado Rockies", 27),
    ("Detroit Tigers", 6),
    ("Houston Astros", 18),
    ("Kansas City Royals", 7),
    ("Los Angeles Angels", 3),
    ("Los Angeles Dodgers", 19),
    ("Miami Marlins", 28),
    ("Milwaukee Brewers", 8),
    ("Minnesota Twins", 9),
    ("New York Mets", 21),
    ("New York Yankees", 10),
    ("Oakland Athletics", 11),
    ("Philadelphia Phillies", 22),
    ("Pittsburgh Pirates", 23),
    ("San Diego Padres", 25),
    ("San Francisco Giants", 26),
    ("Seattle Mariners", 12),
    ("St. Louis Cardinals", 24),
    ("Tampa Bay Rays", 30),
    ("Texas Rangers", 13),
    ("Toronto Blue Jays", 14),
    ("Washington Nationals", 20),
];

// New Jersey shares id 1 with Boston in the upstream table this was taken
// from; both lists are fetched and attributed to their own team name.
const NHL_TEAMS: &[(&str, u32)] = &[
    ("Anaheim Ducks", 25),
    ("Arizona Coyotes", 53),
    ("Boston Bruins", 1),
    ("Buffalo Sabres", 2),
    ("Calgary Flames", 3),
    ("Carolina Hurricanes", 7),
    ("Chicago Blackhawks", 4),
    ("Colorado Avalanche", 5),
    ("Columbus Blue Jackets", 29),
    ("Dallas Stars", 9),
    ("Detroit Red Wings", 6),
    ("Edmonton Oilers", 10),
    ("Florida Panthers", 11),
    ("Los Angeles Kings", 26),
    ("Minnesota Wild", 30),
    ("Montreal Canadiens", 8),
    ("Nashville Predators", 18),
    ("New Jersey Devils", 1),
    ("New York Islanders", 12),
    ("New York Rangers", 13),
    ("Ottawa Senators", 14),
    ("Philadelphia Flyers", 15),
    ("Pittsburgh Penguins", 16),
    ("San Jose Sharks", 28),
    ("Seattle Kraken", 55),
    ("St. Louis Blues", 19),
    ("Tampa Bay Lightning", 20),
    ("Toronto Maple Leafs", 21),
    ("Vancouver Canucks", 22),
    ("Vegas Golden Knights", 54),
    ("Washington Capitals", 23),
    ("Winnipeg Jets", 24),
];
