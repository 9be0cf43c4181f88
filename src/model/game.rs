//! Row types for the raw and cleaned game data CSV files

use serde::{Deserialize, Deserializer, Serialize};

/// One raw game record as produced by the R data generator.
///
/// The raw CSV carries more columns than these; anything not listed here is
/// ignored on read.
#[derive(Debug, Clone, Deserialize)]
pub struct GameRecord {
    pub home_team: String,
    pub away_team: String,
    pub home_team_score: i64,
    pub away_team_score: i64,
    pub date: String,
    #[serde(deserialize_with = "deserialize_r_bool")]
    pub neutral_site: bool,
    pub game_info_url: String,
}

impl GameRecord {
    /// Join key tying this game to its resolved venue.
    pub fn venue_key(&self) -> String {
        venue_key(&self.home_team, self.neutral_site)
    }
}

/// Build the join key for a (home team, neutral-site) pair.
///
/// The flag renders as `True`/`False` because that is how the keys in the
/// original dataset were spelled; existing cleaned files depend on it.
pub fn venue_key(home_team: &str, neutral_site: bool) -> String {
    format!(
        "{}{}",
        home_team,
        if neutral_site { "True" } else { "False" }
    )
}

/// One unique game site: the first row seen for each
/// (home team, neutral-site) pair, with its game-info page URL.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueSite {
    pub home_team: String,
    pub neutral_site: bool,
    pub url: String,
    pub key: String,
}

/// One row of the cleaned output CSV.
///
/// Coordinates stay `None` when the venue could not be scraped or geocoded;
/// such rows are still written, with empty cells, and the mapping front end
/// skips them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub info: String,
}

/// Accept the R and pandas spellings of a logical column.
fn deserialize_r_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    match s.as_str() {
        "TRUE" | "True" | "true" | "1" => Ok(true),
        "FALSE" | "False" | "false" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid logical value: {}",
            other
        ))),
    }
}
