//! Join venues and coordinates back onto the season's games and write the
//! cleaned CSV.

use crate::error::Result;
use crate::model::{GameRecord, Lookup, OutputRow};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Read the raw season CSV produced by the data generator.
pub fn read_games(path: &Path) -> Result<Vec<GameRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut games = Vec::new();
    for result in reader.deserialize() {
        games.push(result?);
    }
    Ok(games)
}

/// Build the final output rows: one per game, deduplicated and date-sorted.
///
/// Games whose venue or coordinates could not be resolved keep their row
/// with empty latitude/longitude; nothing is filtered out here, the mapping
/// front end decides what to do with blank points.
pub fn assemble(
    games: &[GameRecord],
    venues: &HashMap<String, Lookup<String>>,
    coords: &HashMap<String, (f64, f64)>,
) -> Vec<OutputRow> {
    let mut dated: Vec<(&str, OutputRow)> = games
        .iter()
        .map(|game| (game.date.as_str(), enrich(game, venues, coords)))
        .collect();
    dated.sort_by(|a, b| a.0.cmp(b.0));

    // Exact-duplicate rows collapse to their first (earliest) occurrence.
    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(dated.len());
    for (_, row) in dated {
        let fingerprint = (
            row.latitude.map(f64::to_bits),
            row.longitude.map(f64::to_bits),
            row.info.clone(),
        );
        if seen.insert(fingerprint) {
            rows.push(row);
        }
    }
    rows
}

/// One output row for one game, carrying absent lookups through as `None`.
fn enrich(
    game: &GameRecord,
    venues: &HashMap<String, Lookup<String>>,
    coords: &HashMap<String, (f64, f64)>,
) -> OutputRow {
    let venue = venues.get(&game.venue_key()).and_then(Lookup::resolved);
    let pair = venue.and_then(|name| coords.get(name));

    OutputRow {
        latitude: pair.map(|&(lat, _)| lat),
        longitude: pair.map(|&(_, lon)| lon),
        info: describe(game),
    }
}

/// Human-readable description shown on the map for one game.
fn describe(game: &GameRecord) -> String {
    format!(
        "{} vs. {} ({}-{}) {}",
        game.home_team, game.away_team, game.home_team_score, game.away_team_score, game.date
    )
}

/// Write the cleaned rows with a `latitude,longitude,info` header.
pub fn write_cleaned(rows: &[OutputRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    if rows.is_empty() {
        // serialize() only emits the header alongside a first record.
        writer.write_record(["latitude", "longitude", "info"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(home: &str, away: &str, date: &str) -> GameRecord {
        GameRecord {
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_team_score: 7,
            away_team_score: 3,
            date: date.to_string(),
            neutral_site: false,
            game_info_url: "https://example.org/game".to_string(),
        }
    }

    fn fixture() -> (
        Vec<GameRecord>,
        HashMap<String, Lookup<String>>,
        HashMap<String, (f64, f64)>,
    ) {
        let games = vec![
            game("Tech", "State", "2023-04-08"),
            game("Tech", "Aggies", "2023-03-01"),
            // Venue page never resolved for this one.
            game("Ghosts", "State", "2023-02-17"),
        ];

        let mut venues = HashMap::new();
        venues.insert(
            "TechFalse".to_string(),
            Lookup::Resolved("Blair Field".to_string()),
        );
        venues.insert("GhostsFalse".to_string(), Lookup::Unresolved);

        let mut coords = HashMap::new();
        coords.insert("Blair Field".to_string(), (33.767, -118.1445));

        (games, venues, coords)
    }

    #[test]
    fn test_info_format() {
        let (games, venues, coords) = fixture();
        let rows = assemble(&games, &venues, &coords);

        assert!(rows
            .iter()
            .any(|r| r.info == "Tech vs. State (7-3) 2023-04-08"));
    }

    #[test]
    fn test_sorted_by_date() {
        let (games, venues, coords) = fixture();
        let rows = assemble(&games, &venues, &coords);

        assert_eq!(rows.len(), 3);
        assert!(rows[0].info.ends_with("2023-02-17"));
        assert!(rows[1].info.ends_with("2023-03-01"));
        assert!(rows[2].info.ends_with("2023-04-08"));
    }

    #[test]
    fn test_unresolved_venue_keeps_row_with_empty_coords() {
        let (games, venues, coords) = fixture();
        let rows = assemble(&games, &venues, &coords);

        let ghost = rows
            .iter()
            .find(|r| r.info.starts_with("Ghosts"))
            .expect("row with unresolved venue must survive");
        assert_eq!(ghost.latitude, None);
        assert_eq!(ghost.longitude, None);
    }

    #[test]
    fn test_exact_duplicates_collapse() {
        let (mut games, venues, coords) = fixture();
        games.push(game("Tech", "State", "2023-04-08"));
        let rows = assemble(&games, &venues, &coords);

        let matching = rows
            .iter()
            .filter(|r| r.info == "Tech vs. State (7-3) 2023-04-08")
            .count();
        assert_eq!(matching, 1);
    }

    #[test]
    fn test_same_info_different_coords_both_kept() {
        let (mut games, mut venues, mut coords) = fixture();
        // Same description can legitimately sit at two venues when the
        // neutral-site flag differs; only exact triples collapse.
        let mut neutral = game("Tech", "State", "2023-04-08");
        neutral.neutral_site = true;
        games.push(neutral);
        venues.insert(
            "TechTrue".to_string(),
            Lookup::Resolved("Goss Stadium".to_string()),
        );
        coords.insert("Goss Stadium".to_string(), (44.566, -123.283));

        let rows = assemble(&games, &venues, &coords);
        let matching = rows
            .iter()
            .filter(|r| r.info == "Tech vs. State (7-3) 2023-04-08")
            .count();
        assert_eq!(matching, 2);
    }

    #[test]
    fn test_write_and_read_back() {
        let (games, venues, coords) = fixture();
        let rows = assemble(&games, &venues, &coords);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned_df_2023.csv");
        write_cleaned(&rows, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("latitude,longitude,info"));
        // Unresolved venue: empty cells, row still present.
        assert_eq!(
            lines.next(),
            Some(",,Ghosts vs. State (7-3) 2023-02-17")
        );
    }

    #[test]
    fn test_write_empty_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned_df_1900.csv");
        write_cleaned(&[], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), "latitude,longitude,info");
    }

    #[test]
    fn test_read_games_ignores_extra_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("df_2023.csv");
        std::fs::write(
            &path,
            "home_team,away_team,home_team_score,away_team_score,date,neutral_site,game_info_url,attendance\n\
             Tech,State,7,3,2023-04-08,FALSE,https://example.org/game/1,2100\n",
        )
        .unwrap();

        let games = read_games(&path).unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].venue_key(), "TechFalse");
    }
}
