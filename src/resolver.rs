//! Location resolver: one site per unique (home team, neutral-site) pair

use crate::model::{GameRecord, VenueSite};
use std::collections::HashSet;

/// Reduce a season's games to its unique game sites.
///
/// Uniqueness is keyed strictly on (home team, neutral-site); two games
/// sharing that pair are assumed to share a venue, so the first occurrence
/// wins and carries its game-info URL for the whole group.
pub fn unique_sites(games: &[GameRecord]) -> Vec<VenueSite> {
    let mut seen = HashSet::new();
    let mut sites = Vec::new();

    for game in games {
        let key = game.venue_key();
        if seen.insert(key.clone()) {
            sites.push(VenueSite {
                home_team: game.home_team.clone(),
                neutral_site: game.neutral_site,
                url: game.game_info_url.clone(),
                key,
            });
        }
    }
    sites
}
