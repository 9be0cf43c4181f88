//! Venue geocoding via the Nominatim search API

use crate::error::{PipelineError, Result};
use crate::model::{Lookup, VenueSite};
use crate::scrape::politeness_delay;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";

/// One match from a Nominatim search response. The service returns
/// coordinates as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

fn place_coords(place: &Place) -> Option<(f64, f64)> {
    let lat = place.lat.parse().ok()?;
    let lon = place.lon.parse().ok()?;
    Some((lat, lon))
}

/// Scoped client for the Nominatim geocoding service.
///
/// Built once for the geocoding phase and dropped at its end.
pub struct Geocoder {
    client: reqwest::blocking::Client,
}

impl Geocoder {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("ncaa_map")
            .build()?;
        Ok(Self { client })
    }

    /// Best-match coordinates for a free-text venue name, if any.
    pub fn geocode(&self, venue: &str) -> Result<Option<(f64, f64)>> {
        let body = self
            .client
            .get(NOMINATIM_URL)
            .query(&[("q", venue), ("format", "json"), ("limit", "1")])
            .send()?
            .error_for_status()?
            .text()?;

        let places: Vec<Place> = serde_json::from_str(&body)
            .map_err(|e| PipelineError::Geocode(format!("bad response for {:?}: {}", venue, e)))?;

        Ok(places.first().and_then(place_coords))
    }
}

/// Distinct resolved venue names, in first-observed site order.
pub fn distinct_venues(
    sites: &[VenueSite],
    venues: &HashMap<String, Lookup<String>>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();

    for site in sites {
        if let Some(Lookup::Resolved(name)) = venues.get(&site.key) {
            if seen.insert(name.clone()) {
                names.push(name.clone());
            }
        }
    }
    names
}

/// Geocode each distinct venue name.
///
/// Names that fail to resolve (no match, malformed coordinates, request
/// error) are skipped entirely; every game at such a venue later gets empty
/// coordinates. No retry.
pub fn find_coords(geocoder: &Geocoder, venues: &[String]) -> HashMap<String, (f64, f64)> {
    let mut coords = HashMap::new();

    for venue in venues {
        politeness_delay();

        match geocoder.geocode(venue) {
            Ok(Some(pair)) => {
                coords.insert(venue.clone(), pair);
            }
            Ok(None) => log::warn!("No geocoding match for {:?}", venue),
            Err(e) => log::warn!("Geocoding {:?} failed: {}", venue, e),
        }
    }
    coords
}
