//! Venue scraping from NCAA game-info pages

use crate::error::{PipelineError, Result};
use crate::model::{Lookup, VenueSite};
use rand::Rng;
use std::collections::HashMap;
use std::thread;
use std::time::Duration;

/// Marker preceding the venue name in the rendered box-score markup.
const LOCATION_MARKER: &str = "Location:</td>\n      <td>";

/// Venue names the NCAA pages label in a way the geocoder mis-locates,
/// with their corrected forms.
const VENUE_CORRECTIONS: [(&str, &str); 2] = [
    ("San Mateo JC", "College of San Mateo"),
    ("Young Memorial FIeld", "UAB"),
];

/// Scoped fetch session with browser-like headers.
///
/// Opened once for the scrape phase and closed when the phase ends; after
/// `close()` every fetch fails.
pub struct BrowserSession {
    client: Option<reqwest::blocking::Client>,
}

impl BrowserSession {
    pub fn open() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .build()?;
        Ok(Self {
            client: Some(client),
        })
    }

    /// Fetch a page and return its markup.
    pub fn page_source(&self, url: &str) -> Result<String> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| PipelineError::Scrape("session is closed".to_string()))?;

        let response = client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Scrape(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        Ok(response.text()?)
    }

    /// Release the underlying client.
    pub fn close(&mut self) {
        self.client = None;
    }
}

/// Politeness delay before each remote request, uniform in [1,2) seconds.
pub(crate) fn politeness_delay() {
    let secs = rand::rng().random_range(1.0..2.0);
    thread::sleep(Duration::from_secs_f64(secs));
}

/// Pull the venue name out of a game page's markup.
///
/// Looks for the exact `Location:` cell marker first; when the page's
/// whitespace differs, falls back to walking the table cells.
pub fn extract_venue(html: &str) -> Lookup<String> {
    if let Some(after_marker) = html.split(LOCATION_MARKER).nth(1) {
        if let Some(venue) = after_marker.split("</td>").next() {
            let venue = venue.trim();
            if !venue.is_empty() {
                return Lookup::Resolved(venue.to_string());
            }
        }
    }
    extract_venue_from_cells(html)
}

/// Cell-level fallback: find a `Location:` label cell and take the text of
/// the cell that follows it.
fn extract_venue_from_cells(html: &str) -> Lookup<String> {
    use scraper::{Html, Selector};

    let document = Html::parse_document(html);
    let cell_selector = match Selector::parse("td") {
        Ok(selector) => selector,
        Err(_) => return Lookup::Unresolved,
    };

    let mut cells = document.select(&cell_selector);
    while let Some(cell) = cells.next() {
        let label = cell.text().collect::<String>().trim().to_string();
        if label == "Location:" {
            if let Some(value_cell) = cells.next() {
                let venue = value_cell.text().collect::<String>().trim().to_string();
                if !venue.is_empty() {
                    return Lookup::Resolved(venue);
                }
            }
            return Lookup::Unresolved;
        }
    }
    Lookup::Unresolved
}

/// Apply the fixed venue-name correction table.
///
/// Exact-match substitution; running it over already-corrected names is a
/// no-op.
pub fn correct_venue(name: &str) -> String {
    for (wrong, right) in VENUE_CORRECTIONS {
        if name == wrong {
            return right.to_string();
        }
    }
    name.to_string()
}

/// Scrape every site's venue name, keyed by the site's join key.
///
/// Per-site failures are recorded as `Unresolved` and the run continues;
/// there is no retry.
pub fn scrape_venues(
    session: &BrowserSession,
    sites: &[VenueSite],
) -> HashMap<String, Lookup<String>> {
    let mut venues = HashMap::with_capacity(sites.len());

    for site in sites {
        politeness_delay();

        let venue = match session.page_source(&site.url) {
            Ok(html) => extract_venue(&html),
            Err(e) => {
                log::warn!("Failed to fetch {}: {}", site.url, e);
                Lookup::Unresolved
            }
        };
        if !venue.is_resolved() {
            log::warn!("No venue found for {} ({})", site.key, site.url);
        }

        venues.insert(site.key.clone(), venue.map(|name| correct_venue(&name)));
    }
    venues
}
