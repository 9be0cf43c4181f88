use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use ncaa_map::{assemble, generator, geocode, resolver, scrape};

#[derive(Parser)]
#[command(name = "ncaa-map")]
#[command(about = "Scrape and geocode NCAA baseball game venues for mapping", long_about = None)]
struct Cli {
    /// Directory holding the raw and cleaned game data CSVs
    #[arg(long, default_value = "game_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full enrichment pipeline for a season
    Run {
        /// Season year to process
        #[arg(long)]
        year: String,

        /// Per-request delay (seconds) forwarded to the R data generator
        #[arg(long, default_value = "1")]
        delay: String,
    },

    /// Summarize a season's raw game data without touching the network
    Info {
        /// Season year to inspect
        #[arg(long)]
        year: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { year, delay } => {
            run(&cli.data_dir, &year, &delay)?;
        }
        Commands::Info { year } => {
            info(&cli.data_dir, &year)?;
        }
    }

    Ok(())
}

fn run(data_dir: &Path, year: &str, delay: &str) -> Result<()> {
    let input = generator::ensure_game_data(data_dir, year, delay)
        .context("Failed to prepare game data")?;

    println!("Reading game data: {}", input.display());
    let games = assemble::read_games(&input).context("Failed to read game data")?;
    println!("Found {} games", games.len());

    let sites = resolver::unique_sites(&games);
    println!("Found {} unique game sites", sites.len());

    println!("Scraping venue pages...");
    let mut session = scrape::BrowserSession::open().context("Failed to open fetch session")?;
    let venues = scrape::scrape_venues(&session, &sites);
    session.close();
    let resolved = venues.values().filter(|v| v.is_resolved()).count();
    println!("Resolved {} of {} venues", resolved, sites.len());

    let names = geocode::distinct_venues(&sites, &venues);
    println!("Geocoding {} distinct venues...", names.len());
    let geocoder = geocode::Geocoder::new().context("Failed to create geocoding client")?;
    let coords = geocode::find_coords(&geocoder, &names);
    println!("Located {} of {} venues", coords.len(), names.len());

    let rows = assemble::assemble(&games, &venues, &coords);
    let output = generator::output_path(data_dir, year);
    assemble::write_cleaned(&rows, &output).context("Failed to write cleaned CSV")?;
    println!("Wrote {} rows: {}", rows.len(), output.display());

    println!("Done!");
    Ok(())
}

fn info(data_dir: &Path, year: &str) -> Result<()> {
    let input = generator::input_path(data_dir, year);
    let games = assemble::read_games(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    println!("Game data: {}", input.display());
    println!("Games: {}", games.len());

    let sites = resolver::unique_sites(&games);
    let neutral = sites.iter().filter(|s| s.neutral_site).count();
    println!("Unique game sites: {}", sites.len());
    println!("  {} home, {} neutral", sites.len() - neutral, neutral);

    let mut dates: Vec<&str> = games.iter().map(|g| g.date.as_str()).collect();
    dates.sort_unstable();
    if let (Some(first), Some(last)) = (dates.first(), dates.last()) {
        println!("Dates: {} to {}", first, last);
    }

    Ok(())
}
