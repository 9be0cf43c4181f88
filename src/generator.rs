//! External game-data generation via the companion R script

use crate::error::{PipelineError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Path of the raw game data CSV for a year.
pub fn input_path(dir: &Path, year: &str) -> PathBuf {
    dir.join(format!("df_{}.csv", year))
}

/// Path of the cleaned output CSV for a year.
pub fn output_path(dir: &Path, year: &str) -> PathBuf {
    dir.join(format!("cleaned_df_{}.csv", year))
}

/// Check that Rscript is installed
fn check_rscript() -> Result<()> {
    let output = Command::new("which")
        .arg("Rscript")
        .output()
        .map_err(|_| PipelineError::RscriptNotFound)?;

    if !output.status.success() {
        return Err(PipelineError::RscriptNotFound);
    }
    Ok(())
}

/// Run the R script that builds the season dataset for `year`.
///
/// `delay` is forwarded as the per-request wait the script should use
/// between its own stats-site requests. The script inherits stdout/stderr,
/// so its progress shows up directly in the terminal.
pub fn run_generator(year: &str, delay: &str) -> Result<()> {
    check_rscript()?;

    let status = Command::new("Rscript")
        .arg("game_data.R")
        .arg(year)
        .arg(delay)
        .status()?;

    if !status.success() {
        return Err(PipelineError::Generator(format!(
            "game_data.R failed for year {}: {}",
            year, status
        )));
    }
    Ok(())
}

/// Make sure the raw CSV for `year` exists, generating it if missing.
pub fn ensure_game_data(dir: &Path, year: &str, delay: &str) -> Result<PathBuf> {
    let path = input_path(dir, year);
    if !path.exists() {
        log::info!("{} not found, running game_data.R", path.display());
        run_generator(year, delay)?;
    }
    Ok(path)
}
