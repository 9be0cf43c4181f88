use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Rscript not found - install R and make sure Rscript is on PATH")]
    RscriptNotFound,

    #[error("Generator error: {0}")]
    Generator(String),

    #[error("Scrape error: {0}")]
    Scrape(String),

    #[error("Geocoding error: {0}")]
    Geocode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
