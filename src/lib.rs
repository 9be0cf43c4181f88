pub mod assemble;
pub mod error;
pub mod generator;
pub mod geocode;
pub mod model;
pub mod resolver;
pub mod scrape;

pub use error::{PipelineError, Result};
pub use model::*;
