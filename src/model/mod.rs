mod game;
mod lookup;

pub use game::{venue_key, GameRecord, OutputRow, VenueSite};
pub use lookup::Lookup;
