pub mod models;
mod payload;

pub use models::{scalar_text, RawField, RawListing};
pub use payload::{extract_listings, read_listings};
