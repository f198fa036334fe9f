pub mod batch;
pub mod db;
pub mod domain;
pub mod errors;
pub mod linear;
pub mod logging;
pub mod mapper;
pub mod normalize;
pub mod validate;

// Log targets
pub const TARGET_MAPPER: &str = "listing_mapper";
pub const TARGET_VALIDATION: &str = "listing_validation";
pub const TARGET_DB: &str = "db_query";

pub use batch::map_parallel;
pub use domain::{Locale, LocalizedValue, Property};
pub use errors::{NormalizerError, Result};
pub use linear::RawListing;
pub use mapper::LinearMapper;
pub use normalize::SlugRegistry;

#[cfg(test)]
mod tests;
