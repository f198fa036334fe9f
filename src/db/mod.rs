pub mod connection;
pub mod properties;

pub use connection::{init_db, Database};
pub use properties::{count_observations, load_issued_slugs, load_property, save_properties};
