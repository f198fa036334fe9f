pub mod agent;
pub mod booleans;
pub mod dates;
pub mod energy;
pub mod fallback;
pub mod listing_type;
pub mod localized;
pub mod numbers;
pub mod slug;

pub use booleans::normalize_bool;
pub use energy::{classify_energy_certificate, EnergyCertificateStatus};
pub use fallback::{first_present, Candidate, Resolver};
pub use listing_type::{localize_listing_type, normalize_type_code};
pub use localized::{extract, localized};
pub use numbers::{first_valid_number, parse_area, parse_euro_amount, parse_number, NumberPolicy};
pub use slug::{slug_base, slugify, IssuedSlug, SlugRegistry};
