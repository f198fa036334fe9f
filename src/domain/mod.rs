pub mod locale;
pub mod property;

pub use locale::Locale;
pub use property::{
    Agent, Coordinates, Dimensions, Documents, Features, Fees, Image, LocalizedValue, Media, Meta,
    Pricing, Property, Rental,
};
