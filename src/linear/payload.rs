// payload.rs
use crate::errors::{NormalizerError, Result};
use crate::linear::RawListing;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// Keys the listings API has used for the listing array in envelope responses.
const ENVELOPE_KEYS: [&str; 3] = ["data", "listings", "items"];

/// Pull the raw listings out of a response body: either a bare array or an
/// object envelope holding the array.
pub fn extract_listings(data: &Value) -> Result<Vec<RawListing>> {
    let arr = match data {
        Value::Array(arr) => arr,
        Value::Object(map) => ENVELOPE_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .ok_or_else(|| {
                NormalizerError::UnexpectedShape("listing array missing from envelope".to_string())
            })?,
        _ => {
            return Err(NormalizerError::UnexpectedShape(
                "expected an array of listings".to_string(),
            ))
        }
    };

    arr.iter()
        .map(|v| RawListing::from_value(v.clone()))
        .collect()
}

pub fn read_listings(path: &Path) -> Result<Vec<RawListing>> {
    let file = File::open(path)?;
    let data: Value = serde_json::from_reader(BufReader::new(file))?;
    let listings = extract_listings(&data)?;
    info!("Read {} raw listings from {}", listings.len(), path.display());
    Ok(listings)
}
