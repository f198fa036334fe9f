use crate::db::connection::{init_db, Database};
use crate::linear::RawListing;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Wrap a `json!` fixture as a raw listing.
pub fn listing(value: Value) -> RawListing {
    RawListing::from_value(value).unwrap_or_else(|e| panic!("fixture is not a listing: {e}"))
}

/// The Helsinki apartment most tests start from.
pub fn mannerheimintie(id: &str, postal_code: &str) -> RawListing {
    listing(json!({
        "address": { "fi": { "value": "Mannerheimintie 1" } },
        "city": { "fi": { "value": "Helsinki" } },
        "postalCode": { "fi": { "value": postal_code } },
        "nonLocalizedValues": {
            "id": id,
            "askPrice": "500000",
            "debtFreePrice": "650000"
        }
    }))
}

/// Initialize a fresh snapshot store in a temp directory.
/// Keep the returned `TempDir` alive for as long as the database is used.
pub fn init_test_db() -> (TempDir, Database) {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("no temp dir: {e}"));
    let path = dir.path().join("listings.sqlite3");
    let db = Database::new(path.to_string_lossy().into_owned());

    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    (dir, db)
}
