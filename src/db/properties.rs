use crate::db::connection::Database;
use crate::domain::{Locale, Property};
use crate::errors::{NormalizerError, Result};
use crate::linear::RawListing;
use crate::normalize::{slug_base, IssuedSlug};
use crate::TARGET_DB;
use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

/// Store one mapped batch.
///
/// `raw` and `properties` are parallel slices: the raw payload of each listing
/// is kept as an observation next to the normalized snapshot. Everything is
/// written in one transaction. Returns the number of snapshots written.
pub fn save_properties(
    db: &Database,
    locale: Locale,
    raw: &[RawListing],
    properties: &[Property],
) -> Result<usize> {
    if raw.len() != properties.len() {
        return Err(NormalizerError::UnexpectedShape(format!(
            "{} raw listings for {} properties",
            raw.len(),
            properties.len()
        )));
    }

    let now = Utc::now().naive_utc();

    let written = db.with_conn(|conn| {
        let tx = conn.transaction()?;

        for (listing, property) in raw.iter().zip(properties) {
            upsert_property(&tx, locale, property, now)?;
            insert_observation(&tx, locale, &property.id, listing, now)?;
        }

        tx.commit()?;
        Ok(properties.len())
    })?;

    info!(target: TARGET_DB, "Saved {} properties ({})", written, locale);
    Ok(written)
}

fn upsert_property(
    tx: &Connection,
    locale: Locale,
    property: &Property,
    now: NaiveDateTime,
) -> Result<()> {
    let json = serde_json::to_string(property)?;
    tx.execute(
        r#"
        INSERT INTO properties (
            id, locale, slug, slug_base, postal_code, type_code, address, json,
            first_seen_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
        ON CONFLICT(id, locale) DO UPDATE SET
            slug = excluded.slug,
            slug_base = excluded.slug_base,
            postal_code = excluded.postal_code,
            type_code = excluded.type_code,
            address = excluded.address,
            json = excluded.json,
            updated_at = excluded.updated_at
        "#,
        params![
            &property.id,
            locale.as_str(),
            &property.slug,
            slug_base(&property.address),
            &property.postal_code,
            &property.meta.type_code,
            property.address.resolve(locale),
            json,
            now,
        ],
    )?;
    debug!(target: TARGET_DB, id = %property.id, slug = %property.slug, "Upserted property");
    Ok(())
}

fn insert_observation(
    tx: &Connection,
    locale: Locale,
    listing_id: &str,
    listing: &RawListing,
    now: NaiveDateTime,
) -> Result<()> {
    let raw_json = serde_json::to_string(listing)?;
    tx.execute(
        r#"
        INSERT INTO listing_observations (listing_id, locale, observed_at, raw_json)
        VALUES (?1, ?2, ?3, ?4)
        "#,
        params![listing_id, locale.as_str(), now, raw_json],
    )?;
    Ok(())
}

/// Latest snapshot for a slug in the given locale.
pub fn load_property(db: &Database, slug: &str, locale: Locale) -> Result<Option<Property>> {
    let json: Option<String> = db.with_conn(|conn| {
        conn.query_row(
            "SELECT json FROM properties WHERE slug = ?1 AND locale = ?2",
            params![slug, locale.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(NormalizerError::from)
    })?;

    match json {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Every stored slug with the address and postal code it was issued for,
/// oldest first. Used to seed a `SlugRegistry` so slugs survive between runs.
pub fn load_issued_slugs(db: &Database) -> Result<Vec<IssuedSlug>> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(
            r#"
            SELECT id, slug, slug_base, postal_code
            FROM properties
            ORDER BY updated_at, id, locale
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?, // id
                row.get::<_, String>(1)?, // slug
                row.get::<_, String>(2)?, // slug_base
                row.get::<_, String>(3)?, // postal_code
            ))
        })?;

        let mut out = Vec::new();
        for r in rows {
            let (id, slug, base, postal_code) = r?;
            let postal = Some(postal_code.as_str()).filter(|p| !p.is_empty());
            out.push(IssuedSlug::new(id, slug, &base, postal));
        }
        Ok(out)
    })
}

/// Number of raw observations stored for a listing.
pub fn count_observations(db: &Database, listing_id: &str) -> Result<i64> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT COUNT(*) FROM listing_observations WHERE listing_id = ?1",
            params![listing_id],
            |row| row.get(0),
        )
        .map_err(NormalizerError::from)
    })
}
