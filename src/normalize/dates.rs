use chrono::{DateTime, NaiveDate};

/// Calendar date from the formats the listings API mixes: `d.m.yyyy`,
/// `yyyy-mm-dd` and RFC 3339 timestamps. Anything else is `None`.
pub fn parse_listing_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%d.%m.%Y")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}
