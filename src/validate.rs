// validate.rs
use crate::domain::Property;
use chrono::{Datelike, Utc};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use url::Url;

const EARLIEST_BUILD_YEAR: u32 = 1600;
const BUILD_YEAR_LOOKAHEAD: u32 = 10;

/// One problem found in an assembled [`Property`]. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: String,
}

impl ValidationIssue {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern compiles"));

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_RE.is_match(slug)
}

/// Check the output contract. An empty result means the record is clean.
pub fn validate_property(property: &Property) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if property.id.trim().is_empty() {
        issues.push(ValidationIssue::new("id", "must not be empty"));
    }
    if !is_valid_slug(&property.slug) {
        issues.push(ValidationIssue::new(
            "slug",
            format!("{:?} is not a URL-safe slug", property.slug),
        ));
    }
    if property.address.fi.trim().is_empty() {
        issues.push(ValidationIssue::new("address.fi", "must not be empty"));
    }
    if property.meta.type_code.is_empty() {
        issues.push(ValidationIssue::new("meta.typeCode", "must not be empty"));
    }

    let pricing = &property.pricing;
    for (field, value) in [("pricing.sales", pricing.sales), ("pricing.debtFree", pricing.debt_free)] {
        if matches!(value, Some(v) if v <= 0.0) {
            issues.push(ValidationIssue::new(field, "must be positive"));
        }
    }
    if let Some(debt) = pricing.debt {
        let expected = match (pricing.sales, pricing.debt_free) {
            (Some(sales), Some(debt_free)) => Some((debt_free - sales).max(0.0)),
            _ => None,
        };
        if debt < 0.0 || expected.map_or(true, |e| (e - debt).abs() > f64::EPSILON) {
            issues.push(ValidationIssue::new(
                "pricing.debt",
                format!("{debt} does not equal max(0, debtFree - sales)"),
            ));
        }
    }

    let dims = &property.dimensions;
    for (field, value) in [
        ("dimensions.livingArea", dims.living_area),
        ("dimensions.totalArea", dims.total_area),
        ("dimensions.plotArea", dims.plot_area),
        ("dimensions.rooms", dims.rooms),
    ] {
        if matches!(value, Some(v) if v <= 0.0) {
            issues.push(ValidationIssue::new(field, "must be positive"));
        }
    }

    let fees = &property.fees;
    for (field, value) in [
        ("fees.maintenance", fees.maintenance),
        ("fees.financing", fees.financing),
        ("fees.water", fees.water),
        ("fees.heating", fees.heating),
    ] {
        if matches!(value, Some(v) if v < 0.0) {
            issues.push(ValidationIssue::new(field, "must not be negative"));
        }
    }

    if let Some(year) = property.meta.build_year {
        let latest = u32::try_from(Utc::now().year())
            .unwrap_or(u32::MAX)
            .saturating_add(BUILD_YEAR_LOOKAHEAD);
        if !(EARLIEST_BUILD_YEAR..=latest).contains(&year) {
            issues.push(ValidationIssue::new(
                "meta.buildYear",
                format!("{year} is outside {EARLIEST_BUILD_YEAR}..={latest}"),
            ));
        }
    }

    for image in &property.media.images {
        if !is_web_url(&image.url) {
            issues.push(ValidationIssue::new(
                "media.images",
                format!("{:?} is not an absolute http(s) URL", image.url),
            ));
        }
    }
    if let Some(coords) = property.media.coordinates {
        if !(-90.0..=90.0).contains(&coords.lat) || !(-180.0..=180.0).contains(&coords.lon) {
            issues.push(ValidationIssue::new(
                "media.coordinates",
                format!("({}, {}) is out of range", coords.lat, coords.lon),
            ));
        }
    }

    for (field, url) in property.documents.urls() {
        if !is_web_url(url) {
            issues.push(ValidationIssue::new(
                field,
                format!("{url:?} is not an absolute http(s) URL"),
            ));
        }
    }

    if let Some(rental) = &property.rental {
        if rental.monthly_rent <= 0.0 {
            issues.push(ValidationIssue::new("rental.monthlyRent", "must be positive"));
        }
    }

    issues
}

fn is_web_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinates, Image, LocalizedValue, Meta, Pricing};

    fn clean_property() -> Property {
        Property {
            id: "123".into(),
            slug: "mannerheimintie-1".into(),
            address: LocalizedValue::new("Mannerheimintie 1"),
            pricing: Pricing::new(Some(500_000.0), Some(650_000.0)),
            meta: Meta {
                type_code: "KERROSTALO".into(),
                build_year: Some(1962),
                ..Meta::default()
            },
            ..Property::default()
        }
    }

    #[test]
    fn clean_property_has_no_issues() {
        assert!(validate_property(&clean_property()).is_empty());
    }

    #[test]
    fn slug_shape() {
        assert!(is_valid_slug("mannerheimintie-1-00100"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-a"));
        assert!(!is_valid_slug("a--b"));
        assert!(!is_valid_slug("Hämeentie"));
    }

    #[test]
    fn reports_missing_address_and_bad_debt() {
        let mut property = clean_property();
        property.address = LocalizedValue::default();
        property.pricing.debt = Some(-1.0);

        let fields: Vec<_> = validate_property(&property).into_iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["address.fi", "pricing.debt"]);
    }

    #[test]
    fn reports_bad_urls_and_coordinates() {
        let mut property = clean_property();
        property.documents.brochure = Some("esite.pdf".into());
        property.media.images.push(Image {
            url: "https://cdn.example.fi/1.jpg".into(),
            floor_plan: false,
            description: None,
        });
        property.media.coordinates = Some(Coordinates { lat: 160.2, lon: 24.9 });

        let fields: Vec<_> = validate_property(&property).into_iter().map(|i| i.field).collect();
        assert_eq!(fields, vec!["media.coordinates", "documents.brochure"]);
    }

    #[test]
    fn reports_implausible_build_year() {
        let mut property = clean_property();
        property.meta.build_year = Some(1066);
        let issues = validate_property(&property);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "meta.buildYear");
    }
}
