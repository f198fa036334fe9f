// mapper.rs
use crate::domain::{
    Coordinates, Dimensions, Documents, Features, Fees, Image, Locale, Media, Meta, Pricing,
    Property, Rental,
};
use crate::linear::{RawField, RawListing};
use crate::normalize::agent::{clean_agent, unify_agent, web_url};
use crate::normalize::dates::parse_listing_date;
use crate::normalize::fallback::{Candidate, Resolver};
use crate::normalize::numbers::{parse_number, to_count, NumberPolicy};
use crate::normalize::listing_type::UNKNOWN_TYPE_CODE;
use crate::normalize::{
    classify_energy_certificate, localize_listing_type, localized, normalize_bool,
    normalize_type_code, slug_base, SlugRegistry,
};
use crate::validate::validate_property;
use crate::{TARGET_MAPPER, TARGET_VALIDATION};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use tracing::{debug, warn};

use Candidate::{Field, FieldIn, Flat};

const GENERATED_ID_PREFIX: &str = "gen-";
use Locale::Fi;

// ----- Identity & address -----
const ID: &[Candidate] = &[Flat("id"), Field("id"), Flat("listingId")];
const ADDRESS: &[Candidate] = &[Field("address"), Field("streetAddress"), Flat("address")];
const POSTAL_CODE: &[Candidate] = &[Flat("postalCode"), Field("postalCode"), Field("zipCode")];
const CITY: &[Candidate] = &[Field("city"), Field("municipality")];
const DISTRICT: &[Candidate] = &[Field("district"), Field("neighbourhood")];
const TITLE: &[Candidate] = &[Field("title"), Field("headline")];
const DESCRIPTION: &[Candidate] = &[Field("description"), Field("freeText")];

// ----- Pricing -----
const SALES_PRICE: &[Candidate] = &[
    Flat("askPrice"),
    Flat("salesPrice"),
    Field("askPrice"),
    Field("salesPrice"),
];
const DEBT_FREE_PRICE: &[Candidate] = &[
    Flat("debtFreePrice"),
    Field("debtFreePrice"),
    Field("unencumberedSalesPrice"),
];

// ----- Dimensions -----
const LIVING_AREA: &[Candidate] = &[
    Flat("livingArea"),
    Field("livingArea"),
    FieldIn("area", Fi),
    FieldIn("livingAreaM2", Fi),
];
const TOTAL_AREA: &[Candidate] = &[Flat("totalArea"), Field("totalArea"), FieldIn("overallArea", Fi)];
const PLOT_AREA: &[Candidate] = &[
    Flat("plotArea"),
    Field("plotArea"),
    FieldIn("lotArea", Fi),
    FieldIn("siteArea", Fi),
];
const ROOMS: &[Candidate] = &[Flat("roomCount"), Field("roomCount"), Field("numberOfRooms")];

// ----- Fees -----
const MAINTENANCE_FEE: &[Candidate] = &[
    Flat("maintenanceFee"),
    Field("maintenanceFee"),
    Field("maintenanceCharge"),
];
const FINANCING_FEE: &[Candidate] = &[
    Flat("financingFee"),
    Field("financingFee"),
    Field("capitalCharge"),
];
const WATER_FEE: &[Candidate] = &[Flat("waterFee"), Field("waterFee"), Field("waterCharge")];
const HEATING_FEE: &[Candidate] = &[Flat("heatingFee"), Field("heatingCharge")];

// ----- Features -----
const BALCONY: &[Candidate] = &[Flat("hasBalcony"), Field("hasBalcony"), Field("balcony")];
const TERRACE: &[Candidate] = &[Flat("hasTerrace"), Field("hasTerrace"), Field("terrace")];
const SAUNA: &[Candidate] = &[
    Flat("hasSauna"),
    Field("hasSauna"),
    Field("sauna"),
    Field("housingCooperativeSauna"),
];
const FIREPLACE: &[Candidate] = &[Flat("hasFireplace"), Field("hasFireplace"), Field("fireplace")];
const STORAGE: &[Candidate] = &[Flat("hasStorage"), Field("hasStorage"), Field("storage")];
const PARKING: &[Candidate] = &[Flat("hasParking"), Field("hasParking"), Field("parkingSpace")];

// ----- Meta -----
const STATUS: &[Candidate] = &[Field("status"), Flat("status")];
const TYPE_CODE: &[Candidate] = &[Flat("listingType"), Field("listingType"), Field("propertyType")];
const CONDITION: &[Candidate] = &[Field("condition"), Field("generalCondition")];
const ENERGY_CLASS: &[Candidate] = &[Flat("energyClass"), Field("energyClass"), FieldIn("energyRating", Fi)];
const ENERGY_CERTIFICATE: &[Candidate] = &[
    Flat("listingHasEnergyCertificate"),
    Field("listingHasEnergyCertificate"),
];
const HEATING: &[Candidate] = &[Field("heatingSystem"), Field("heating")];
const VENTILATION: &[Candidate] = &[Field("ventilationSystem"), Field("ventilation")];
const OWNERSHIP_TYPE: &[Candidate] = &[Field("ownershipType"), Field("typeOfOwnership")];
const PLOT_OWNERSHIP: &[Candidate] = &[Field("siteOwnershipType"), Field("lotOwnership")];
const AVAILABILITY: &[Candidate] = &[Field("availability"), Field("release")];
const ZONING: &[Candidate] = &[Field("zoningDetails"), Field("zoning")];
const BUILD_YEAR: &[Candidate] = &[
    Flat("completeYear"),
    Field("completeYear"),
    Field("constructionYear"),
];
const FLOOR_COUNT: &[Candidate] = &[
    Flat("floorCount"),
    Field("housingCooperativeFloorCount"),
    Field("floorCount"),
];
const FLOOR: &[Candidate] = &[Field("floorLocation"), Field("floor")];
const ELEVATOR: &[Candidate] = &[
    Flat("housingCooperativeElevator"),
    Field("housingCooperativeElevator"),
    Field("elevator"),
];
const HOUSING_COMPANY_LOAN: &[Candidate] = &[
    Flat("housingCooperativeLoansAmount"),
    Field("housingCooperativeLoansAmount"),
    Field("housingCompanyLoans"),
];
const HOUSING_COMPANY_ENCUMBRANCE: &[Candidate] = &[
    Flat("housingCooperativeMortgage"),
    Field("housingCooperativeMortgage"),
];
const HOUSING_COMPANY_LOANS_DATE: &[Candidate] = &[
    Field("housingCooperativeLoansDate"),
    Field("housingCompanyLoansDate"),
];

// ----- Media & documents -----
const LATITUDE: &[Candidate] = &[Flat("latitude"), Field("latitude"), Field("lat")];
const LONGITUDE: &[Candidate] = &[Flat("longitude"), Field("longitude"), Field("lon"), Field("lng")];
const COORDINATE_OBJECTS: [&str; 3] = ["coordinates", "location", "geo"];
const IMAGE_URL_KEYS: [&str; 4] = ["url", "original", "compressed", "src"];

const FLOOR_PLAN_DOC: &[Candidate] = &[Flat("floorPlanUrl"), Field("floorPlanUrl"), Field("floorPlan")];
const BROCHURE_DOC: &[Candidate] = &[Flat("brochureUrl"), Field("brochureUrl"), Field("brochure")];
const INTERNATIONAL_BROCHURE_DOC: &[Candidate] = &[
    Flat("internationalBrochureUrl"),
    Field("internationalBrochureUrl"),
    Field("internationalBrochure"),
];
const VIDEO_DOC: &[Candidate] = &[
    Flat("videoUrl"),
    Field("videoUrl"),
    Field("virtualPresentation"),
    Field("video"),
];
const ENERGY_CERTIFICATE_DOC: &[Candidate] = &[
    Flat("energyCertificateUrl"),
    Field("energyCertificateUrl"),
    Field("energyCertificateFile"),
];

// ----- Rental -----
const MONTHLY_RENT: &[Candidate] = &[Flat("rent"), Flat("rentPerMonth"), Field("rent")];
const DEPOSIT: &[Candidate] = &[
    Flat("securityDeposit"),
    Field("securityDeposit"),
    Field("rentSecurityDeposit"),
];
const CONTRACT_TYPE: &[Candidate] = &[Field("rentalContractType"), Field("leaseType")];

/// Turns raw Linear listings into [`Property`] records.
///
/// Mapping is infallible: fields that cannot be read are left empty and
/// problems are logged. The mapper owns the session's [`SlugRegistry`], so
/// every listing mapped through one instance gets a unique slug.
#[derive(Debug, Default)]
pub struct LinearMapper {
    slugs: SlugRegistry,
    // Slugs handed out by the running `map_all` call.
    batch: Option<HashSet<String>>,
}

impl LinearMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue a session, e.g. with slugs loaded from the snapshot store.
    pub fn with_registry(slugs: SlugRegistry) -> Self {
        Self { slugs, batch: None }
    }

    pub fn registry(&self) -> &SlugRegistry {
        &self.slugs
    }

    pub fn into_registry(self) -> SlugRegistry {
        self.slugs
    }

    /// Map one batch. Every record in the result has a distinct slug, even
    /// when the batch repeats a listing.
    pub fn map_all(&mut self, listings: &[RawListing], locale: Locale) -> Vec<Property> {
        self.batch = Some(HashSet::with_capacity(listings.len()));
        let properties = listings.iter().map(|l| self.map(l, locale)).collect();
        self.batch = None;
        properties
    }

    pub fn map(&mut self, listing: &RawListing, locale: Locale) -> Property {
        let r = Resolver::new(listing, locale);

        // ----- Address & slug -----
        let address = r.localized(ADDRESS);
        let postal_code = r.text(POSTAL_CODE).unwrap_or_default();
        let city = r.localized(CITY);
        let id = r.text(ID).unwrap_or_else(|| generated_id(listing));

        let base = slug_base(&address);
        let postal = Some(postal_code.as_str()).filter(|p| !p.is_empty());
        let mut slug = self.slugs.reserve(&id, &base, postal);
        if let Some(batch) = self.batch.as_mut() {
            if !batch.insert(slug.clone()) {
                slug = self.slugs.reserve_new(&id, &base, postal);
                batch.insert(slug.clone());
            }
        }

        // ----- Pricing, dimensions, fees -----
        let pricing = Pricing::new(
            r.number(SALES_PRICE, NumberPolicy::Positive),
            r.number(DEBT_FREE_PRICE, NumberPolicy::Positive),
        );

        let dimensions = Dimensions {
            living_area: r.area(LIVING_AREA),
            total_area: r.area(TOTAL_AREA),
            plot_area: r.area(PLOT_AREA),
            rooms: r.number(ROOMS, NumberPolicy::Positive),
        };

        let fees = Fees {
            maintenance: r.number(MAINTENANCE_FEE, NumberPolicy::NonNegative),
            financing: r.number(FINANCING_FEE, NumberPolicy::NonNegative),
            water: r.number(WATER_FEE, NumberPolicy::NonNegative),
            heating: r.number(HEATING_FEE, NumberPolicy::NonNegative),
        };

        let features = Features {
            balcony: r.flag(BALCONY),
            terrace: r.flag(TERRACE),
            sauna: r.flag(SAUNA),
            fireplace: r.flag(FIREPLACE),
            storage: r.flag(STORAGE),
            parking: r.flag(PARKING),
        };

        let meta = build_meta(&r);
        let media = Media {
            images: collect_images(listing),
            coordinates: resolve_coordinates(&r),
        };
        let documents = Documents {
            floor_plan: document_url(&r, FLOOR_PLAN_DOC),
            brochure: document_url(&r, BROCHURE_DOC),
            international_brochure: document_url(&r, INTERNATIONAL_BROCHURE_DOC),
            video: document_url(&r, VIDEO_DOC),
            energy_certificate: document_url(&r, ENERGY_CERTIFICATE_DOC),
        };

        // ----- Agent -----
        let draft = unify_agent(listing.object("realtor"), listing.object("agent"));
        let (agent, agent_warnings) = clean_agent(draft);
        for warning in agent_warnings {
            warn!(target: TARGET_MAPPER, address = %address.fi, id = %id, "{warning}");
        }

        // ----- Rental -----
        let rental = r
            .number(MONTHLY_RENT, NumberPolicy::Positive)
            .map(|monthly_rent| Rental {
                monthly_rent,
                deposit: r.number(DEPOSIT, NumberPolicy::NonNegative),
                contract_type: r.localized(CONTRACT_TYPE),
            });

        let property = Property {
            id,
            slug,
            address,
            postal_code,
            city,
            district: r.localized(DISTRICT),
            title: r.localized(TITLE),
            description: r.localized(DESCRIPTION),
            pricing,
            dimensions,
            fees,
            features,
            meta,
            media,
            documents,
            agent,
            rental,
        };

        for issue in validate_property(&property) {
            warn!(
                target: TARGET_VALIDATION,
                address = %property.address.fi,
                id = %property.id,
                "{issue}"
            );
        }

        debug!(
            target: TARGET_MAPPER,
            id = %property.id,
            slug = %property.slug,
            locale = %locale,
            "Mapped listing"
        );

        property
    }
}

fn build_meta(r: &Resolver<'_>) -> Meta {
    let raw_type = r.text(TYPE_CODE);
    let type_code = raw_type
        .as_deref()
        .map(normalize_type_code)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| UNKNOWN_TYPE_CODE.to_string());

    Meta {
        status: r.localized(STATUS),
        type_code,
        listing_type: localize_listing_type(raw_type.as_deref()),
        condition: r.localized(CONDITION),
        energy_class: r.text(ENERGY_CLASS),
        energy_certificate: r
            .text(ENERGY_CERTIFICATE)
            .and_then(|statement| classify_energy_certificate(&statement)),
        heating: r.localized(HEATING),
        ventilation: r.localized(VENTILATION),
        ownership_type: r.localized(OWNERSHIP_TYPE),
        plot_ownership: r.localized(PLOT_OWNERSHIP),
        availability: r.localized(AVAILABILITY),
        zoning: r.localized(ZONING),
        build_year: r.number(BUILD_YEAR, NumberPolicy::Positive).and_then(to_count),
        floor_count: r.number(FLOOR_COUNT, NumberPolicy::Positive).and_then(to_count),
        floor: r.localized(FLOOR),
        elevator: r.flag(ELEVATOR),
        housing_company_loan: r.number(HOUSING_COMPANY_LOAN, NumberPolicy::NonNegative),
        housing_company_encumbrance: r.number(HOUSING_COMPANY_ENCUMBRANCE, NumberPolicy::NonNegative),
        housing_company_loans_date: r
            .text(HOUSING_COMPANY_LOANS_DATE)
            .and_then(|d| parse_listing_date(&d)),
    }
}

/// `images` entries plus the dedicated `floorPlans` list, de-duplicated by URL.
fn collect_images(listing: &RawListing) -> Vec<Image> {
    let mut seen = HashSet::new();
    [("images", false), ("floorPlans", true)]
        .into_iter()
        .flat_map(|(key, floor_plan)| {
            listing
                .array(key)
                .into_iter()
                .flatten()
                .filter_map(move |entry| image_from(entry, floor_plan))
        })
        .filter(|image| seen.insert(image.url.clone()))
        .collect()
}

fn image_from(entry: &Value, floor_plan: bool) -> Option<Image> {
    match entry {
        Value::String(url) => Some(Image {
            url: normalize_url(url)?,
            floor_plan,
            description: None,
        }),
        Value::Object(map) => {
            let url = IMAGE_URL_KEYS
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .and_then(normalize_url)?;
            let description = ["description", "title"]
                .iter()
                .filter_map(|key| map.get(*key))
                .map(|v| localized(&RawField::narrow(v)))
                .find(|v| !v.is_empty());
            Some(Image {
                url,
                floor_plan: floor_plan || is_floor_plan(map),
                description,
            })
        }
        _ => None,
    }
}

fn is_floor_plan(map: &Map<String, Value>) -> bool {
    let flagged = map
        .get("isFloorPlan")
        .and_then(normalize_bool)
        .unwrap_or(false);
    let typed = map.get("type").and_then(Value::as_str).is_some_and(|t| {
        let t: String = t
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        t == "floorplan"
    });
    flagged || typed
}

fn resolve_coordinates(r: &Resolver<'_>) -> Option<Coordinates> {
    let direct = r
        .number(LATITUDE, NumberPolicy::Any)
        .zip(r.number(LONGITUDE, NumberPolicy::Any));

    let nested = || {
        COORDINATE_OBJECTS.iter().find_map(|key| {
            let obj = r.listing().object(key)?;
            let read = |keys: &[&str]| {
                keys.iter().find_map(|k| {
                    let field = RawField::narrow(obj.get(*k)?);
                    field.entry(Fi).and_then(parse_number)
                })
            };
            read(&["lat", "latitude"]).zip(read(&["lon", "lng", "longitude"]))
        })
    };

    direct
        .or_else(nested)
        .filter(|(lat, lon)| *lat != 0.0 || *lon != 0.0)
        .map(|(lat, lon)| Coordinates { lat, lon })
}

fn document_url(r: &Resolver<'_>, candidates: &[Candidate]) -> Option<String> {
    r.text(candidates).and_then(|raw| normalize_url(&raw))
}

/// Trimmed URL; protocol-relative links become https. Other malformed
/// values are kept for the validator to report.
fn normalize_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Some(web_url(raw).unwrap_or_else(|| raw.to_string()))
}

/// Deterministic id for listings that arrive without one, hashed from the
/// whole payload so two different listings never share it.
fn generated_id(listing: &RawListing) -> String {
    let canonical = serde_json::to_vec(listing).unwrap_or_default();
    let digest = Sha256::digest(&canonical);
    let hex: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
    debug!(target: TARGET_MAPPER, "Listing has no id, generated {GENERATED_ID_PREFIX}{hex}");
    format!("{GENERATED_ID_PREFIX}{hex}")
}
