use crate::domain::LocalizedValue;
use crate::TARGET_MAPPER;
use tracing::warn;

/// Type code used when no source field names one.
pub const UNKNOWN_TYPE_CODE: &str = "UNKNOWN";

// (lookup key, fi, sv, en)
const LISTING_TYPES: &[(&str, &str, &str, &str)] = &[
    ("KERROSTALO", "Kerrostalo", "Flervåningshus", "Apartment building"),
    ("OMAKOTITALO", "Omakotitalo", "Egnahemshus", "Detached house"),
    ("RIVITALO", "Rivitalo", "Radhus", "Townhouse"),
    ("PARITALO", "Paritalo", "Parhus", "Semi-detached house"),
    ("LUHTITALO", "Luhtitalo", "Loftgångshus", "Terraced house"),
    ("MÖKKI_TAI_HUVILA", "Mökki tai huvila", "Stuga eller villa", "Cottage or villa"),
    ("MOKKI_TAI_HUVILA", "Mökki tai huvila", "Stuga eller villa", "Cottage or villa"),
    ("TONTTI", "Tontti", "Tomt", "Plot"),
    ("MAATILA", "Maatila", "Gård", "Farm"),
    ("LIIKEKIINTEISTÖ", "Liikekiinteistö", "Affärsfastighet", "Commercial property"),
    ("LIIKEKIINTEISTO", "Liikekiinteistö", "Affärsfastighet", "Commercial property"),
    ("TOIMISTO", "Toimisto", "Kontor", "Office"),
    ("TEOLLISUUS", "Teollisuuskiinteistö", "Industrifastighet", "Industrial property"),
    ("VARASTO", "Varasto", "Lager", "Warehouse"),
    ("VUOKRA_ASUNTO", "Vuokra-asunto", "Hyresbostad", "Rental apartment"),
    ("VUOKRATALO", "Vuokratalo", "Hyreshus", "Rental house"),
];

/// `"rivi talo "` → `"RIVI_TALO"`: trimmed, upper-cased, whitespace runs
/// replaced with one underscore.
pub fn normalize_type_code(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Three-locale label for a raw property-type code.
///
/// No code gives an empty value. A code missing from the table is passed
/// through in every locale so there is always something to display.
pub fn localize_listing_type(code: Option<&str>) -> LocalizedValue {
    let raw = match code.map(str::trim).filter(|c| !c.is_empty()) {
        Some(raw) => raw,
        None => return LocalizedValue::default(),
    };

    let key = normalize_type_code(raw).replace('-', "_");
    match LISTING_TYPES.iter().find(|(k, ..)| *k == key) {
        Some((_, fi, sv, en)) => LocalizedValue {
            fi: fi.to_string(),
            sv: Some(sv.to_string()),
            en: Some(en.to_string()),
        },
        None => {
            warn!(target: TARGET_MAPPER, code = raw, "Unrecognized listing type code");
            LocalizedValue::uniform(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code_is_translated() {
        let label = localize_listing_type(Some("KERROSTALO"));
        assert_eq!(label.fi, "Kerrostalo");
        assert_eq!(label.sv.as_deref(), Some("Flervåningshus"));
        assert_eq!(label.en.as_deref(), Some("Apartment building"));
    }

    #[test]
    fn lookup_ignores_case_and_padding() {
        assert_eq!(localize_listing_type(Some("  rivitalo ")).fi, "Rivitalo");
        assert_eq!(
            localize_listing_type(Some("vuokra-asunto")).en.as_deref(),
            Some("Rental apartment")
        );
        assert_eq!(
            localize_listing_type(Some("Mökki tai huvila")).sv.as_deref(),
            Some("Stuga eller villa")
        );
    }

    #[test]
    fn missing_code_is_empty() {
        assert_eq!(localize_listing_type(None), LocalizedValue::default());
        assert_eq!(localize_listing_type(Some("  ")), LocalizedValue::default());
    }

    #[test]
    fn unknown_code_passes_through() {
        assert_eq!(
            localize_listing_type(Some("Autotalli")),
            LocalizedValue::uniform("Autotalli")
        );
    }

    #[test]
    fn type_code_normalization() {
        assert_eq!(normalize_type_code(" rivi  talo "), "RIVI_TALO");
        assert_eq!(normalize_type_code("kerrostalo"), "KERROSTALO");
    }
}
