// src/domain/property.rs

use crate::domain::locale::Locale;
use crate::normalize::energy::EnergyCertificateStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Text in the three site languages.
///
/// `fi` is always present (possibly empty). `sv` and `en` are `None` when the
/// upstream listing carried no translation; they are never filled with a copy
/// of the Finnish text. Consumers pick their own fallback via [`resolve`].
///
/// [`resolve`]: LocalizedValue::resolve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedValue {
    pub fi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl LocalizedValue {
    /// Finnish-only value.
    pub fn new(fi: impl Into<String>) -> Self {
        Self {
            fi: fi.into(),
            sv: None,
            en: None,
        }
    }

    /// Same text in every slot. Used where the text is not language specific,
    /// e.g. an unrecognised type code passed through as-is.
    pub fn uniform(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            fi: text.clone(),
            sv: Some(text.clone()),
            en: Some(text),
        }
    }

    /// The translation for `locale`, without any fallback.
    pub fn get(&self, locale: Locale) -> Option<&str> {
        match locale {
            Locale::Fi => Some(self.fi.as_str()),
            Locale::Sv => self.sv.as_deref(),
            Locale::En => self.en.as_deref(),
        }
    }

    /// The translation for `locale`, falling back to Finnish.
    pub fn resolve(&self, locale: Locale) -> &str {
        self.get(locale)
            .filter(|s| !s.is_empty())
            .unwrap_or(self.fi.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fi.is_empty()
            && self.sv.as_deref().map_or(true, str::is_empty)
            && self.en.as_deref().map_or(true, str::is_empty)
    }
}

/// The normalized listing every consumer renders from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub slug: String,

    pub address: LocalizedValue,
    pub postal_code: String,
    pub city: LocalizedValue,
    pub district: LocalizedValue,

    pub title: LocalizedValue,
    pub description: LocalizedValue,

    pub pricing: Pricing,
    pub dimensions: Dimensions,
    pub fees: Fees,
    pub features: Features,
    pub meta: Meta,
    pub media: Media,
    pub documents: Documents,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent: Option<Agent>,
    /// Present only for rental listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental: Option<Rental>,
}

impl Property {
    pub fn is_rental(&self) -> bool {
        self.rental.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_free: Option<f64>,
    /// `max(0, debt_free - sales)`, only when both prices resolved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt: Option<f64>,
}

impl Pricing {
    pub fn new(sales: Option<f64>, debt_free: Option<f64>) -> Self {
        let debt = match (sales, debt_free) {
            (Some(sales), Some(debt_free)) => Some((debt_free - sales).max(0.0)),
            _ => None,
        };
        Self {
            sales,
            debt_free,
            debt,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot_area: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<f64>,
}

/// Monthly charges in euros. Zero is meaningful here ("included").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fees {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balcony: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrace: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sauna: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fireplace: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub status: LocalizedValue,
    /// Discriminant for apartment / estate / rental views. Never empty.
    pub type_code: String,
    pub listing_type: LocalizedValue,
    pub condition: LocalizedValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_certificate: Option<EnergyCertificateStatus>,
    pub heating: LocalizedValue,
    pub ventilation: LocalizedValue,
    pub ownership_type: LocalizedValue,
    pub plot_ownership: LocalizedValue,
    pub availability: LocalizedValue,
    pub zoning: LocalizedValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_count: Option<u32>,
    pub floor: LocalizedValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevator: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub housing_company_loan: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub housing_company_encumbrance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub housing_company_loans_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub images: Vec<Image>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    pub floor_plan: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedValue>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brochure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub international_brochure: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_certificate: Option<String>,
}

impl Documents {
    /// `(field name, url)` for every document that is set.
    pub fn urls(&self) -> Vec<(&'static str, &str)> {
        [
            ("documents.floorPlan", &self.floor_plan),
            ("documents.brochure", &self.brochure),
            ("documents.internationalBrochure", &self.international_brochure),
            ("documents.video", &self.video),
            ("documents.energyCertificate", &self.energy_certificate),
        ]
        .into_iter()
        .filter_map(|(name, url)| url.as_deref().map(|u| (name, u)))
        .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub monthly_rent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposit: Option<f64>,
    pub contract_type: LocalizedValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debt_is_clamped_at_zero() {
        let pricing = Pricing::new(Some(700_000.0), Some(650_000.0));
        assert_eq!(pricing.debt, Some(0.0));

        let pricing = Pricing::new(Some(500_000.0), Some(650_000.0));
        assert_eq!(pricing.debt, Some(150_000.0));
    }

    #[test]
    fn debt_requires_both_prices() {
        assert_eq!(Pricing::new(None, Some(650_000.0)).debt, None);
        assert_eq!(Pricing::new(Some(500_000.0), None).debt, None);
    }

    #[test]
    fn localized_value_falls_back_only_on_request() {
        let value = LocalizedValue::new("Sauna");
        assert_eq!(value.get(Locale::Sv), None);
        assert_eq!(value.resolve(Locale::Sv), "Sauna");

        let value = LocalizedValue {
            fi: "Parveke".into(),
            sv: Some("Balkong".into()),
            en: None,
        };
        assert_eq!(value.resolve(Locale::Sv), "Balkong");
        assert_eq!(value.resolve(Locale::En), "Parveke");
    }

    #[test]
    fn missing_translations_are_not_serialized() {
        let json = serde_json::to_value(LocalizedValue::new("Helsinki")).unwrap();
        assert_eq!(json, serde_json::json!({ "fi": "Helsinki" }));
    }
}
