use crate::domain::{Locale, LocalizedValue};
use crate::linear::{scalar_text, RawField};

/// Text of `field` for `locale`.
///
/// Plain fields are locale-agnostic and come back unchanged. A missing or
/// empty translation yields an empty string; the caller owns the fallback.
pub fn extract(field: &RawField, locale: Locale) -> String {
    field.entry(locale).map(scalar_text).unwrap_or_default()
}

/// All three translations of `field`.
///
/// Swedish and English are `None` when the listing has no (or only blank)
/// text for them. A plain field is Finnish-only, so it never claims a
/// translation the source didn't provide.
pub fn localized(field: &RawField) -> LocalizedValue {
    match field {
        RawField::Absent => LocalizedValue::default(),
        RawField::Plain(value) => LocalizedValue::new(scalar_text(value).trim()),
        RawField::Localized { .. } => LocalizedValue {
            fi: extract(field, Locale::Fi).trim().to_string(),
            sv: translation(field, Locale::Sv),
            en: translation(field, Locale::En),
        },
    }
}

fn translation(field: &RawField, locale: Locale) -> Option<String> {
    let text = extract(field, locale);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
