use crate::domain::{Locale, LocalizedValue};
use crate::linear::{scalar_text, RawField, RawListing};
use crate::normalize::booleans::normalize_bool;
use crate::normalize::localized::localized;
use crate::normalize::numbers::{first_valid_number, parse_number, NumberPolicy};
use serde_json::Value;

/// Where a value may live in a raw listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// A key of the `nonLocalizedValues` bag.
    Flat(&'static str),
    /// A top-level field, read for the requested locale, then for Finnish.
    Field(&'static str),
    /// A top-level field read for one fixed locale only.
    FieldIn(&'static str, Locale),
}

/// First `Some` produced by `lookup` over `candidates`, in order.
/// Later candidates are never read once one has answered.
pub fn first_present<C, T, F>(candidates: &[C], lookup: F) -> Option<T>
where
    F: FnMut(&C) -> Option<T>,
{
    candidates.iter().find_map(lookup)
}

/// Resolves candidate chains against one listing for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    listing: &'a RawListing,
    locale: Locale,
}

impl<'a> Resolver<'a> {
    pub fn new(listing: &'a RawListing, locale: Locale) -> Self {
        Self { listing, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn listing(&self) -> &'a RawListing {
        self.listing
    }

    pub fn field(&self, candidate: Candidate) -> RawField {
        match candidate {
            Candidate::Flat(key) => self.listing.flat(key),
            Candidate::Field(key) | Candidate::FieldIn(key, _) => self.listing.field(key),
        }
    }

    /// The scalar a single candidate points at, skipping blank strings.
    pub fn value(&self, candidate: Candidate) -> Option<Value> {
        let field = self.field(candidate);
        let (primary, fallback) = match candidate {
            Candidate::FieldIn(_, locale) => (locale, None),
            Candidate::Flat(_) | Candidate::Field(_) => (self.locale, Some(Locale::Fi)),
        };
        std::iter::once(primary)
            .chain(fallback)
            .filter_map(|locale| field.entry(locale))
            .find(|value| !is_blank(value))
            .cloned()
    }

    /// First non-blank text, trimmed.
    pub fn text(&self, candidates: &[Candidate]) -> Option<String> {
        first_present(candidates, |c| {
            self.value(*c)
                .map(|v| scalar_text(&v).trim().to_string())
                .filter(|t| !t.is_empty())
        })
    }

    /// First candidate that parses to a number the policy admits.
    pub fn number(&self, candidates: &[Candidate], policy: NumberPolicy) -> Option<f64> {
        first_present(candidates, |c| {
            self.value(*c)
                .and_then(|v| parse_number(&v))
                .filter(|n| policy.admits(*n))
        })
    }

    /// First candidate that reads as yes or no.
    /// First candidate holding a positive area.
    pub fn area(&self, candidates: &[Candidate]) -> Option<f64> {
        first_valid_number(candidates.iter().map(|c| self.value(*c)))
    }

    pub fn flag(&self, candidates: &[Candidate]) -> Option<bool> {
        first_present(candidates, |c| self.value(*c).and_then(|v| normalize_bool(&v)))
    }

    /// First candidate with any text, in all three locales.
    ///
    /// Flat keys carry no translations and produce Finnish-only values.
    pub fn localized(&self, candidates: &[Candidate]) -> LocalizedValue {
        first_present(candidates, |c| {
            let value = match c {
                Candidate::Flat(_) => self.text(&[*c]).map(LocalizedValue::new)?,
                Candidate::Field(_) | Candidate::FieldIn(..) => localized(&self.field(*c)),
            };
            (!value.is_empty()).then_some(value)
        })
        .unwrap_or_default()
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().is_empty())
}
