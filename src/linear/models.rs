use crate::domain::Locale;
use crate::errors::{NormalizerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// listing
//  ├── address            "Mannerheimintie 1"
//  │                      | { fi: "..", sv: "..", en: ".." }
//  │                      | { fi: { value: ".." }, sv: { value: ".." } }
//  ├── debtFreePrice      "650 000 €" (NBSP thousands separators are common)
//  ├── housingCooperativeElevator
//  │                      { fi: { value: "Kyllä" }, sv: { value: "Ja" } }
//  ├── images             [ { url, isFloorPlan, description }, ... ]
//  ├── realtor | agent    two differently shaped contact objects
//  └── nonLocalizedValues
//       ├── id
//       ├── askPrice
//       └── debtFreePrice ...   flat keys, preferred over the fields above

const NON_LOCALIZED_KEY: &str = "nonLocalizedValues";

// Nested `{ value: .. }` wrappers are unwrapped at most this many times.
const MAX_WRAPPER_DEPTH: usize = 2;

/// One listing exactly as the listings API delivered it.
///
/// The payload is untyped JSON with inconsistent field names, so this type
/// only offers narrowing accessors. Everything typed lives in
/// [`crate::domain::Property`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawListing {
    fields: Map<String, Value>,
}

impl RawListing {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(NormalizerError::UnexpectedShape(format!(
                "listing must be an object, got {}",
                kind_of(&other)
            ))),
        }
    }

    /// A top-level field, narrowed.
    pub fn field(&self, name: &str) -> RawField {
        self.fields
            .get(name)
            .map(RawField::narrow)
            .unwrap_or(RawField::Absent)
    }

    /// A key of the `nonLocalizedValues` bag, narrowed.
    pub fn flat(&self, name: &str) -> RawField {
        self.fields
            .get(NON_LOCALIZED_KEY)
            .and_then(Value::as_object)
            .and_then(|bag| bag.get(name))
            .map(RawField::narrow)
            .unwrap_or(RawField::Absent)
    }

    pub fn object(&self, name: &str) -> Option<&Map<String, Value>> {
        self.fields.get(name).and_then(Value::as_object)
    }

    pub fn array(&self, name: &str) -> Option<&Vec<Value>> {
        self.fields.get(name).and_then(Value::as_array)
    }

    pub fn as_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl From<Map<String, Value>> for RawListing {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

/// The canonical form of any upstream field.
///
/// Every shape the API uses for a single field is narrowed to one of these
/// variants by [`RawField::narrow`]; nothing downstream looks at the JSON shape.
/// Scalars are kept as JSON values (string, number or bool).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawField {
    #[default]
    Absent,
    /// A locale-agnostic scalar.
    Plain(Value),
    Localized {
        fi: Option<Value>,
        sv: Option<Value>,
        en: Option<Value>,
    },
}

impl RawField {
    pub fn narrow(value: &Value) -> Self {
        match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) => RawField::Plain(value.clone()),
            Value::Object(map) if Locale::ALL.iter().any(|l| map.contains_key(l.as_str())) => {
                let entry = |locale: Locale| {
                    map.get(locale.as_str())
                        .and_then(|v| unwrap_scalar(v, MAX_WRAPPER_DEPTH))
                };
                RawField::Localized {
                    fi: entry(Locale::Fi),
                    sv: entry(Locale::Sv),
                    en: entry(Locale::En),
                }
            }
            Value::Object(_) => unwrap_scalar(value, MAX_WRAPPER_DEPTH)
                .map(RawField::Plain)
                .unwrap_or(RawField::Absent),
            Value::Null | Value::Array(_) => RawField::Absent,
        }
    }

    /// The scalar for `locale`. Plain values answer for every locale.
    pub fn entry(&self, locale: Locale) -> Option<&Value> {
        match self {
            RawField::Absent => None,
            RawField::Plain(value) => Some(value),
            RawField::Localized { fi, sv, en } => match locale {
                Locale::Fi => fi.as_ref(),
                Locale::Sv => sv.as_ref(),
                Locale::En => en.as_ref(),
            },
        }
    }
}

/// Peel `{ value: .. }` wrappers until a scalar is reached.
fn unwrap_scalar(value: &Value, depth: usize) -> Option<Value> {
    match value {
        Value::String(_) | Value::Number(_) | Value::Bool(_) => Some(value.clone()),
        Value::Object(map) if depth > 0 => map
            .get("value")
            .and_then(|inner| unwrap_scalar(inner, depth - 1)),
        _ => None,
    }
}

/// Text form of a scalar. Integral numbers print without a fraction.
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
