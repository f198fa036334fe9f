use crate::domain::Locale;
use crate::TARGET_MAPPER;
use serde_json::Value;
use tracing::warn;

const AFFIRMATIVE: [&str; 6] = ["kyllä", "ja", "yes", "on", "1", "true"];
const NEGATIVE: [&str; 6] = ["ei", "nej", "no", "off", "0", "false"];

/// Tri-state reading of a yes/no-like value.
///
/// Accepts Finnish, Swedish and English words, `1`/`0` and JSON booleans,
/// optionally wrapped in up to two levels of `{ fi: .. }` / `{ value: .. }`
/// nesting. Unrecognised vocabulary is logged and reads as `None`; blank
/// input is simply `None`.
pub fn normalize_bool(value: &Value) -> Option<bool> {
    let scalar = unwrap_nested(value, 2)?;
    let parsed = classify(scalar);
    if parsed.is_none() && !is_blank(scalar) {
        warn!(target: TARGET_MAPPER, value = %scalar, "Unrecognized boolean value");
    }
    parsed
}

/// Classification without logging.
pub fn classify(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_f64() {
            Some(x) if x == 1.0 => Some(true),
            Some(x) if x == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => {
            let word = s.trim().to_lowercase();
            if AFFIRMATIVE.contains(&word.as_str()) {
                Some(true)
            } else if NEGATIVE.contains(&word.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn unwrap_nested(value: &Value, depth: usize) -> Option<&Value> {
    match value {
        Value::Object(map) if depth > 0 => {
            let inner = map.get("value").or_else(|| {
                Locale::ALL
                    .iter()
                    .find_map(|locale| map.get(locale.as_str()))
            })?;
            unwrap_nested(inner, depth - 1)
        }
        Value::Object(_) | Value::Array(_) | Value::Null => None,
        scalar => Some(scalar),
    }
}

fn is_blank(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn affirmative_words() {
        for v in [json!("Kyllä"), json!("Ja"), json!("Yes"), json!("1"), json!(true)] {
            assert_eq!(normalize_bool(&v), Some(true), "{v}");
        }
        assert_eq!(normalize_bool(&json!(1)), Some(true));
        assert_eq!(normalize_bool(&json!(" ON ")), Some(true));
    }

    #[test]
    fn negative_words() {
        for v in [json!("Ei"), json!("Nej"), json!("No"), json!("0"), json!(false)] {
            assert_eq!(normalize_bool(&v), Some(false), "{v}");
        }
        assert_eq!(normalize_bool(&json!(0)), Some(false));
    }

    #[test]
    fn unknown_vocabulary_is_none() {
        assert_eq!(normalize_bool(&json!("unknown")), None);
        assert_eq!(normalize_bool(&json!(2)), None);
        assert_eq!(normalize_bool(&json!("")), None);
    }

    #[test]
    fn unwraps_localized_nesting() {
        assert_eq!(normalize_bool(&json!({ "fi": { "value": "Kyllä" } })), Some(true));
        assert_eq!(normalize_bool(&json!({ "value": "Nej" })), Some(false));
        assert_eq!(normalize_bool(&json!({ "sv": "ja" })), Some(true));
    }

    #[test]
    fn gives_up_after_two_levels() {
        assert_eq!(
            normalize_bool(&json!({ "fi": { "value": { "value": "Kyllä" } } })),
            None
        );
    }
}
