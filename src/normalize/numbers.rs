use serde_json::Value;
use std::borrow::Borrow;

/// Which parsed values a field group accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberPolicy {
    /// Any finite number (coordinates).
    Any,
    /// Zero means "none" or "free" (fees, loans, deposits).
    NonNegative,
    /// Zero would mean "not provided" (prices, areas, rent).
    Positive,
}

impl NumberPolicy {
    pub fn admits(&self, n: f64) -> bool {
        match self {
            NumberPolicy::Any => true,
            NumberPolicy::NonNegative => n >= 0.0,
            NumberPolicy::Positive => n > 0.0,
        }
    }
}

/// Parse a formatted euro amount or measurement, e.g. `"1 625 002,18 €"`,
/// `"85,5 m²"` or `"320 €/kk"`.
///
/// Text before the first digit (except a minus sign) and unit words after
/// the number are dropped, then everything except digits, `,`, `.` and `-`
/// is stripped (this removes every whitespace variant, including U+00A0 and
/// U+202F). Comma is the decimal separator.
pub fn parse_euro_amount(input: &str) -> Option<f64> {
    let start = input.find(|c: char| c.is_ascii_digit())?;
    let end = input[start..]
        .find(char::is_alphabetic)
        .map_or(input.len(), |unit| start + unit);
    let negative = input[..start].trim_end().ends_with('-');

    let cleaned: String = std::iter::once('-')
        .filter(|_| negative)
        .chain(
            input[start..end]
                .chars()
                .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
                .map(|c| if c == ',' { '.' } else { c }),
        )
        .collect();

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// A number from a JSON scalar. Strings go through [`parse_euro_amount`].
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()),
        Value::String(s) => parse_euro_amount(s),
        _ => None,
    }
}

/// A physical dimension: strictly positive or nothing.
pub fn parse_area(value: &Value) -> Option<f64> {
    parse_number(value).filter(|n| NumberPolicy::Positive.admits(*n))
}

/// The first candidate that parses to a positive number.
pub fn first_valid_number<I, V>(candidates: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<V>>,
    V: Borrow<Value>,
{
    candidates
        .into_iter()
        .flatten()
        .find_map(|value| parse_area(value.borrow()))
}

pub fn to_count(n: f64) -> Option<u32> {
    let rounded = n.round();
    (rounded >= 1.0 && rounded <= f64::from(u32::MAX)).then(|| rounded as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_amount_with_regular_spaces() {
        assert_eq!(parse_euro_amount("1 625 002,18 €"), Some(1_625_002.18));
    }

    #[test]
    fn parses_amount_with_non_breaking_spaces() {
        assert_eq!(
            parse_euro_amount("1\u{a0}625\u{a0}002,18\u{a0}€"),
            Some(1_625_002.18)
        );
        assert_eq!(parse_euro_amount("98\u{202f}000 €"), Some(98_000.0));
    }

    #[test]
    fn drops_unit_suffixes() {
        assert_eq!(parse_euro_amount("85,5 m²"), Some(85.5));
        assert_eq!(parse_euro_amount("85 m2"), Some(85.0));
        assert_eq!(parse_euro_amount("320 €/kk"), Some(320.0));
        assert_eq!(parse_euro_amount("€ 1 200"), Some(1_200.0));
        assert_eq!(parse_euro_amount("n. 85 m²"), Some(85.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_euro_amount(""), None);
        assert_eq!(parse_euro_amount("ei tiedossa"), None);
        assert_eq!(parse_euro_amount("1.625.002,18"), None);
    }

    #[test]
    fn keeps_negative_numbers() {
        assert_eq!(parse_euro_amount("-12,5"), Some(-12.5));
    }

    #[test]
    fn parse_number_accepts_json_numbers() {
        assert_eq!(parse_number(&json!(500000)), Some(500_000.0));
        assert_eq!(parse_number(&json!("500000")), Some(500_000.0));
        assert_eq!(parse_number(&json!(true)), None);
    }

    #[test]
    fn area_must_be_positive() {
        assert_eq!(parse_area(&json!("0 m²")), None);
        assert_eq!(parse_area(&json!(-3)), None);
        assert_eq!(parse_area(&json!("62,5")), Some(62.5));
    }

    #[test]
    fn first_valid_number_skips_missing_and_zero() {
        let zero = json!("0");
        let text = json!("n/a");
        let plot = json!("1 200 m²");
        assert_eq!(
            first_valid_number([None, Some(&zero), Some(&text), Some(&plot)]),
            Some(1_200.0)
        );
        assert_eq!(first_valid_number([None, Some(&zero)]), None);
    }

    #[test]
    fn counts_are_positive_integers() {
        assert_eq!(to_count(1987.0), Some(1987));
        assert_eq!(to_count(4.4), Some(4));
        assert_eq!(to_count(0.0), None);
    }
}
