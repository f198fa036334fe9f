// src/domain/locale.rs

use crate::errors::NormalizerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Site languages. Finnish is the authoritative source language of the
/// upstream payload; the other two are optional translations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fi,
    Sv,
    En,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Fi, Locale::Sv, Locale::En];

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Fi => "fi",
            Locale::Sv => "sv",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = NormalizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fi" => Ok(Locale::Fi),
            "sv" => Ok(Locale::Sv),
            "en" => Ok(Locale::En),
            other => Err(NormalizerError::UnsupportedLocale(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_locales_case_insensitively() {
        assert_eq!("fi".parse::<Locale>().unwrap(), Locale::Fi);
        assert_eq!(" SV ".parse::<Locale>().unwrap(), Locale::Sv);
        assert_eq!("En".parse::<Locale>().unwrap(), Locale::En);
    }

    #[test]
    fn rejects_unknown_locale() {
        let err = "de".parse::<Locale>().unwrap_err();
        assert!(matches!(err, NormalizerError::UnsupportedLocale(ref l) if l == "de"));
    }
}
