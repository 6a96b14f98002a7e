// crates/countrysel-core/src/model.rs
use crate::error::{Result, SelectorError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// A selectable country.
///
/// `name` is both the display text and the fuzzy match key; `code` is a stable
/// unique identifier (ISO 3166-1 alpha-2 for the built-in dataset) that
/// renderers use as the list key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
    pub code: String,
}

impl Country {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Shared, immutable country list. Identity is pointer identity of the `Arc`.
pub type CountryList = Arc<[Country]>;

/// Checks a freshly obtained list and freezes it into a [`CountryList`].
///
/// Rejects empty names, empty codes and duplicate codes (codes are used as
/// list keys by renderers, so they must be unique).
pub fn validate_countries(countries: Vec<Country>) -> Result<CountryList> {
    let mut seen = HashSet::with_capacity(countries.len());
    for (i, c) in countries.iter().enumerate() {
        if c.name.trim().is_empty() {
            return Err(SelectorError::InvalidData(format!(
                "record {i} has an empty name"
            )));
        }
        if c.code.trim().is_empty() {
            return Err(SelectorError::InvalidData(format!(
                "record {i} ({}) has an empty code",
                c.name
            )));
        }
        if !seen.insert(c.code.as_str()) {
            return Err(SelectorError::InvalidData(format!(
                "duplicate country code {}",
                c.code
            )));
        }
    }
    Ok(countries.into())
}

/// Find a country by exact code (case-insensitive) or name (case-insensitive).
pub fn find_country<'a>(countries: &'a [Country], needle: &str) -> Option<&'a Country> {
    let needle = needle.trim();
    countries
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(needle))
        .or_else(|| {
            let lower = needle.to_lowercase();
            countries.iter().find(|c| c.name.to_lowercase() == lower)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_codes() {
        let err = validate_countries(vec![
            Country::new("United States", "US"),
            Country::new("Uruguay", "US"),
        ])
        .unwrap_err();
        assert!(matches!(err, SelectorError::InvalidData(msg) if msg.contains("US")));
    }

    #[test]
    fn rejects_blank_fields() {
        assert!(validate_countries(vec![Country::new("  ", "XX")]).is_err());
        assert!(validate_countries(vec![Country::new("Nowhere", "")]).is_err());
    }

    #[test]
    fn find_by_code_or_name() {
        let list = vec![
            Country::new("Germany", "DE"),
            Country::new("Denmark", "DK"),
        ];
        assert_eq!(find_country(&list, "dk").map(Country::name), Some("Denmark"));
        assert_eq!(find_country(&list, "GERMANY").map(Country::code), Some("DE"));
        assert!(find_country(&list, "Atlantis").is_none());
    }
}
