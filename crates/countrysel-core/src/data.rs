// crates/countrysel-core/src/data.rs

//! # Built-in Dataset
//!
//! The ISO 3166-1 country list, embedded in the binary as JSON and parsed
//! once on first use. Every call to [`builtin_countries`] returns the same
//! `Arc`, so indexes built from it are never rebuilt needlessly.

use crate::error::Result;
use crate::model::{validate_countries, Country, CountryList};
use once_cell::sync::OnceCell;

static EMBEDDED_JSON: &str = include_str!("../data/countries.json");

static BUILTIN: OnceCell<CountryList> = OnceCell::new();

/// Returns the embedded country list.
///
/// # Example
///
/// ```rust
/// let countries = countrysel_core::data::builtin_countries().unwrap();
/// assert!(countries.iter().any(|c| c.code == "AR"));
/// ```
pub fn builtin_countries() -> Result<CountryList> {
    BUILTIN
        .get_or_try_init(|| {
            let list: Vec<Country> = serde_json::from_str(EMBEDDED_JSON)?;
            validate_countries(list)
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn embedded_list_parses_and_is_shared() {
        let a = builtin_countries().unwrap();
        let b = builtin_countries().unwrap();
        assert!(a.len() > 200);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn contains_the_united_entries() {
        let list = builtin_countries().unwrap();
        for code in ["US", "GB", "AE"] {
            assert!(list.iter().any(|c| c.code == code), "missing {code}");
        }
    }
}
