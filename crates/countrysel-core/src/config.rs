// crates/countrysel-core/src/config.rs
use crate::error::{Result, SelectorError};
use crate::search::SearchOptions;
use crate::storage::SELECTED_COUNTRY_KEY;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_BLUR_GRACE_MS: u64 = 200;

/// Runtime configuration of a [`CountrySelector`](crate::CountrySelector).
///
/// Deserializes from a partial JSON object; missing fields take defaults:
///
/// ```rust
/// use countrysel_core::SelectorConfig;
///
/// let cfg: SelectorConfig = serde_json::from_str(r#"{ "debounce_ms": 150 }"#).unwrap();
/// assert_eq!(cfg.debounce().as_millis(), 150);
/// assert_eq!(cfg.storage_key, "selectedCountry");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Quiescence window after the last keystroke before a search runs.
    pub debounce_ms: u64,
    /// Delay between blur and hiding the list, so a click can commit first.
    pub blur_grace_ms: u64,
    /// Persistence key for the last committed name.
    pub storage_key: String,
    pub search: SearchOptions,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            blur_grace_ms: DEFAULT_BLUR_GRACE_MS,
            storage_key: SELECTED_COUNTRY_KEY.to_string(),
            search: SearchOptions::default(),
        }
    }
}

impl SelectorConfig {
    #[inline]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[inline]
    pub fn blur_grace(&self) -> Duration {
        Duration::from_millis(self.blur_grace_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(SelectorError::Config("storage_key must not be empty".into()));
        }
        self.search.validate()
    }

    /// Reads a JSON config file and validates it.
    #[cfg(feature = "json")]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SelectorError::NotFound(format!("Config not found at {}: {}", path.display(), e))
        })?;
        let cfg: Self = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_timings() {
        let cfg = SelectorConfig::default();
        assert_eq!(cfg.debounce(), Duration::from_millis(300));
        assert_eq!(cfg.blur_grace(), Duration::from_millis(200));
        assert!((cfg.search.threshold - 0.3).abs() < f64::EPSILON);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn nested_search_options_are_partial_too() {
        let cfg: SelectorConfig =
            serde_json::from_str(r#"{ "search": { "threshold": 0.5 } }"#).unwrap();
        assert_eq!(cfg.search.distance, crate::search::DEFAULT_DISTANCE);
        assert!((cfg.search.threshold - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_blank_storage_key() {
        let cfg = SelectorConfig {
            storage_key: " ".into(),
            ..SelectorConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SelectorError::Config(_))));
    }
}
