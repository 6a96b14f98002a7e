// crates/countrysel-core/src/lib.rs

//! countrysel-core — the engine behind a country-name autocomplete input.
//!
//! - [`data`] / [`loader`]: where the country list comes from
//! - [`search`]: the fuzzy index queried on every (debounced) keystroke
//! - [`controller`]: the selection state machine
//! - [`highlight`]: splitting a label around the typed text
//! - [`storage`] / [`schedule`]: the injected persistence and time seams
//!
//! ```rust
//! use countrysel_core::prelude::*;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let store = MemoryStore::new();
//! let mut selector = CountrySelector::with_countries(
//!     builtin_countries().unwrap(),
//!     store.clone(),
//!     clock.clone(),
//!     SelectorConfig::default(),
//! );
//!
//! selector.handle_input_change("argentin");
//! clock.advance(Duration::from_millis(300));
//! selector.poll();
//!
//! selector.handle_key_down(Key::ArrowDown);
//! selector.handle_key_down(Key::Enter);
//! assert_eq!(selector.input_value(), "Argentina");
//! assert_eq!(store.get("selectedCountry").as_deref(), Some("Argentina"));
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod highlight;
pub mod loader;
pub mod model;
pub mod prelude;
pub mod schedule;
pub mod search;
pub mod storage;

// Re-exports
pub use crate::config::SelectorConfig;
pub use crate::controller::{
    CountrySelector, Key, KeyOutcome, LoadState, SelectorSnapshot, SuggestionView,
};
pub use crate::error::{Result, SelectorError};
pub use crate::highlight::{highlight, Segment};
pub use crate::model::{Country, CountryList};
pub use crate::search::{FuzzyIndex, Hit, SearchOptions};
pub use crate::storage::{KeyValueStore, MemoryStore, SELECTED_COUNTRY_KEY};
