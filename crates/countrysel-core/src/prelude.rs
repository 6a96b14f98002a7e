//! countrysel prelude: bring common types and traits into scope for demos and tests.

#![allow(unused_imports)]

pub use crate::config::SelectorConfig;
pub use crate::controller::{CountrySelector, Key, KeyOutcome, LoadState, SelectorSnapshot};
pub use crate::data::builtin_countries;
pub use crate::error::{Result, SelectorError};
pub use crate::highlight::{highlight, Segment};
pub use crate::model::{find_country, Country, CountryList};
#[cfg(not(target_arch = "wasm32"))]
pub use crate::schedule::SystemClock;
pub use crate::schedule::{Clock, ManualClock};
pub use crate::search::{FuzzyIndex, SearchOptions};
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore, SELECTED_COUNTRY_KEY};
