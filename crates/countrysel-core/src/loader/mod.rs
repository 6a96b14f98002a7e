// crates/countrysel-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (I/O, decompression, HTTP) and normalizes the
//! payload into a validated [`CountryList`].
//!
//! Two payload shapes are accepted:
//! - the native shape `[{ "name": "Argentina", "code": "AR" }, ...]`
//! - the restcountries.com shape `[{ "name": { "common": "Argentina" }, "cca2": "AR" }, ...]`

use crate::error::Result;
use crate::model::{validate_countries, Country, CountryList};
use serde::Deserialize;
use std::io::Read;

#[cfg(feature = "json")]
mod common_io;
#[cfg(feature = "fetch")]
mod fetch;

#[cfg(feature = "json")]
pub use common_io::load_from_path;
#[cfg(feature = "fetch")]
pub use fetch::fetch_countries;

#[derive(Debug, Deserialize)]
struct RemoteName {
    common: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RemoteRecord {
    Native(Country),
    RestCountries { name: RemoteName, cca2: String },
}

impl From<RemoteRecord> for Country {
    fn from(r: RemoteRecord) -> Self {
        match r {
            RemoteRecord::Native(c) => c,
            RemoteRecord::RestCountries { name, cca2 } => Country::new(name.common, cca2),
        }
    }
}

/// Parses and validates a JSON country list from any reader.
pub fn from_reader<R: Read>(reader: R) -> Result<CountryList> {
    let records: Vec<RemoteRecord> = serde_json::from_reader(reader)?;
    normalize(records)
}

/// Parses and validates a JSON country list already in memory.
pub fn from_slice(bytes: &[u8]) -> Result<CountryList> {
    let records: Vec<RemoteRecord> = serde_json::from_slice(bytes)?;
    normalize(records)
}

fn normalize(records: Vec<RemoteRecord>) -> Result<CountryList> {
    let countries: Vec<Country> = records
        .into_iter()
        .map(Country::from)
        .map(|c| Country::new(c.name.trim(), c.code.trim()))
        .collect();
    validate_countries(countries)
}
