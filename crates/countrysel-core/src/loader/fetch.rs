// crates/countrysel-core/src/loader/fetch.rs
#![cfg(feature = "fetch")]

use crate::error::{Result, SelectorError};
use crate::model::CountryList;
use tracing::debug;

/// Fetches a country list over HTTP.
///
/// Resolves exactly once: either a validated list or a [`SelectorError`]
/// (`Fetch` for transport and status failures, `Json`/`InvalidData` for bad
/// payloads). Callers decide what a failure means; the controller treats it as
/// terminal for the mount.
pub async fn fetch_countries(client: &reqwest::Client, url: &str) -> Result<CountryList> {
    debug!(url, "fetching countries");
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SelectorError::Fetch(format!("GET {url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SelectorError::Fetch(format!("GET {url} returned {status}")));
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| SelectorError::Fetch(format!("reading body of {url}: {e}")))?;

    let list = super::from_slice(&body)?;
    debug!(url, countries = list.len(), "fetched countries");
    Ok(list)
}
