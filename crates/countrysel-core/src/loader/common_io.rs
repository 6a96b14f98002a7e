// crates/countrysel-core/src/loader/common_io.rs
use crate::error::{Result, SelectorError};
use crate::model::CountryList;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::read::GzDecoder;

/// Opens a dataset file, gunzipping it when the name ends in `.gz`.
pub fn open_stream(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path).map_err(|e| {
        SelectorError::NotFound(format!("Dataset not found at {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    if path.extension().is_some_and(|ext| ext == "gz") {
        return gunzip(reader, path);
    }
    Ok(Box::new(reader))
}

#[cfg(feature = "compact")]
fn gunzip(reader: BufReader<File>, _path: &Path) -> Result<Box<dyn Read>> {
    Ok(Box::new(GzDecoder::new(reader)))
}

#[cfg(not(feature = "compact"))]
fn gunzip(_reader: BufReader<File>, path: &Path) -> Result<Box<dyn Read>> {
    Err(SelectorError::InvalidData(format!(
        "{} is gzip-compressed; enable the `compact` feature",
        path.display()
    )))
}

/// Loads a country list from a `.json` or `.json.gz` file.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<CountryList> {
    let path = path.as_ref();
    let reader = open_stream(path)?;
    let list = super::from_reader(reader)?;
    tracing::debug!(path = %path.display(), countries = list.len(), "loaded dataset");
    Ok(list)
}
