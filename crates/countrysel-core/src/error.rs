// crates/countrysel-core/src/error.rs
use thiserror::Error;

/// Errors produced while loading country data or building highlight patterns.
///
/// The controller itself has no error states of its own; a failed data load
/// is stored as a terminal load state (see
/// [`LoadState::Failed`](crate::controller::LoadState::Failed)).
#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid country data: {0}")]
    InvalidData(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Highlight pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SelectorError>;
