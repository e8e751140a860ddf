use crate::enum_values::invalid_value_message;
use thiserror::Error;

/// Errors surfaced by generated cmdlets at execution time
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A string parameter matched no member of its SDK enum
    #[error("{}", invalid_value_message(.allowed.as_slice()))]
    InvalidEnumValue {
        parameter: String,
        value: String,
        allowed: Vec<String>,
    },

    /// A page fetch failed; pagination stops at this page
    #[error("Failed to retrieve page {page}: {source}")]
    PageFetch {
        page: usize,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
