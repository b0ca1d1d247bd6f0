use thiserror::Error;

/// Failures from the remote movie catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid catalog API key")]
    InvalidApiKey,

    #[error("Movie {0} not found")]
    NotFound(u64),

    #[error("Catalog returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CatalogError {
    /// Whether the failure came from the transport rather than the catalog's answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Network(_))
    }
}
