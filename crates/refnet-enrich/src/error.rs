//! Error types for enrichment

/// Enrichment error
///
/// Raised by record directories. Enrichment never swallows these; the
/// calling page decides how to surface them.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    /// The directory could not answer
    #[error("directory unavailable: {0}")]
    Directory(String),

    /// Records file could not be read
    #[error("cannot read records: {0}")]
    Io(#[from] std::io::Error),

    /// Records JSON is malformed
    #[error("malformed records json: {0}")]
    Json(#[from] serde_json::Error),
}

impl EnrichError {
    /// Check if a retry might succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Directory(_) | Self::Io(_))
    }
}
