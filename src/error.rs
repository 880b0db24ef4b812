// Dataset loading errors
//
// Query-time misses are not errors: they come back as `Lookup::NotFound` or
// `Lookup::NotApplicable`. Only a dataset that cannot be read or parsed fails.

use std::path::PathBuf;
use thiserror::Error;

/// A dataset that violates the expected country/subcountry structure.
///
/// `line` is 1-based and `content` is the trimmed text of that line, so the
/// offending entry can be found in the source file directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed dataset in country {country:?} at line {line}: {reason} (`{content}`)")]
pub struct MalformedDatasetError {
    pub country: String,
    pub line: usize,
    pub content: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Malformed(#[from] MalformedDatasetError),
}

impl DatasetError {
    /// The parse failure, if this error came from a corrupt dataset
    pub fn malformed(&self) -> Option<&MalformedDatasetError> {
        match self {
            DatasetError::Malformed(e) => Some(e),
            DatasetError::Io { .. } => None,
        }
    }
}
