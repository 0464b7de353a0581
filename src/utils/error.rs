//! Error handling for filter runs
//!
//! Only conditions that must stop a run are errors. Unresolved labels and
//! missing optional inputs degrade to placeholders instead (see
//! [`bookfilter_labels::Resolver`]).

use bookfilter_labels::LabelError;
use thiserror::Error;

use crate::filter::Target;

/// Filter error type
#[derive(Debug, Error)]
pub enum FilterError {
    /// Heading level with no structural unit
    #[error("Invalid header level {level} in heading '{text}'")]
    InvalidHeading { level: u8, text: String },
    /// Feature not available for the requested output target
    #[error("Unsupported feature '{feature}' for target {target}")]
    Unsupported { feature: String, target: String },
    #[error(transparent)]
    Labels(#[from] LabelError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

// Convenience constructors for errors
impl FilterError {
    pub fn invalid_heading(level: u8, text: impl Into<String>) -> Self {
        FilterError::InvalidHeading {
            level,
            text: text.into(),
        }
    }

    pub fn unsupported(feature: impl Into<String>, target: Target) -> Self {
        FilterError::Unsupported {
            feature: feature.into(),
            target: target.to_string(),
        }
    }

    pub fn unknown_target(name: impl Into<String>) -> Self {
        FilterError::Unsupported {
            feature: "output target".to_string(),
            target: name.into(),
        }
    }

    /// Configuration or input-tree invariant violation, as opposed to I/O.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            FilterError::InvalidHeading { .. } | FilterError::Unsupported { .. }
        )
    }
}
