//! Errors raised while loading or saving label data.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabelError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed label registry {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl LabelError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LabelError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        LabelError::Yaml {
            path: path.into(),
            source,
        }
    }
}

pub type LabelResult<T> = Result<T, LabelError>;
