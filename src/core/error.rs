use std::{io, path::PathBuf};

use thiserror::Error;

/// Fatal conditions raised by the resource engine.
///
/// Duplicate keys are not part of this enum: they are recorded on the
/// [`KeyTable`](crate::core::KeyTable) and logged, never returned as errors.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// Source locale unset, blank, or not among the discovered locales.
    #[error("{0}")]
    Config(String),

    /// The lang root is missing or is not a directory.
    #[error("Lang directory '{}' does not exist or is not a directory", .0.display())]
    NotFound(PathBuf),

    /// A locale that was never discovered by the scan.
    #[error("Unknown locale `{0}`")]
    UnknownLocale(String),

    /// A resource file whose contents cannot be decoded into key/value pairs.
    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProjectError {
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = ProjectError> = std::result::Result<T, E>;
