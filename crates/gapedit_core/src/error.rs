//! Error types for the persistence and configuration boundaries.
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the editor's collaborator boundaries.
///
/// Buffer, layout, selection and search operations are total and never
/// produce one of these.
#[derive(Error, Debug)]
pub enum EditorError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config value for {key}: {value}")]
    InvalidConfig { key: &'static str, value: String },
}

impl EditorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
