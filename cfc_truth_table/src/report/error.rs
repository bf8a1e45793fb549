use crate::logging::{codes, Code};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure writing generator output; always fatal
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Cannot create output directory '{}': {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot serialise data for '{}': {source}", path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ReportError {
    pub fn path(&self) -> &Path {
        match self {
            ReportError::CreateDirectory { path, .. }
            | ReportError::Write { path, .. }
            | ReportError::Serialize { path, .. } => path,
        }
    }

    pub fn code(&self) -> Code {
        match self {
            ReportError::CreateDirectory { .. } => codes::output::DIRECTORY_CREATION_FAILED,
            ReportError::Write { .. } => codes::output::FILE_WRITE_FAILED,
            ReportError::Serialize { .. } => codes::output::SERIALIZATION_FAILED,
        }
    }
}
