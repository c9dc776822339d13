use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    pub fn write(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        Self::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}
