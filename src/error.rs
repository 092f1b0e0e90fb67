use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to map '{path}' into memory: {source}")]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),

    #[error("worker for chunk {chunk} panicked")]
    WorkerPanicked { chunk: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
