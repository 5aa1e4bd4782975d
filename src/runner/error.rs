use crate::filter::FilterError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("failed to open output file {path}: {source}")]
    OpenOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write output: {0}")]
    Write(#[from] std::io::Error),
}
