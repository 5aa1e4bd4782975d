use thiserror::Error;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}
