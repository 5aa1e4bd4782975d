use thiserror::Error;

use crate::options::OptionsError;
use crate::runner::RunError;

#[derive(Debug, Error)]
pub enum WatchgrepError {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Run(#[from] RunError),
}
