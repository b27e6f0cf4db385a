// vim: set ai et ts=4 sw=4 sts=4:
use thiserror::Error;

use super::grid::StatusError;

#[derive(Debug, Error)]
pub enum Error {
    /// The markings admit no solution. Inside contradiction testing this is the expected signal.
    #[error("puzzle has no answer: {0}")]
    Contradiction(String),

    /// Internal consistency failure; never a property of the puzzle itself.
    #[error("invariant violated: {0}")]
    Invariant(String),

    #[error("row total {rows} differs from column total {cols}")]
    Inconsistent { rows: usize, cols: usize },

    #[error("bad puzzle description: {0}")]
    Format(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn is_contradiction(&self) -> bool {
        matches!(self, Error::Contradiction(_))
    }
}

impl From<StatusError> for Error {
    fn from(other: StatusError) -> Self {
        Error::Contradiction(other.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
