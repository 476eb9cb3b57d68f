use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("min_score must be within [0, 1], got {0}")]
    InvalidMinScore(f64),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject a threshold outside `[0, 1]` (NaN included)
pub(crate) fn check_min_score(min_score: f64) -> Result<()> {
    if (0.0..=1.0).contains(&min_score) {
        Ok(())
    } else {
        Err(Error::InvalidMinScore(min_score))
    }
}
