use thiserror::Error;

use engine::DomainError;
use market::VenueError;

/// Why a cycle ended early.
#[derive(Error, Debug)]
pub enum CycleError {
    #[error("venue call failed: {0}")]
    Venue(#[from] VenueError),

    #[error("unusable spread series: {0}")]
    Domain(#[from] DomainError),
}
