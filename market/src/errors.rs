use thiserror::Error;

/// Any failure coming back from the brokerage.
#[derive(Error, Debug)]
pub enum VenueError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("venue returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("order rejected: {0}")]
    Rejected(String),

    #[error("invalid response from venue: {0}")]
    InvalidResponse(String),

    #[error("invalid venue configuration: {0}")]
    Config(String),
}

impl VenueError {
    /// Rate limiting and 5xx responses; the next cycle may well succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            VenueError::Http(e) => e.is_timeout() || e.is_connect(),
            VenueError::Status { status, .. } => *status == 429 || *status >= 500,
            VenueError::Rejected(_) | VenueError::InvalidResponse(_) | VenueError::Config(_) => false,
        }
    }
}
