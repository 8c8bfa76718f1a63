//! Trading-venue collaborator.
//!
//! The rest of the workspace talks to the brokerage only through the
//! [`Venue`] trait, so the driver can be exercised against a fake.

pub mod alpaca;
pub mod errors;
pub mod types;
pub mod venue;

pub use errors::VenueError;
pub use types::*;
pub use venue::Venue;
