//! Business logic services.
//!
//! [`StrategyService`] performs the three outbound calls; [`StudioSession`]
//! keeps the latest results in memory and feeds the last strategic report
//! forward into the next ideation request.

mod session;
mod strategy;

pub use session::StudioSession;
pub use strategy::StrategyService;

use crate::{Error, Result};

/// Rejects blank user input before any request is made.
pub(crate) fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}
