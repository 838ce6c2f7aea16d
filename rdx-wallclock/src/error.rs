//! Error types for the wallclock library.

use crate::common::TaskRole;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClockError {
    /// A task was asked to stop. Caught by the task that raised it.
    #[error("{0} task was cancelled")]
    Cancelled(TaskRole),

    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ClockError>;
