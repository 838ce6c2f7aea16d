//! Contains common, primitive types shared across the crate.
//!
//! This module defines the fixed constants of the clock along with the small
//! enums used to identify the two periodic tasks and track their lifecycle.

use std::fmt;
use std::time::Duration;

/// The `chrono` pattern for the displayed time: `HH:mm:ss dd-MM-yyyy`.
pub const TIME_FORMAT: &str = "%H:%M:%S %d-%m-%Y";

/// How often the updater refreshes and the presenter renders.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// How far the presenter's schedule trails the updater's, so each render
/// reads the value refreshed on the same tick.
pub const RENDER_OFFSET: Duration = Duration::from_millis(25);

/// Text written before the time value on every render.
pub const RENDER_PREFIX: &str = "Current Time: ";

/// Identifies one of the two periodic tasks the engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskRole {
    /// Publishes a fresh timestamp into the `TimeSource`.
    Updater,
    /// Reads the `TimeSource` and writes it to the console.
    Presenter,
}

impl TaskRole {
    /// A human-readable task name for logging.
    pub fn name(self) -> &'static str {
        match self {
            TaskRole::Updater => "Time-Updater",
            TaskRole::Presenter => "Time-Displayer",
        }
    }

    /// The scheduling weight this role runs at when priority hints are enabled.
    pub fn priority(self) -> TaskPriority {
        match self {
            TaskRole::Updater => TaskPriority::Low,
            TaskRole::Presenter => TaskPriority::High,
        }
    }

    /// Delay before this role's first tick.
    pub fn start_offset(self) -> Duration {
        match self {
            TaskRole::Updater => Duration::ZERO,
            TaskRole::Presenter => RENDER_OFFSET,
        }
    }

    /// The diagnostic written to the error stream when this task is cancelled.
    ///
    /// The presenter's message starts on a fresh line so it does not collide
    /// with the clock line it keeps overwriting.
    pub fn interrupted_message(self) -> &'static str {
        match self {
            TaskRole::Updater => "The time update thread was interrupted.",
            TaskRole::Presenter => "\nThe time display thread was interrupted.",
        }
    }
}

impl fmt::Display for TaskRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lifecycle of a periodic task. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Running,
    Cancelled,
}

/// A scheduling hint for a periodic task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPriority {
    /// Yields to the scheduler before each step.
    Low,
    /// Runs its step as soon as it is woken.
    High,
}
