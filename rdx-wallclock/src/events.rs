//! Defines the events broadcast by the wallclock engine.
//!
//! Subscribing is optional. The engine sends whether or not anyone listens,
//! and a lagging subscriber only loses old events.

use crate::common::TaskRole;

/// Events describing what the two periodic tasks are doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    /// Fired once when a task's loop begins.
    TaskStarted { role: TaskRole },
    /// Fired after the updater publishes a new value.
    TimeRefreshed { value: String },
    /// Fired after the presenter writes a value to the console.
    TimeRendered { value: String },
    /// Fired once when a task leaves its loop for good.
    TaskCancelled { role: TaskRole },
}
