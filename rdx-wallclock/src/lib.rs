//! # Wallclock
//!
//! A console wall clock built from two independent periodic tasks that share
//! a single published value.
//!
//! ## Core Concepts
//!
//! - **TimeSource**: Owns the current formatted time. One writer publishes a
//!   fresh value, any number of readers observe the latest one without locking
//!   each other out.
//! - **Updater**: A low-priority task that refreshes the `TimeSource` once per
//!   second.
//! - **Presenter**: A high-priority task that reads the `TimeSource` once per
//!   second and overwrites the same console line with it.
//! - **Independent Cancellation**: Each task owns its own cancellation signal.
//!   Cancelling one never stops the other, and nothing joins them on shutdown.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use wallclock::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // 1. Build the configuration in code.
//!     let config = WallclockConfig::default();
//!
//!     // 2. Create the engine. The time source is populated right away.
//!     let engine = ClockEngine::new(config);
//!
//!     // 3. Run both tasks until Ctrl+C.
//!     engine.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub const ENGINE_NAME: &str = "Wallclock";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod common;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod time;

/// A prelude module for easy importing of the most common Wallclock types.
pub mod prelude {
    pub use crate::common::{TaskPriority, TaskRole, TaskState};
    pub use crate::components::console::Console;
    pub use crate::components::task::TaskHandle;
    pub use crate::config::WallclockConfig;
    pub use crate::engine::{ClockEngine, ClockHandles};
    pub use crate::error::ClockError;
    pub use crate::events::ClockEvent;
    pub use crate::time::{format_timestamp, Clock, LocalClock, TimeSource};
}
