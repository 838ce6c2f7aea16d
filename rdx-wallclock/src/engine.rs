//! The engine that launches and supervises the two clock tasks.

use crate::common::{TaskPriority, TaskRole, REFRESH_INTERVAL};
use crate::components::console::Console;
use crate::components::task::{PeriodicTask, TaskHandle};
use crate::config::WallclockConfig;
use crate::events::ClockEvent;
use crate::time::{Clock, LocalClock, TimeSource};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, warn};

/// Handles to the two tasks started by [`ClockEngine::start`].
#[derive(Debug)]
pub struct ClockHandles {
    pub updater: TaskHandle,
    pub presenter: TaskHandle,
}

impl ClockHandles {
    /// Cancels each task independently. Neither waits for the other.
    pub fn cancel_all(&self) {
        self.updater.cancel();
        self.presenter.cancel();
    }
}

/// The wallclock engine.
///
/// Owns the shared `TimeSource` and the console, and spawns the updater and
/// presenter against them. The engine is cheap to clone; clones share the
/// same time source, console, and event bus.
#[derive(Clone)]
pub struct ClockEngine {
    config: Arc<WallclockConfig>,
    time_source: Arc<TimeSource>,
    console: Console,
    event_sender: broadcast::Sender<ClockEvent>,
}

impl ClockEngine {
    /// Creates an engine on the local clock, writing to stdout and stderr.
    pub fn new(config: WallclockConfig) -> Self {
        Self::with_parts(config, Arc::new(LocalClock), Console::stdio())
    }

    /// Creates an engine on the given clock and console.
    ///
    /// The time source is populated here, before any task exists.
    pub fn with_parts(config: WallclockConfig, clock: Arc<dyn Clock>, console: Console) -> Self {
        let (event_sender, _) = broadcast::channel(64);
        Self {
            config: Arc::new(config),
            time_source: Arc::new(TimeSource::with_clock(clock)),
            console,
            event_sender,
        }
    }

    /// The shared time source both tasks run against.
    pub fn time_source(&self) -> &Arc<TimeSource> {
        &self.time_source
    }

    /// Subscribes to the `ClockEvent` stream.
    pub fn subscribe_events(&self) -> broadcast::Receiver<ClockEvent> {
        self.event_sender.subscribe()
    }

    /// Spawns the updater and the presenter and returns without waiting.
    ///
    /// The presenter's ticks trail the updater's by `RENDER_OFFSET`, so every
    /// render shows the value refreshed on the same second.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&self) -> ClockHandles {
        let time_source = self.time_source.clone();
        let updater = self.periodic(TaskRole::Updater).spawn(move || {
            time_source.refresh();
            ClockEvent::TimeRefreshed {
                value: time_source.read(),
            }
        });

        let time_source = self.time_source.clone();
        let console = self.console.clone();
        let presenter = self.periodic(TaskRole::Presenter).spawn(move || {
            let value = time_source.read();
            if let Err(e) = console.render(&value) {
                warn!("Failed to render the clock line: {}", e);
            }
            ClockEvent::TimeRendered { value }
        });

        ClockHandles { updater, presenter }
    }

    /// Runs the clock until a Ctrl+C signal is received.
    ///
    /// On the signal each task is cancelled on its own; the engine lingers for
    /// the configured grace period so their diagnostics reach the terminal,
    /// but does not join them.
    pub async fn run(&self) -> anyhow::Result<()> {
        info!("Starting the {} application...", crate::ENGINE_NAME);
        let handles = self.start();

        tokio::signal::ctrl_c().await?;

        info!("Interrupt received. Cancelling clock tasks...");
        handles.cancel_all();
        tokio::time::sleep(self.config.shutdown_grace()).await;
        Ok(())
    }

    fn periodic(&self, role: TaskRole) -> PeriodicTask {
        let priority = if self.config.priority_hints {
            role.priority()
        } else {
            TaskPriority::High
        };
        PeriodicTask::new(
            role,
            REFRESH_INTERVAL,
            role.start_offset(),
            priority,
            self.console.clone(),
            self.event_sender.clone(),
        )
    }
}
