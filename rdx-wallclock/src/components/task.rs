//! Defines the periodic task loop and the handle used to supervise it.

use crate::common::{TaskPriority, TaskRole, TaskState};
use crate::components::console::Console;
use crate::error::ClockError;
use crate::events::ClockEvent;
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, trace, warn};

/// A handle to a running periodic task.
///
/// Dropping the handle leaves the task running. Only `cancel` stops it.
#[derive(Debug)]
pub struct TaskHandle {
    role: TaskRole,
    cancelled: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
}

impl TaskHandle {
    /// Which task this handle controls.
    pub fn role(&self) -> TaskRole {
        self.role
    }

    /// The task's current lifecycle state.
    pub fn state(&self) -> TaskState {
        if self.cancelled.load(Ordering::Acquire) {
            TaskState::Cancelled
        } else {
            TaskState::Running
        }
    }

    /// Whether the task has left its loop for good.
    pub fn is_cancelled(&self) -> bool {
        self.state() == TaskState::Cancelled
    }

    /// Asks the task to stop. Has no effect once the task has stopped.
    pub fn cancel(&self) {
        if self.shutdown_tx.send(()).is_err() {
            trace!("{} already stopped; ignoring cancel.", self.role);
        }
    }
}

/// A unit of work repeated at a fixed interval until cancelled.
pub(crate) struct PeriodicTask {
    role: TaskRole,
    interval: Duration,
    offset: Duration,
    priority: TaskPriority,
    console: Console,
    events: broadcast::Sender<ClockEvent>,
}

impl PeriodicTask {
    pub(crate) fn new(
        role: TaskRole,
        interval: Duration,
        offset: Duration,
        priority: TaskPriority,
        console: Console,
        events: broadcast::Sender<ClockEvent>,
    ) -> Self {
        Self {
            role,
            interval,
            offset,
            priority,
            console,
            events,
        }
    }

    /// Spawns the task on the current Tokio runtime and returns immediately.
    ///
    /// `step` runs once after the start offset and then once per interval. The event it
    /// returns is broadcast after each run. On cancellation the task marks
    /// itself cancelled, writes its diagnostic, and exits.
    pub(crate) fn spawn<F>(self, mut step: F) -> TaskHandle
    where
        F: FnMut() -> ClockEvent + Send + 'static,
    {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = TaskHandle {
            role: self.role,
            cancelled: cancelled.clone(),
            shutdown_tx,
        };

        tokio::spawn(async move {
            debug!("{} task started at {:?} priority.", self.role, self.priority);
            self.events
                .send(ClockEvent::TaskStarted { role: self.role })
                .ok();

            match self.drive(&mut step, shutdown_rx).await {
                Ok(never) => match never {},
                Err(err) => {
                    cancelled.store(true, Ordering::Release);
                    debug!("{}", err);
                    if let Err(e) = self.console.diagnostic(self.role.interrupted_message()) {
                        warn!("Failed to write {} diagnostic: {}", self.role, e);
                    }
                    self.events
                        .send(ClockEvent::TaskCancelled { role: self.role })
                        .ok();
                }
            }
        });

        handle
    }

    /// The task loop. Only ever leaves with `ClockError::Cancelled`.
    async fn drive<F>(
        &self,
        step: &mut F,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<Infallible, ClockError>
    where
        F: FnMut() -> ClockEvent,
    {
        let mut ticker = time::interval_at(Instant::now() + self.offset, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut listening = true;

        loop {
            tokio::select! {
                biased;
                signal = shutdown_rx.recv(), if listening => match signal {
                    // Handle dropped: nobody can cancel us anymore.
                    Err(RecvError::Closed) => listening = false,
                    Ok(()) | Err(RecvError::Lagged(_)) => {
                        return Err(ClockError::Cancelled(self.role));
                    }
                },
                _ = ticker.tick() => {
                    if self.priority == TaskPriority::Low {
                        tokio::task::yield_now().await;
                    }
                    let event = step();
                    self.events.send(event).ok();
                }
            }
        }
    }
}
