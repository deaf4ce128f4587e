//! Async scheduling service.
//!
//! [`BreakScheduler`] spawns a single tokio task that owns the
//! [`SchedulerEngine`] and the playback backend. Two timers live inside the
//! task: the periodic tick that samples the wall clock while Armed, and the
//! one-shot alert countdown. Commands from the handle are marshaled onto
//! the task through a channel, so all mutable state is touched from one
//! place and ticks can never overlap.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tracing::debug;

use crate::config::Config;
use crate::error::{CoreError, Result};
use crate::events::{Event, StopReason};
use crate::platform::Playback;
use crate::schedule::BreakTime;

use super::engine::{SchedulerEngine, SchedulerState};

/// Point-in-time view of the scheduler, answered by the task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerStatus {
    pub state: SchedulerState,
    pub entry_count: usize,
    pub alerting_since: Option<DateTime<Utc>>,
}

enum Command {
    Arm(Vec<BreakTime>),
    Disarm,
    StopAlert,
    Status(oneshot::Sender<SchedulerStatus>),
    Shutdown,
}

/// Handle to the scheduling task.
///
/// Created by [`spawn`](BreakScheduler::spawn). Dropping the handle without
/// [`shutdown`](BreakScheduler::shutdown) aborts the task, so neither the
/// tick nor a pending alert countdown outlives the embedder.
pub struct BreakScheduler {
    commands: mpsc::UnboundedSender<Command>,
    task: Option<JoinHandle<()>>,
}

impl BreakScheduler {
    /// Spawn the scheduling task. Requires a running tokio runtime.
    ///
    /// Returns the handle and the event stream.
    pub fn spawn<P>(config: Config, playback: P) -> (Self, mpsc::UnboundedReceiver<Event>)
    where
        P: Playback + 'static,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_loop(config, playback, command_rx, event_tx));
        (
            Self {
                commands: command_tx,
                task: Some(task),
            },
            event_rx,
        )
    }

    /// Arm the scheduler over a snapshot of the given times.
    pub fn arm(&self, times: Vec<BreakTime>) -> Result<()> {
        self.send(Command::Arm(times))
    }

    /// Stop ticking and any active alert.
    pub fn disarm(&self) -> Result<()> {
        self.send(Command::Disarm)
    }

    /// Stop the active alert without disarming.
    pub fn stop_alert(&self) -> Result<()> {
        self.send(Command::StopAlert)
    }

    /// Snapshot of the current scheduler state.
    pub async fn status(&self) -> Result<SchedulerStatus> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Status(reply_tx))?;
        reply_rx.await.map_err(|_| CoreError::SchedulerStopped)
    }

    /// Graceful shutdown: silence any alert and wait for the task to end.
    pub async fn shutdown(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| CoreError::SchedulerStopped)
    }
}

impl Drop for BreakScheduler {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_loop<P: Playback>(
    config: Config,
    mut playback: P,
    mut commands: mpsc::UnboundedReceiver<Command>,
    events: mpsc::UnboundedSender<Event>,
) {
    let mut engine = SchedulerEngine::new(config.scheduler.clone(), config.alert.clone());
    let alert_duration = Duration::from_secs(config.alert.duration_secs);

    let mut ticker = time::interval(Duration::from_millis(config.scheduler.tick_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // Armed whenever an alert is running; firing it stops the alert.
    let mut alert_deadline: Option<Instant> = None;

    debug!("scheduler task started");
    loop {
        tokio::select! {
            _ = ticker.tick(), if engine.state() == SchedulerState::Armed => {
                let event = engine.tick_at(Local::now(), &mut playback);
                if matches!(event, Some(Event::AlertStarted { .. })) {
                    alert_deadline = Some(Instant::now() + alert_duration);
                }
                forward(&events, event);
            }
            _ = sleep_until_deadline(alert_deadline), if alert_deadline.is_some() => {
                alert_deadline = None;
                let event = engine.stop_alert(&mut playback, StopReason::Elapsed);
                forward(&events, event);
            }
            command = commands.recv() => {
                match command {
                    Some(Command::Arm(times)) => {
                        // Fresh tick cadence when leaving Idle; a re-arm
                        // only swaps the schedule and keeps the cadence.
                        if engine.state() == SchedulerState::Idle {
                            ticker.reset();
                        }
                        forward(&events, Some(engine.arm(times)));
                    }
                    Some(Command::Disarm) => {
                        alert_deadline = None;
                        let (stopped, disarmed) = engine.disarm(&mut playback);
                        forward(&events, stopped);
                        forward(&events, Some(disarmed));
                    }
                    Some(Command::StopAlert) => {
                        alert_deadline = None;
                        let event = engine.stop_alert(&mut playback, StopReason::Manual);
                        forward(&events, event);
                    }
                    Some(Command::Status(reply)) => {
                        let _ = reply.send(SchedulerStatus {
                            state: engine.state(),
                            entry_count: engine.entries().len(),
                            alerting_since: engine.alerting_since(),
                        });
                    }
                    Some(Command::Shutdown) | None => {
                        let event = engine.stop_alert(&mut playback, StopReason::Disarmed);
                        forward(&events, event);
                        break;
                    }
                }
            }
        }
    }
    debug!("scheduler task finished");
}

/// Resolves at `deadline`. The `None` arm never resolves; the select branch
/// it backs is disabled then anyway.
async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

fn forward(events: &mpsc::UnboundedSender<Event>, event: Option<Event>) {
    if let Some(event) = event {
        let _ = events.send(event);
    }
}
