use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::BreakTime;

/// Every scheduler state change produces an Event.
/// The embedding shell subscribes to these for UI updates and notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SchedulerArmed {
        entry_count: usize,
        at: DateTime<Utc>,
    },
    SchedulerDisarmed {
        at: DateTime<Utc>,
    },
    /// A schedule entry matched the wall clock and an alert began.
    AlertStarted {
        alert_id: String,
        time: BreakTime,
        at: DateTime<Utc>,
    },
    /// The active alert ended.
    AlertStopped {
        alert_id: String,
        reason: StopReason,
        at: DateTime<Utc>,
    },
}

/// Why an alert stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopReason {
    /// The configured alert duration ran out.
    Elapsed,
    /// The embedder requested the stop.
    Manual,
    /// The whole scheduler was disarmed.
    Disarmed,
}
