//! Wall-clock break scheduling.
//!
//! [`SchedulerEngine`] is the synchronous state machine; [`BreakScheduler`]
//! wraps it in a spawned tokio task driven by a periodic tick and the alert
//! countdown; [`AlertSession`] tracks the one alert that may be running.

mod alert;
mod engine;
mod service;

pub use alert::AlertSession;
pub use engine::{SchedulerEngine, SchedulerState};
pub use service::{BreakScheduler, SchedulerStatus};
