//! Break schedule data model.
//!
//! [`BreakTime`] is the minute-resolution time-of-day value type.
//! [`ScheduleStore`] holds the device's own entries, kept sorted;
//! [`ScannedSchedule`] collects entries imported from other devices
//! in arrival order.

mod store;
mod time;

pub use store::{ScannedSchedule, ScheduleStore};
pub use time::BreakTime;
