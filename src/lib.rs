//! # IceBreak Core Library
//!
//! Core business logic for the IceBreak break reminder: the schedule data
//! model, the wall-clock matching scheduler, and the schedule exchange
//! format. Platform shells embed this crate and provide the narrow
//! collaborators it calls back into: code rendering, capture delivery,
//! audio playback and haptics.
//!
//! ## Architecture
//!
//! - **Schedule**: the [`BreakTime`] value type plus the sorted
//!   [`ScheduleStore`] and the arrival-ordered [`ScannedSchedule`]
//! - **Exchange**: the [`ExchangeCodec`] JSON payload codec with a capacity
//!   guard, the share path that renders a scannable code, and [`ScanInbox`]
//!   for merging scanned payloads
//! - **Scheduler**: the [`SchedulerEngine`] wall-clock state machine,
//!   driven by the spawned [`BreakScheduler`] task; [`AlertSession`] runs
//!   one alert at a time
//!
//! ## Key Components
//!
//! - [`BreakScheduler`]: arm/disarm/stop commands plus the event stream
//! - [`ExchangeCodec`]: encode/decode with round-trip fidelity
//! - [`Config`]: policy values with serde defaults
//! - [`Playback`], [`Haptics`], [`CodeRenderer`]: platform trait seams

pub mod config;
pub mod error;
pub mod events;
pub mod exchange;
pub mod platform;
pub mod schedule;
pub mod scheduler;

pub use config::{AlertConfig, Config, ExchangeConfig, SchedulerConfig};
pub use error::{
    CoreError, DecodeError, EncodeError, InvalidTimeFormat, PlaybackError, RenderError, Result,
};
pub use events::{Event, StopReason};
pub use exchange::{render_schedule_code, ExchangeCodec, ScanInbox, ScanReport};
pub use platform::{CodeRenderer, Haptics, Playback, PlaybackHandle};
pub use schedule::{BreakTime, ScannedSchedule, ScheduleStore};
pub use scheduler::{
    AlertSession, BreakScheduler, SchedulerEngine, SchedulerState, SchedulerStatus,
};
