//! Core error types for icebreak-core.
//!
//! This module defines the error hierarchy using thiserror. Every error in
//! the library is recoverable: a failed decode, render or playback leaves
//! schedules and the scheduler in their previous state.

use thiserror::Error;

/// Core error type for icebreak-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Break time construction/parsing errors
    #[error("Time error: {0}")]
    Time(#[from] InvalidTimeFormat),

    /// Schedule payload encoding errors
    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),

    /// Schedule payload decoding errors
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Code rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Audio playback errors
    #[error("Playback error: {0}")]
    Playback(#[from] PlaybackError),

    /// Command sent to a scheduler whose task has already ended
    #[error("Scheduler task is no longer running")]
    SchedulerStopped,
}

/// Errors constructing or parsing a break time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidTimeFormat {
    /// Hour component outside 0-23
    #[error("Hour {hour} out of range (expected 0-23)")]
    HourOutOfRange { hour: u8 },

    /// Minute component outside 0-59
    #[error("Minute {minute} out of range (expected 0-59)")]
    MinuteOutOfRange { minute: u8 },

    /// Input does not have the canonical zero-padded HH:MM shape
    #[error("Malformed time string '{input}': expected HH:MM")]
    Malformed { input: String },
}

/// Errors producing an exchange payload.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// Serialized payload exceeds the configured symbol capacity
    #[error("Payload of {size} bytes exceeds the {max} byte capacity")]
    PayloadTooLarge { size: usize, max: usize },

    /// Not enough schedule entries to make sharing worthwhile
    #[error("Schedule has {count} entries, at least {min} required to share")]
    TooFewEntries { count: usize, min: usize },

    /// Serialization failed
    #[error("Failed to serialize schedule: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors consuming an exchange payload.
///
/// Decoding is all-or-nothing: any of these means no entries were imported.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Payload is not a JSON array of strings
    #[error("Malformed payload: {0}")]
    Malformed(#[source] serde_json::Error),

    /// A payload entry is not a valid break time
    #[error("Invalid time in payload: {0}")]
    InvalidTime(#[from] InvalidTimeFormat),
}

/// Errors surfaced by a [`CodeRenderer`](crate::platform::CodeRenderer)
/// implementation.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Payload does not fit the symbol the renderer can produce
    #[error("Payload of {size} bytes does not fit renderer capacity of {max}")]
    CapacityExceeded { size: usize, max: usize },

    /// Renderer backend failure
    #[error("Render backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by a [`Playback`](crate::platform::Playback)
/// implementation.
#[derive(Error, Debug)]
pub enum PlaybackError {
    /// Named sound resource is not available on this device
    #[error("Sound resource '{0}' not found")]
    ResourceNotFound(String),

    /// Playback backend failure
    #[error("Playback backend error: {0}")]
    Backend(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
