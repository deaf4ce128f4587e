//! Exchange payload codec.
//!
//! The wire format is a JSON array of canonical `HH:MM` strings, for example
//! `["09:00","14:05"]`. Order and duplicates are preserved in both
//! directions, so `decode(encode(xs)) == xs` for any sequence of valid
//! times.

use crate::config::ExchangeConfig;
use crate::error::{DecodeError, EncodeError};
use crate::schedule::BreakTime;

/// Encoder/decoder for the schedule exchange payload.
#[derive(Debug, Clone)]
pub struct ExchangeCodec {
    config: ExchangeConfig,
}

impl ExchangeCodec {
    pub fn new(config: ExchangeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Serialize the times into an exchange payload.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::PayloadTooLarge`] when the serialized bytes
    /// exceed the configured symbol capacity. No payload is produced then.
    pub fn encode(&self, times: &[BreakTime]) -> Result<Vec<u8>, EncodeError> {
        let payload = serde_json::to_vec(times)?;
        let max = self.config.max_payload_bytes;
        if payload.len() > max {
            return Err(EncodeError::PayloadTooLarge {
                size: payload.len(),
                max,
            });
        }
        Ok(payload)
    }

    /// Parse an exchange payload back into break times.
    ///
    /// All-or-nothing: the payload must be a JSON array of strings and every
    /// element must be a valid canonical time, otherwise `Err` and no
    /// entries. The two phases keep the error taxonomy apart: a payload that
    /// is not an array of strings is [`DecodeError::Malformed`], an array
    /// whose element fails time validation is [`DecodeError::InvalidTime`].
    pub fn decode(&self, payload: &[u8]) -> Result<Vec<BreakTime>, DecodeError> {
        let raw: Vec<String> = serde_json::from_slice(payload).map_err(DecodeError::Malformed)?;
        let mut times = Vec::with_capacity(raw.len());
        for entry in &raw {
            times.push(entry.parse::<BreakTime>()?);
        }
        Ok(times)
    }
}
