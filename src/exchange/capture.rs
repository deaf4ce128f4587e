use crate::error::DecodeError;
use crate::platform::Haptics;
use crate::schedule::ScannedSchedule;

use super::ExchangeCodec;

/// Outcome of one successful scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// Entries this scan added.
    pub added: usize,
    /// Entries collected across all scans so far.
    pub total: usize,
}

/// Receives recognized code payloads from the platform's capture layer.
///
/// Owns the [`ScannedSchedule`]. Deliveries run one at a time through
/// `&mut self`, so a decode and its merge can never interleave with another
/// scan.
pub struct ScanInbox<H: Haptics> {
    codec: ExchangeCodec,
    haptics: H,
    scanned: ScannedSchedule,
}

impl<H: Haptics> ScanInbox<H> {
    pub fn new(codec: ExchangeCodec, haptics: H) -> Self {
        Self {
            codec,
            haptics,
            scanned: ScannedSchedule::new(),
        }
    }

    /// Handle one recognized code.
    ///
    /// The haptic pulse fires on every delivery, before decoding: the device
    /// acknowledges the scan even when the payload turns out to be foreign.
    /// Decoding is all-or-nothing, so on error the collected schedule is
    /// untouched and the next scan proceeds normally.
    pub fn on_scan(&mut self, payload: &str) -> Result<ScanReport, DecodeError> {
        self.haptics.vibrate();
        let times = self.codec.decode(payload.as_bytes())?;
        let added = times.len();
        self.scanned.extend(times);
        Ok(ScanReport {
            added,
            total: self.scanned.len(),
        })
    }

    /// Entries collected so far, in scan order.
    pub fn scanned(&self) -> &ScannedSchedule {
        &self.scanned
    }
}
