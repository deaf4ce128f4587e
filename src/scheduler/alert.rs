use chrono::{DateTime, Duration, Utc};
use tracing::warn;
use uuid::Uuid;

use crate::platform::{Playback, PlaybackHandle};
use crate::schedule::BreakTime;

/// Lifecycle of the one alert that may be running at a time.
///
/// Created inactive. [`start`](AlertSession::start) stamps the start time
/// and begins playback; [`stop`](AlertSession::stop) is idempotent and
/// releases the playback handle exactly once. The scheduler engine owns the
/// session and only ever starts it from the Armed state.
#[derive(Debug, Default)]
pub struct AlertSession {
    active: Option<ActiveAlert>,
}

#[derive(Debug)]
struct ActiveAlert {
    id: String,
    time: BreakTime,
    started_at: DateTime<Utc>,
    handle: Option<PlaybackHandle>,
}

impl AlertSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn alert_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.id.as_str())
    }

    /// The schedule entry this alert fired for.
    pub fn time(&self) -> Option<BreakTime> {
        self.active.as_ref().map(|a| a.time)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.active.as_ref().map(|a| a.started_at)
    }

    /// Whether the active alert has outlived `duration_secs`.
    pub fn expired(&self, now: DateTime<Utc>, duration_secs: u64) -> bool {
        match &self.active {
            Some(a) => {
                now.signed_duration_since(a.started_at)
                    >= Duration::seconds(duration_secs as i64)
            }
            None => false,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a new alert for `time`, starting playback of `sound`.
    ///
    /// A playback failure is logged and the alert still becomes active:
    /// the countdown and the return to Armed must not depend on audio.
    /// Returns the minted alert id.
    pub(crate) fn start<P: Playback>(
        &mut self,
        time: BreakTime,
        started_at: DateTime<Utc>,
        playback: &mut P,
        sound: &str,
    ) -> String {
        let id = Uuid::new_v4().to_string();
        let handle = match playback.play(sound) {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(alert_id = %id, error = %err, "alert playback failed, alert continues without sound");
                None
            }
        };
        self.active = Some(ActiveAlert {
            id: id.clone(),
            time,
            started_at,
            handle,
        });
        id
    }

    /// Stop the active alert, releasing its playback handle.
    ///
    /// Idempotent: returns the stopped alert's id, or `None` when nothing
    /// was active.
    pub(crate) fn stop<P: Playback>(&mut self, playback: &mut P) -> Option<String> {
        let alert = self.active.take()?;
        if let Some(handle) = alert.handle {
            playback.stop(handle);
        }
        Some(alert.id)
    }
}
