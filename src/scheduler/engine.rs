//! Scheduler engine implementation.
//!
//! The engine is a wall-clock state machine. It owns no timers and spawns
//! nothing: the caller invokes [`tick_at`](SchedulerEngine::tick_at)
//! periodically with the current time, and commands and ticks answer with
//! events. [`BreakScheduler`](crate::scheduler::BreakScheduler) is the
//! tokio front that drives it.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Armed -> Alerting -> Armed (alert over)
//!                           \-> Idle (disarm)
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{AlertConfig, SchedulerConfig};
use crate::events::{Event, StopReason};
use crate::platform::Playback;
use crate::schedule::BreakTime;

use super::alert::AlertSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    Idle,
    Armed,
    Alerting,
}

/// Core scheduling state machine.
///
/// Holds the armed schedule snapshot and the alert session. Matching is
/// timezone-generic: each tick receives `now` in the caller's zone and the
/// engine projects every entry onto that day's calendar date in that zone.
#[derive(Debug)]
pub struct SchedulerEngine {
    config: SchedulerConfig,
    alert_config: AlertConfig,
    state: SchedulerState,
    entries: Vec<BreakTime>,
    alert: AlertSession,
}

impl SchedulerEngine {
    /// Create an engine in the `Idle` state with an empty schedule.
    pub fn new(config: SchedulerConfig, alert_config: AlertConfig) -> Self {
        Self {
            config,
            alert_config,
            state: SchedulerState::Idle,
            entries: Vec::new(),
            alert: AlertSession::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// The armed schedule snapshot.
    pub fn entries(&self) -> &[BreakTime] {
        &self.entries
    }

    /// When the running alert started, if one is active.
    pub fn alerting_since(&self) -> Option<DateTime<Utc>> {
        self.alert.started_at()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm over the given schedule snapshot, replacing any previous one.
    ///
    /// Re-arming while Armed swaps the entries in place. While an alert is
    /// running the swap also happens but the alert keeps going; the engine
    /// returns to Armed over the new entries once it ends.
    pub fn arm(&mut self, entries: Vec<BreakTime>) -> Event {
        self.entries = entries;
        if self.state == SchedulerState::Idle {
            self.state = SchedulerState::Armed;
        }
        Event::SchedulerArmed {
            entry_count: self.entries.len(),
            at: Utc::now(),
        }
    }

    /// Disarm entirely: any active alert stops, the schedule snapshot is
    /// dropped and the engine goes Idle.
    pub fn disarm<P: Playback>(&mut self, playback: &mut P) -> (Option<Event>, Event) {
        let stopped = self.stop_alert(playback, StopReason::Disarmed);
        self.state = SchedulerState::Idle;
        self.entries.clear();
        (stopped, Event::SchedulerDisarmed { at: Utc::now() })
    }

    /// Stop the active alert and drop back to Armed.
    ///
    /// Idempotent: `None` when nothing is alerting.
    pub fn stop_alert<P: Playback>(
        &mut self,
        playback: &mut P,
        reason: StopReason,
    ) -> Option<Event> {
        self.stop_alert_at(playback, reason, Utc::now())
    }

    /// Evaluate one tick at `now`.
    ///
    /// While Armed, scans the schedule in order and starts an alert for the
    /// first entry whose same-day target lies within the match window; the
    /// remaining entries are not evaluated. While Alerting, stops the alert
    /// once it has outlived the configured duration. `now` is the single
    /// time snapshot for the whole evaluation.
    pub fn tick_at<Tz, P>(&mut self, now: DateTime<Tz>, playback: &mut P) -> Option<Event>
    where
        Tz: TimeZone,
        P: Playback,
    {
        match self.state {
            SchedulerState::Armed => self.scan(now, playback),
            SchedulerState::Alerting => {
                let at = now.with_timezone(&Utc);
                if self.alert.expired(at, self.alert_config.duration_secs) {
                    self.stop_alert_at(playback, StopReason::Elapsed, at)
                } else {
                    None
                }
            }
            SchedulerState::Idle => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn scan<Tz, P>(&mut self, now: DateTime<Tz>, playback: &mut P) -> Option<Event>
    where
        Tz: TimeZone,
        P: Playback,
    {
        let window = Duration::seconds(i64::from(self.config.match_window_secs));
        let today = now.date_naive();
        for &entry in &self.entries {
            // Entries that do not exist on today's calendar in this zone
            // (DST gap) are skipped; ambiguous ones take the earliest
            // mapping.
            let Some(target) = today
                .and_hms_opt(u32::from(entry.hour()), u32::from(entry.minute()), 0)
                .and_then(|naive| now.timezone().from_local_datetime(&naive).earliest())
            else {
                continue;
            };

            let delta = target.signed_duration_since(now.clone());
            if delta >= Duration::zero() && delta < window {
                let at = now.with_timezone(&Utc);
                let alert_id = self
                    .alert
                    .start(entry, at, playback, &self.alert_config.sound);
                self.state = SchedulerState::Alerting;
                // First match wins; anything later waits for its own window.
                return Some(Event::AlertStarted {
                    alert_id,
                    time: entry,
                    at,
                });
            }
        }
        None
    }

    fn stop_alert_at<P: Playback>(
        &mut self,
        playback: &mut P,
        reason: StopReason,
        at: DateTime<Utc>,
    ) -> Option<Event> {
        let alert_id = self.alert.stop(playback)?;
        self.state = SchedulerState::Armed;
        Some(Event::AlertStopped {
            alert_id,
            reason,
            at,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;
    use crate::error::PlaybackError;
    use crate::platform::PlaybackHandle;

    #[derive(Default)]
    struct FakePlayback {
        play_calls: usize,
        stop_calls: usize,
    }

    impl Playback for FakePlayback {
        fn play(&mut self, _resource: &str) -> Result<PlaybackHandle, PlaybackError> {
            self.play_calls += 1;
            Ok(PlaybackHandle::new())
        }

        fn stop(&mut self, _handle: PlaybackHandle) {
            self.stop_calls += 1;
        }
    }

    fn engine() -> SchedulerEngine {
        SchedulerEngine::new(SchedulerConfig::default(), AlertConfig::default())
    }

    fn t(s: &str) -> BreakTime {
        s.parse().unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, h, m, s).unwrap()
    }

    #[test]
    fn arm_transitions_idle_to_armed() {
        let mut engine = engine();
        assert_eq!(engine.state(), SchedulerState::Idle);

        let event = engine.arm(vec![t("10:00"), t("14:05")]);
        assert_eq!(engine.state(), SchedulerState::Armed);
        assert!(matches!(event, Event::SchedulerArmed { entry_count: 2, .. }));
    }

    #[test]
    fn tick_is_a_noop_while_idle() {
        let mut playback = FakePlayback::default();
        let mut engine = engine();
        assert!(engine.tick_at(at(10, 0, 0), &mut playback).is_none());
        assert_eq!(playback.play_calls, 0);
    }

    #[test]
    fn alert_fires_at_the_scheduled_second() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(vec![t("10:00")]);

        let event = engine.tick_at(at(10, 0, 0), &mut playback).unwrap();
        match event {
            Event::AlertStarted { time, at: stamped, .. } => {
                assert_eq!(time, t("10:00"));
                assert_eq!(stamped, at(10, 0, 0));
            }
            other => panic!("expected AlertStarted, got {other:?}"),
        }
        assert_eq!(engine.state(), SchedulerState::Alerting);
        assert_eq!(playback.play_calls, 1);
    }

    #[test]
    fn window_opens_under_a_minute_before_the_entry() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(vec![t("10:01")]);

        // Exactly sixty seconds early: not yet.
        assert!(engine.tick_at(at(10, 0, 0), &mut playback).is_none());
        assert_eq!(engine.state(), SchedulerState::Armed);

        // Fifty-nine seconds early: inside the window.
        let event = engine.tick_at(at(10, 0, 1), &mut playback);
        assert!(matches!(event, Some(Event::AlertStarted { .. })));
    }

    #[test]
    fn passed_entries_do_not_fire() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(vec![t("10:00")]);

        assert!(engine.tick_at(at(10, 0, 30), &mut playback).is_none());
        assert!(engine.tick_at(at(11, 15, 0), &mut playback).is_none());
        assert_eq!(engine.state(), SchedulerState::Armed);
        assert_eq!(playback.play_calls, 0);
    }

    #[test]
    fn first_match_wins_and_plays_once() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        // Duplicate entries both inside the window at the same instant.
        engine.arm(vec![t("10:00"), t("10:00")]);

        let event = engine.tick_at(at(9, 59, 30), &mut playback);
        assert!(matches!(event, Some(Event::AlertStarted { .. })));
        assert_eq!(playback.play_calls, 1);

        // While alerting, the second duplicate does not start another alert.
        assert!(engine.tick_at(at(9, 59, 31), &mut playback).is_none());
        assert_eq!(playback.play_calls, 1);
    }

    #[test]
    fn alert_auto_stops_after_the_configured_duration() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(vec![t("10:00")]);
        engine.tick_at(at(9, 59, 30), &mut playback).unwrap();

        assert!(engine.tick_at(at(9, 59, 39), &mut playback).is_none());

        let event = engine.tick_at(at(9, 59, 40), &mut playback).unwrap();
        assert!(matches!(
            event,
            Event::AlertStopped {
                reason: StopReason::Elapsed,
                ..
            }
        ));
        assert_eq!(engine.state(), SchedulerState::Armed);
        assert_eq!(playback.stop_calls, 1);
    }

    #[test]
    fn alert_can_refire_while_the_window_is_still_open() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(vec![t("10:00")]);

        let first_id = match engine.tick_at(at(9, 59, 30), &mut playback) {
            Some(Event::AlertStarted { alert_id, .. }) => alert_id,
            other => panic!("expected AlertStarted, got {other:?}"),
        };
        engine.tick_at(at(9, 59, 40), &mut playback).unwrap();

        // Ten seconds in, the entry is still nineteen seconds ahead.
        let second_id = match engine.tick_at(at(9, 59, 41), &mut playback) {
            Some(Event::AlertStarted { alert_id, .. }) => alert_id,
            other => panic!("expected AlertStarted, got {other:?}"),
        };
        assert_ne!(first_id, second_id);
        assert_eq!(playback.play_calls, 2);
    }

    #[test]
    fn manual_stop_returns_to_armed_and_is_idempotent() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(vec![t("10:00")]);
        engine.tick_at(at(10, 0, 0), &mut playback).unwrap();

        let event = engine.stop_alert(&mut playback, StopReason::Manual).unwrap();
        assert!(matches!(
            event,
            Event::AlertStopped {
                reason: StopReason::Manual,
                ..
            }
        ));
        assert_eq!(engine.state(), SchedulerState::Armed);
        assert_eq!(playback.stop_calls, 1);

        assert!(engine.stop_alert(&mut playback, StopReason::Manual).is_none());
        assert_eq!(playback.stop_calls, 1);
    }

    #[test]
    fn disarm_stops_the_alert_and_clears_the_schedule() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(vec![t("10:00")]);
        engine.tick_at(at(10, 0, 0), &mut playback).unwrap();

        let (stopped, disarmed) = engine.disarm(&mut playback);
        assert!(matches!(
            stopped,
            Some(Event::AlertStopped {
                reason: StopReason::Disarmed,
                ..
            })
        ));
        assert!(matches!(disarmed, Event::SchedulerDisarmed { .. }));
        assert_eq!(engine.state(), SchedulerState::Idle);
        assert!(engine.entries().is_empty());
        assert_eq!(playback.stop_calls, 1);

        // Ticks are no-ops again.
        assert!(engine.tick_at(at(10, 0, 1), &mut playback).is_none());
    }

    #[test]
    fn rearm_replaces_the_schedule() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(vec![t("10:00")]);
        engine.arm(vec![t("11:00")]);
        assert_eq!(engine.entries(), [t("11:00")]);

        // The replaced entry no longer fires.
        assert!(engine.tick_at(at(10, 0, 0), &mut playback).is_none());
        let event = engine.tick_at(at(11, 0, 0), &mut playback);
        assert!(matches!(event, Some(Event::AlertStarted { .. })));
    }

    #[test]
    fn arming_while_alerting_swaps_entries_but_keeps_the_alert() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(vec![t("10:00")]);
        engine.tick_at(at(10, 0, 0), &mut playback).unwrap();

        let event = engine.arm(vec![t("12:00")]);
        assert!(matches!(event, Event::SchedulerArmed { entry_count: 1, .. }));
        assert_eq!(engine.state(), SchedulerState::Alerting);

        // The running alert still stops on its own countdown.
        let event = engine.tick_at(at(10, 0, 10), &mut playback).unwrap();
        assert!(matches!(
            event,
            Event::AlertStopped {
                reason: StopReason::Elapsed,
                ..
            }
        ));
        assert_eq!(engine.entries(), [t("12:00")]);
    }

    #[test]
    fn empty_schedule_never_matches() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(Vec::new());

        for second in 0..120 {
            assert!(engine
                .tick_at(at(10, 0, 0) + Duration::seconds(second), &mut playback)
                .is_none());
        }
        assert_eq!(engine.state(), SchedulerState::Armed);
    }

    #[test]
    fn matching_runs_in_the_callers_zone() {
        let mut engine = engine();
        let mut playback = FakePlayback::default();
        engine.arm(vec![t("14:05")]);

        let tz = FixedOffset::east_opt(5 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 3, 10, 14, 5, 0).unwrap();
        let event = engine.tick_at(now, &mut playback).unwrap();
        match event {
            Event::AlertStarted { at: stamped, .. } => {
                assert_eq!(stamped, now.with_timezone(&Utc));
            }
            other => panic!("expected AlertStarted, got {other:?}"),
        }
    }
}
