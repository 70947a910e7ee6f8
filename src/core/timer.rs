// src/core/timer.rs — Elapsed-time recomputation and the pause alarm

use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::core::state::{since, SessionSnapshot, SessionState};

/// Pause thresholds. The alarm fires before the real limit (15/30 min
/// depending on break type, not enforced here) so there is time to walk back.
#[derive(Debug, Clone, Copy)]
pub struct PauseRules {
    pub alarm_after: Duration,
    pub min_pause: Duration,
}

impl Default for PauseRules {
    fn default() -> Self {
        Self {
            alarm_after: Duration::from_secs(14 * 60),
            min_pause: Duration::from_secs(5 * 60),
        }
    }
}

/// What a single tick renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerDisplay {
    pub state: SessionState,
    pub work: Duration,
    pub pause: Duration,
    pub alarm_active: bool,
}

impl TimerDisplay {
    pub fn work_hms(&self) -> String {
        format_hms(self.work)
    }

    pub fn pause_hms(&self) -> String {
        format_hms(self.pause)
    }
}

/// Recomputes displayed durations from the snapshot's timestamps once per
/// second. Read-only with respect to committed fields; the only thing a tick
/// may touch is the derived `alarm_active` flag.
#[derive(Debug, Default)]
pub struct TimerEngine {
    rules: PauseRules,
}

impl TimerEngine {
    pub fn new(rules: PauseRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &PauseRules {
        &self.rules
    }

    pub fn tick(&self, snapshot: &mut SessionSnapshot, now: DateTime<Utc>) -> TimerDisplay {
        if snapshot.current_state == SessionState::Outside {
            snapshot.alarm_active = false;
            return TimerDisplay {
                state: SessionState::Outside,
                work: Duration::ZERO,
                pause: Duration::ZERO,
                alarm_active: false,
            };
        }

        let mut work = snapshot
            .work_start
            .map_or(Duration::ZERO, |start| since(start, now))
            .saturating_sub(snapshot.total_pause_today);

        let (pause, over_threshold) = if snapshot.current_state == SessionState::Pause {
            // The in-progress pause is not in the accumulator yet.
            let in_progress = snapshot.pause_elapsed(now);
            work = work.saturating_sub(in_progress);
            (in_progress, in_progress > self.rules.alarm_after)
        } else {
            (snapshot.total_pause_today, false)
        };

        if over_threshold && !snapshot.alarm_active {
            tracing::warn!(
                pause = %format_hms(pause),
                "pause time exceeded, return to work"
            );
        }
        snapshot.alarm_active = over_threshold;

        TimerDisplay {
            state: snapshot.current_state,
            work,
            pause,
            alarm_active: snapshot.alarm_active,
        }
    }

    /// Guard for "end pause": the clock service only accepts a return after
    /// the minimum pause has run. Checked before a transition is planned.
    pub fn can_end_pause(&self, snapshot: &SessionSnapshot, now: DateTime<Utc>) -> bool {
        snapshot.current_state == SessionState::Pause
            && snapshot.pause_elapsed(now) > self.rules.min_pause
    }

    /// Time left until the minimum pause is satisfied.
    pub fn min_pause_remaining(&self, snapshot: &SessionSnapshot, now: DateTime<Utc>) -> Duration {
        self.rules
            .min_pause
            .saturating_sub(snapshot.pause_elapsed(now))
    }
}

/// `HH:MM:SS` from whole seconds, floored. Negative inputs never reach here,
/// durations are clamped at subtraction time.
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
