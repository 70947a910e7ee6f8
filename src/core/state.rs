// src/core/state.rs — Session states and the persisted snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Attendance state. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Outside,
    Workday,
    Pause,
    Warehouse,
}

impl SessionState {
    pub fn label(&self) -> &'static str {
        match self {
            SessionState::Outside => "outside",
            SessionState::Workday => "working",
            SessionState::Pause => "on pause",
            SessionState::Warehouse => "warehouse",
        }
    }
}

/// A geolocation fix, forwarded verbatim to the clock service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub timestamp: DateTime<Utc>,
}

impl GeoFix {
    /// The clock service rejects non-numeric coordinates, so catch them here.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// The single persisted record. Created once at startup, mutated in place by
/// each completed transition, saved after every mutation. Never destroyed,
/// only reset to its Outside defaults at end of day.
///
/// Invariants:
/// - `pause_start` is set iff `current_state == Pause`.
/// - `work_start` is set iff `current_state != Outside`.
/// - `total_pause_today` only increases, and resets only on end of day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub current_state: SessionState,
    pub work_start: Option<DateTime<Utc>>,
    pub pause_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_pause_today: Duration,
    pub last_fix: Option<GeoFix>,
    #[serde(default)]
    pub alarm_active: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            current_state: SessionState::Outside,
            work_start: None,
            pause_start: None,
            total_pause_today: Duration::ZERO,
            last_fix: None,
            alarm_active: false,
        }
    }
}

impl SessionSnapshot {
    /// Duration of the in-progress pause, zero when not pausing.
    pub fn pause_elapsed(&self, now: DateTime<Utc>) -> Duration {
        self.pause_start.map_or(Duration::ZERO, |start| since(start, now))
    }

    /// Back to the Outside defaults for the next day. The state itself is
    /// set by the transition commit, not here.
    pub fn reset_day(&mut self) {
        self.work_start = None;
        self.pause_start = None;
        self.total_pause_today = Duration::ZERO;
        self.alarm_active = false;
    }
}

/// Wall-clock difference clamped at zero, so clock skew never produces a
/// negative duration.
pub fn since(earlier: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - earlier).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn since_clamps_negative_to_zero() {
        let t0 = Utc.with_ymd_and_hms(2026, 2, 3, 9, 0, 0).unwrap();
        let t1 = t0 + chrono::Duration::seconds(30);
        assert_eq!(since(t0, t1), Duration::from_secs(30));
        assert_eq!(since(t1, t0), Duration::ZERO);
    }

    #[test]
    fn default_snapshot_is_outside() {
        let s = SessionSnapshot::default();
        assert_eq!(s.current_state, SessionState::Outside);
        assert!(s.work_start.is_none());
        assert!(s.pause_start.is_none());
        assert_eq!(s.total_pause_today, Duration::ZERO);
        assert!(!s.alarm_active);
    }

    #[test]
    fn geofix_rejects_nan() {
        let fix = GeoFix {
            latitude: f64::NAN,
            longitude: -0.37,
            accuracy: 12.0,
            timestamp: Utc::now(),
        };
        assert!(!fix.is_valid());
    }

    #[test]
    fn snapshot_roundtrips_through_json() {
        let t0 = Utc.with_ymd_and_hms(2026, 2, 3, 8, 0, 0).unwrap();
        let snapshot = SessionSnapshot {
            current_state: SessionState::Pause,
            work_start: Some(t0),
            pause_start: Some(t0 + chrono::Duration::hours(2)),
            total_pause_today: Duration::from_secs(600),
            last_fix: None,
            alarm_active: false,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.current_state, SessionState::Pause);
        assert_eq!(back.work_start, Some(t0));
        assert_eq!(back.total_pause_today, Duration::from_secs(600));
    }
}
