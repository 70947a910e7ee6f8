// tests/controller_test.rs — Integration test: controller with a mock clock service

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use pretty_assertions::assert_eq;

use fichar::clock::ClockService;
use fichar::core::controller::Controller;
use fichar::core::machine::{ClockStep, SessionAction};
use fichar::core::state::{GeoFix, SessionSnapshot, SessionState};
use fichar::core::timer::PauseRules;
use fichar::infra::errors::FicharError;
use fichar::infra::store::StateStore;
use fichar::location::{LocationError, LocationProvider};

/// Records every punch and can be told to fail from a given step on,
/// without making any network calls.
struct MockClock {
    punches: Mutex<Vec<(String, String)>>,
    fail_from: Option<usize>,
    delay: Option<Duration>,
}

impl MockClock {
    fn new() -> Self {
        Self {
            punches: Mutex::new(Vec::new()),
            fail_from: None,
            delay: None,
        }
    }

    fn failing_from(index: usize) -> Self {
        Self {
            fail_from: Some(index),
            ..Self::new()
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    fn punches(&self) -> Vec<(String, String)> {
        self.punches.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClockService for MockClock {
    fn id(&self) -> &str {
        "mock"
    }

    async fn punch(&self, step: ClockStep, _fix: &GeoFix) -> Result<(), FicharError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let mut punches = self.punches.lock().unwrap();
        if self.fail_from.is_some_and(|n| punches.len() >= n) {
            return Err(FicharError::ClockService {
                message: "login failed".into(),
            });
        }
        punches.push((step.direction.as_str().into(), step.point.into()));
        Ok(())
    }
}

struct MockLocation {
    fail: bool,
}

#[async_trait]
impl LocationProvider for MockLocation {
    fn id(&self) -> &str {
        "mock"
    }

    async fn fetch(&self) -> Result<GeoFix, FicharError> {
        if self.fail {
            return Err(LocationError::SignalUnavailable.into());
        }
        Ok(GeoFix {
            latitude: 39.4699,
            longitude: -0.3763,
            accuracy: 10.0,
            timestamp: Utc::now(),
        })
    }
}

struct Harness {
    controller: Arc<Controller>,
    clock: Arc<MockClock>,
    store: StateStore,
    _dir: tempfile::TempDir,
}

fn harness_with(clock: MockClock, snapshot: SessionSnapshot, location_fails: bool) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path().join("state.json"));
    let clock = Arc::new(clock);
    let controller = Arc::new(Controller::new(
        snapshot,
        clock.clone(),
        Arc::new(MockLocation {
            fail: location_fails,
        }),
        store.clone(),
        PauseRules::default(),
    ));
    Harness {
        controller,
        clock,
        store,
        _dir: dir,
    }
}

fn harness(clock: MockClock) -> Harness {
    harness_with(clock, SessionSnapshot::default(), false)
}

fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 3, hour, min, 0).unwrap()
}

#[tokio::test]
async fn full_day_commits_each_state_in_turn() {
    let h = harness(MockClock::new());

    let s = h
        .controller
        .apply_at(SessionAction::StartWorkday, at(8, 0))
        .await
        .unwrap();
    assert_eq!(s.current_state, SessionState::Workday);
    assert_eq!(s.work_start, Some(at(8, 0)));

    let s = h
        .controller
        .apply_at(SessionAction::StartPause, at(10, 0))
        .await
        .unwrap();
    assert_eq!(s.current_state, SessionState::Pause);
    assert_eq!(s.pause_start, Some(at(10, 0)));

    let s = h
        .controller
        .apply_at(SessionAction::EndPause, at(10, 20))
        .await
        .unwrap();
    assert_eq!(s.current_state, SessionState::Workday);
    assert_eq!(s.total_pause_today, Duration::from_secs(20 * 60));
    assert!(s.pause_start.is_none());
    assert!(!s.alarm_active);

    let s = h
        .controller
        .apply_at(SessionAction::EndDay, at(17, 0))
        .await
        .unwrap();
    assert_eq!(s.current_state, SessionState::Outside);
    assert!(s.work_start.is_none());
    assert_eq!(s.total_pause_today, Duration::ZERO);

    let expected: Vec<(String, String)> = [
        ("entrada", "J"),
        ("salida", "J"),
        ("entrada", "P"),
        ("salida", "P"),
        ("entrada", "J"),
        ("salida", "J"),
    ]
    .iter()
    .map(|(d, p)| (d.to_string(), p.to_string()))
    .collect();
    assert_eq!(h.clock.punches(), expected);
}

#[tokio::test]
async fn partial_failure_keeps_last_committed_state() {
    // End day from a pause: salida:P succeeds, salida:J fails.
    let snapshot = SessionSnapshot {
        current_state: SessionState::Pause,
        work_start: Some(at(8, 0)),
        pause_start: Some(at(12, 0)),
        ..Default::default()
    };
    let h = harness_with(MockClock::failing_from(1), snapshot, false);

    let err = h
        .controller
        .apply_at(SessionAction::EndDay, at(12, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, FicharError::ClockService { .. }));

    // Only the leading step went out; the snapshot still reports Pause.
    assert_eq!(
        h.clock.punches(),
        vec![("salida".to_string(), "P".to_string())]
    );
    let s = h.controller.snapshot().await;
    assert_eq!(s.current_state, SessionState::Pause);
    assert_eq!(s.pause_start, Some(at(12, 0)));
}

#[tokio::test]
async fn location_failure_aborts_before_any_step() {
    let h = harness_with(MockClock::new(), SessionSnapshot::default(), true);

    let err = h
        .controller
        .apply_at(SessionAction::StartWorkday, at(8, 0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        FicharError::Location(LocationError::SignalUnavailable)
    ));
    assert!(h.clock.punches().is_empty());
    let s = h.controller.snapshot().await;
    assert_eq!(s.current_state, SessionState::Outside);
}

#[tokio::test]
async fn end_pause_is_guarded_by_the_minimum() {
    let snapshot = SessionSnapshot {
        current_state: SessionState::Pause,
        work_start: Some(at(8, 0)),
        pause_start: Some(at(10, 0)),
        ..Default::default()
    };
    let h = harness_with(MockClock::new(), snapshot, false);

    let err = h
        .controller
        .apply_at(SessionAction::EndPause, at(10, 3))
        .await
        .unwrap_err();
    assert!(matches!(err, FicharError::PauseTooShort { .. }));
    assert!(h.clock.punches().is_empty());

    // Past the minimum the same action goes through.
    let s = h
        .controller
        .apply_at(SessionAction::EndPause, at(10, 6))
        .await
        .unwrap();
    assert_eq!(s.current_state, SessionState::Workday);
    assert_eq!(s.total_pause_today, Duration::from_secs(6 * 60));
}

#[tokio::test]
async fn end_pause_outside_a_pause_is_an_invalid_transition() {
    // The minimum-pause guard must not shadow the transition table when
    // there is no pause to end.
    let h = harness(MockClock::new());
    let err = h
        .controller
        .apply_at(SessionAction::EndPause, at(8, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, FicharError::InvalidTransition { .. }));

    let snapshot = SessionSnapshot {
        current_state: SessionState::Workday,
        work_start: Some(at(8, 0)),
        ..Default::default()
    };
    let h = harness_with(MockClock::new(), snapshot, false);
    let err = h
        .controller
        .apply_at(SessionAction::EndPause, at(9, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, FicharError::InvalidTransition { .. }));
    assert!(h.clock.punches().is_empty());
}

#[tokio::test]
async fn reload_picks_up_a_commit_from_another_invocation() {
    let h = harness(MockClock::new());

    // Another process commits a pause and persists it.
    let committed = SessionSnapshot {
        current_state: SessionState::Pause,
        work_start: Some(at(8, 0)),
        pause_start: Some(at(10, 0)),
        ..Default::default()
    };
    h.store.save(&committed).unwrap();

    h.controller.reload().await.unwrap();
    let display = h.controller.tick(at(10, 16)).await;
    assert_eq!(display.state, SessionState::Pause);
    assert_eq!(display.pause_hms(), "00:16:00");
    assert!(display.alarm_active);
}

#[tokio::test]
async fn invalid_action_is_rejected_without_side_effects() {
    let h = harness(MockClock::new());
    let err = h
        .controller
        .apply_at(SessionAction::StartPause, at(8, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, FicharError::InvalidTransition { .. }));
    assert!(h.clock.punches().is_empty());
}

#[tokio::test]
async fn concurrent_action_is_rejected_while_one_is_in_flight() {
    let h = harness(MockClock::slow(Duration::from_millis(200)));

    let controller = h.controller.clone();
    let first =
        tokio::spawn(async move { controller.apply_at(SessionAction::StartWorkday, at(8, 0)).await });

    tokio::time::sleep(Duration::from_millis(50)).await;
    let err = h
        .controller
        .apply_at(SessionAction::StartWarehouse, at(8, 0))
        .await
        .unwrap_err();
    assert!(matches!(err, FicharError::TransitionInProgress));

    let s = first.await.unwrap().unwrap();
    assert_eq!(s.current_state, SessionState::Workday);
}

#[tokio::test]
async fn committed_snapshot_is_persisted() {
    let h = harness(MockClock::new());
    h.controller
        .apply_at(SessionAction::StartWorkday, at(8, 0))
        .await
        .unwrap();

    let reloaded = h.store.load().unwrap();
    assert_eq!(reloaded.current_state, SessionState::Workday);
    assert_eq!(reloaded.work_start, Some(at(8, 0)));
    assert!(reloaded.last_fix.is_some());
}

#[tokio::test]
async fn failed_transition_is_not_persisted() {
    let h = harness_with(
        MockClock::failing_from(0),
        SessionSnapshot::default(),
        false,
    );
    let _ = h
        .controller
        .apply_at(SessionAction::StartWorkday, at(8, 0))
        .await
        .unwrap_err();

    let reloaded = h.store.load().unwrap();
    assert_eq!(reloaded.current_state, SessionState::Outside);
    assert!(reloaded.last_fix.is_none());
}
