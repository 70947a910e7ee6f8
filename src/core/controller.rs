// src/core/controller.rs — Action handler: location, steps, commit, persist

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::clock::ClockService;
use crate::core::machine::{self, SessionAction};
use crate::core::state::{SessionSnapshot, SessionState};
use crate::core::timer::{format_hms, PauseRules, TimerDisplay, TimerEngine};
use crate::infra::errors::FicharError;
use crate::infra::store::StateStore;
use crate::location::LocationProvider;

/// Owns the single session snapshot and serializes everything that touches
/// it. An action runs as: guard checks → fresh fix → ordered clock steps →
/// commit → persist. Committed fields only change after the full step
/// sequence succeeded; a failure partway leaves the snapshot at its last
/// committed state (already-sent steps have no server-side undo).
pub struct Controller {
    snapshot: Mutex<SessionSnapshot>,
    clock: Arc<dyn ClockService>,
    location: Arc<dyn LocationProvider>,
    store: StateStore,
    engine: TimerEngine,
}

impl Controller {
    pub fn new(
        snapshot: SessionSnapshot,
        clock: Arc<dyn ClockService>,
        location: Arc<dyn LocationProvider>,
        store: StateStore,
        rules: PauseRules,
    ) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            clock,
            location,
            store,
            engine: TimerEngine::new(rules),
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.lock().await.clone()
    }

    /// One timer tick: recompute the displayed durations and the alarm flag.
    pub async fn tick(&self, now: DateTime<Utc>) -> TimerDisplay {
        let mut guard = self.snapshot.lock().await;
        self.engine.tick(&mut guard, now)
    }

    /// Replace the in-memory snapshot with the persisted one. The watch loop
    /// calls this each tick so transitions committed by another invocation
    /// show up live; the store writes atomically, so a concurrent commit is
    /// seen either whole or not yet.
    pub async fn reload(&self) -> Result<(), FicharError> {
        let fresh = self.store.load()?;
        *self.snapshot.lock().await = fresh;
        Ok(())
    }

    pub async fn apply(&self, action: SessionAction) -> Result<SessionSnapshot, FicharError> {
        self.apply_at(action, Utc::now()).await
    }

    /// Run `action` with `now` as the decision and commit instant
    /// (injected for tests; [`Controller::apply`] passes the wall clock).
    pub async fn apply_at(
        &self,
        action: SessionAction,
        now: DateTime<Utc>,
    ) -> Result<SessionSnapshot, FicharError> {
        // One transition at a time; a second action while a remote call is
        // pending is rejected, not queued.
        let mut guard = self
            .snapshot
            .try_lock()
            .map_err(|_| FicharError::TransitionInProgress)?;

        // Guard applies to an actual pause; from any other state the
        // transition table decides (and reports InvalidTransition).
        if action == SessionAction::EndPause
            && guard.current_state == SessionState::Pause
            && !self.engine.can_end_pause(&guard, now)
        {
            return Err(FicharError::PauseTooShort {
                remaining: format_hms(self.engine.min_pause_remaining(&guard, now)),
            });
        }

        let plan = machine::plan(guard.current_state, action)?;

        let fix = self.location.fetch().await?;
        guard.last_fix = Some(fix.clone());

        for (index, step) in plan.steps.iter().enumerate() {
            if let Err(e) = self.clock.punch(*step, &fix).await {
                tracing::warn!(
                    action = action.label(),
                    committed = index,
                    total = plan.steps.len(),
                    "transition aborted; state stays '{}'",
                    guard.current_state.label()
                );
                return Err(e);
            }
            tracing::info!("{} {} registered", step.direction.as_str(), step.point);
        }

        machine::commit(&mut guard, &plan, now);
        self.store.save(&guard)?;
        tracing::info!(
            action = action.label(),
            "now '{}'",
            guard.current_state.label()
        );
        Ok(guard.clone())
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }
}
