// src/core/machine.rs — Transition table and commit side effects

use chrono::{DateTime, Utc};

use crate::core::state::{since, SessionSnapshot, SessionState};
use crate::infra::errors::FicharError;

/// Access-point tags understood by the clock service.
pub const POINT_WORKDAY: &str = "J";
pub const POINT_PAUSE: &str = "P";
pub const POINT_WAREHOUSE: &str = "9";

/// User-level actions, one per UI affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    StartWorkday,
    StartWarehouse,
    SwitchToWorkday,
    StartPause,
    EndPause,
    EndDay,
}

impl SessionAction {
    pub fn label(&self) -> &'static str {
        match self {
            SessionAction::StartWorkday => "start workday",
            SessionAction::StartWarehouse => "start warehouse",
            SessionAction::SwitchToWorkday => "switch to workday",
            SessionAction::StartPause => "start pause",
            SessionAction::EndPause => "end pause",
            SessionAction::EndDay => "end day",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Entrada,
    Salida,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Entrada => "entrada",
            Direction::Salida => "salida",
        }
    }
}

/// One elementary clock-in/out against a single access point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockStep {
    pub direction: Direction,
    pub point: &'static str,
}

impl ClockStep {
    fn entrada(point: &'static str) -> Self {
        Self {
            direction: Direction::Entrada,
            point,
        }
    }

    fn salida(point: &'static str) -> Self {
        Self {
            direction: Direction::Salida,
            point,
        }
    }
}

/// An ordered sequence of steps plus the state reached once the LAST step
/// succeeds. Steps already sent are never rolled back; the snapshot's
/// committed fields only change via [`commit`] after the full sequence.
#[derive(Debug, Clone)]
pub struct TransitionPlan {
    pub action: SessionAction,
    pub steps: Vec<ClockStep>,
    pub target: SessionState,
}

/// Build the step sequence for `action` from `state`, or fail with
/// `InvalidTransition` when the table has no entry. A pause is only ever
/// entered from the regular workday, so ending the day from a pause always
/// closes point J.
pub fn plan(state: SessionState, action: SessionAction) -> Result<TransitionPlan, FicharError> {
    use SessionAction::*;
    use SessionState::*;

    let (steps, target) = match (state, action) {
        (Outside, StartWorkday) => (vec![ClockStep::entrada(POINT_WORKDAY)], Workday),
        (Outside, StartWarehouse) => (vec![ClockStep::entrada(POINT_WAREHOUSE)], Warehouse),
        (Warehouse, SwitchToWorkday) => (
            vec![
                ClockStep::salida(POINT_WAREHOUSE),
                ClockStep::entrada(POINT_WORKDAY),
            ],
            Workday,
        ),
        (Workday, StartPause) => (
            vec![
                ClockStep::salida(POINT_WORKDAY),
                ClockStep::entrada(POINT_PAUSE),
            ],
            Pause,
        ),
        (Pause, EndPause) => (
            vec![
                ClockStep::salida(POINT_PAUSE),
                ClockStep::entrada(POINT_WORKDAY),
            ],
            Workday,
        ),
        (Workday, EndDay) => (vec![ClockStep::salida(POINT_WORKDAY)], Outside),
        (Warehouse, EndDay) => (vec![ClockStep::salida(POINT_WAREHOUSE)], Outside),
        (Pause, EndDay) => (
            vec![
                ClockStep::salida(POINT_PAUSE),
                ClockStep::salida(POINT_WORKDAY),
            ],
            Outside,
        ),
        _ => {
            return Err(FicharError::InvalidTransition {
                state: state.label().into(),
                action: action.label().into(),
            })
        }
    };

    Ok(TransitionPlan {
        action,
        steps,
        target,
    })
}

/// Actions with a table entry for `state`, in the order the original UI
/// offered them. Used to render the affordances; requesting anything else
/// is an internal-consistency fault.
pub fn available_actions(state: SessionState) -> &'static [SessionAction] {
    use SessionAction::*;
    match state {
        SessionState::Outside => &[StartWorkday, StartWarehouse],
        SessionState::Warehouse => &[SwitchToWorkday, EndDay],
        SessionState::Workday => &[StartPause, EndDay],
        SessionState::Pause => &[EndPause, EndDay],
    }
}

/// Apply the side effects of a fully-completed transition. Must only be
/// called after every step of the plan succeeded.
pub fn commit(snapshot: &mut SessionSnapshot, plan: &TransitionPlan, now: DateTime<Utc>) {
    snapshot.current_state = plan.target;
    match plan.action {
        SessionAction::StartWorkday | SessionAction::StartWarehouse => {
            snapshot.work_start = Some(now);
        }
        SessionAction::StartPause => {
            snapshot.pause_start = Some(now);
        }
        SessionAction::EndPause => {
            if let Some(start) = snapshot.pause_start.take() {
                snapshot.total_pause_today += since(start, now);
            }
            snapshot.alarm_active = false;
        }
        SessionAction::EndDay => {
            snapshot.reset_day();
        }
        SessionAction::SwitchToWorkday => {}
    }
}
