// src/cli/actions.rs — Attendance action commands

use chrono::Utc;

use crate::core::controller::Controller;
use crate::core::machine::SessionAction;

/// Run one attendance action and print the resulting state and timers.
pub async fn run_action(controller: &Controller, action: SessionAction) -> anyhow::Result<()> {
    controller.apply(action).await?;
    let display = controller.tick(Utc::now()).await;
    println!(
        "{}  |  work {}  pause {}",
        display.state.label(),
        display.work_hms(),
        display.pause_hms()
    );
    Ok(())
}
