// src/cli/status.rs — State display and live watch loop

use chrono::Utc;
use std::io::Write;

use crate::core::controller::Controller;
use crate::core::machine;
use crate::core::timer::{format_hms, TimerDisplay};

/// One-shot render of the current state, timers, and available actions.
pub async fn show_status(controller: &Controller) -> anyhow::Result<()> {
    let now = Utc::now();
    let display = controller.tick(now).await;
    let snapshot = controller.snapshot().await;

    println!("fichar v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("  State:      {}", display.state.label());
    println!("  Work:       {}", display.work_hms());
    println!("  Pause:      {}", display.pause_hms());
    if display.alarm_active {
        println!("  Alarm:      PAUSE TIME EXCEEDED");
    }
    if let Some(fix) = &snapshot.last_fix {
        println!(
            "  Last fix:   {:.4}, {:.4} (±{:.0}m)",
            fix.latitude, fix.longitude, fix.accuracy
        );
    }

    let engine = controller.engine();
    let actions: Vec<&str> = machine::available_actions(display.state)
        .iter()
        .filter(|a| {
            **a != machine::SessionAction::EndPause || engine.can_end_pause(&snapshot, now)
        })
        .map(|a| a.label())
        .collect();
    println!("  Available:  {}", actions.join(", "));
    if machine::available_actions(display.state).contains(&machine::SessionAction::EndPause)
        && !engine.can_end_pause(&snapshot, now)
    {
        println!(
            "  Minimum pause not reached, {} remaining",
            format_hms(engine.min_pause_remaining(&snapshot, now))
        );
    }
    Ok(())
}

/// 1 Hz live render. Rings the terminal bell once when the pause alarm
/// activates; Ctrl+C stops the loop.
pub async fn watch(controller: &Controller) -> anyhow::Result<()> {
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut interval = tokio::time::interval(std::time::Duration::from_secs(1));
    let mut alarm_was_active = false;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // Pick up commits made by other invocations (second terminal)
                if let Err(e) = controller.reload().await {
                    tracing::warn!("state reload failed: {e}");
                }
                let display = controller.tick(Utc::now()).await;
                render_line(&display, &mut alarm_was_active)?;
            }
            _ = &mut shutdown => {
                println!();
                break;
            }
        }
    }
    Ok(())
}

fn render_line(display: &TimerDisplay, alarm_was_active: &mut bool) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    let alarm = if display.alarm_active {
        "  [PAUSE TIME EXCEEDED]"
    } else {
        ""
    };
    write!(
        out,
        "\r\x1b[K{}  |  work {}  pause {}{}",
        display.state.label(),
        display.work_hms(),
        display.pause_hms(),
        alarm
    )?;
    if display.alarm_active && !*alarm_was_active {
        // Bell on the rising edge only
        write!(out, "\x07")?;
    }
    *alarm_was_active = display.alarm_active;
    out.flush()?;
    Ok(())
}
