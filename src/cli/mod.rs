// src/cli/mod.rs — CLI definition (clap derive)

pub mod actions;
pub mod status;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fichar", about = "Work-session clock-in tracker", version)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clock in and start the workday (point J)
    Start,
    /// Clock in at the warehouse (point 9)
    Warehouse,
    /// Leave the warehouse and start the regular workday (9 -> J)
    Workday,
    /// Start a pause (point P)
    Pause,
    /// End the current pause and return to work
    Resume,
    /// Clock out and end the day
    End,
    /// Show current state and timers
    Status,
    /// Live timer display, refreshed every second (Ctrl+C to stop)
    Watch,
}
