// src/core/mod.rs — Session domain: state, transitions, timers, orchestration

pub mod controller;
pub mod machine;
pub mod state;
pub mod timer;
