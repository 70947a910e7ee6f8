// src/lib.rs — Library root for fichar

pub mod cli;
pub mod clock;
pub mod core;
pub mod infra;
pub mod location;
