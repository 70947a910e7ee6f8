// src/infra/errors.rs — Error types for fichar

use thiserror::Error;

use crate::location::LocationError;

#[derive(Error, Debug)]
pub enum FicharError {
    // Aborts the action before any step is sent
    #[error("location unavailable: {0}")]
    Location(#[from] LocationError),

    // A remote step failed; earlier steps of the sequence are not rolled back
    #[error("clock service error: {message}")]
    ClockService { message: String },

    // Internal-consistency fault: the UI only offers valid actions
    #[error("no '{action}' transition from state '{state}'")]
    InvalidTransition { state: String, action: String },

    #[error("another transition is already in progress")]
    TransitionInProgress,

    #[error("minimum pause not reached, {remaining} remaining")]
    PauseTooShort { remaining: String },

    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
