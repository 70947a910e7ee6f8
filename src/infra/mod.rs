// src/infra/mod.rs — Infrastructure: errors, config, logging, paths, store

pub mod config;
pub mod errors;
pub mod logger;
pub mod paths;
pub mod store;
