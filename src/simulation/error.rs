// src/simulation/error.rs

use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("number of servers must be at least 1")]
    NoServers,

    #[error("hours in a work day must be at least 1")]
    NoHours,

    #[error("clock ticks per hour must be at least 1")]
    NoTicksPerHour,
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("could not read {field}: {value:?} is not a valid value")]
    Input { field: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SimResult<T> = Result<T, SimError>;
