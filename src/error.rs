//! Error types for FinMind's configuration and input parsing.
//!
//! The budget engine itself never fails; these cover the layers that read
//! user-supplied text (config files, amounts, month keys).

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),

    #[error("Invalid month '{0}'. Use YYYY-MM (e.g. 2026-02)")]
    InvalidMonth(String),
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
