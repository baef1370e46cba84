//! Errors for the fallible edges of the crate.
//!
//! Rasterization itself never fails; only configuration loading and
//! validation can.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SketchError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read configuration from {path}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T, E = SketchError> = std::result::Result<T, E>;
