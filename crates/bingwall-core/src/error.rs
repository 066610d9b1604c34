//! Error taxonomy.
//!
//! Only [`FetchError`] and [`DownloadError`] end a run. Everything else
//! degrades: a failing monitor write becomes an [`ApplyWarning`], a missing
//! display tool becomes a degraded topology.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::MonitorHandle;

/// Metadata could not be obtained or understood.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid archive request: {0}")]
    Request(String),
    #[error("archive request failed: {0}")]
    Transport(String),
    #[error("archive returned HTTP {0}")]
    Status(u16),
    #[error("archive response is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("archive response has no images")]
    NoImages,
    #[error("archive image url is invalid: {0}")]
    BadUrl(String),
}

/// The image could not be fetched or stored.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("no usable file name in {0}")]
    InvalidFileName(String),
    #[error("image request failed: {0}")]
    Transport(String),
    #[error("image server returned HTTP {0}")]
    Status(u16),
    /// xfconf only takes string values, so the cached path must be UTF-8.
    #[error("cache path is not valid UTF-8: {}", .0.display())]
    NonUtf8Path(PathBuf),
    #[error("cache i/o on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A desktop tool could not be used.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("{tool} could not be started")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{tool} exited with {code:?}: {stderr}")]
    Failed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("{tool} timed out after {secs}s")]
    Timeout { tool: String, secs: u64 },
}

/// One monitor's background property could not be written.
#[derive(Debug, Error)]
#[error("could not set background for {monitor}: {cause}")]
pub struct ApplyWarning {
    pub monitor: MonitorHandle,
    pub cause: CapabilityError,
}
