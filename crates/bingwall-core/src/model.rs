//! Values passed between pipeline stages.

use std::fmt;
use std::path::PathBuf;

use url::Url;

/// Pixel geometry of a display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A featured image resolved from the archive. `remote_url` is always absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub remote_url: Url,
    /// 0 = today, 1 = yesterday, ...
    pub day_offset: u32,
    pub market: String,
    pub requested: Resolution,
    pub title: Option<String>,
    pub copyright: Option<String>,
    pub start_date: Option<String>,
}

/// An image present in the local cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedImage {
    pub local_path: PathBuf,
    pub source_url: Url,
}

/// A connected output as reported by the display subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOutput {
    pub name: String,
    /// `None` when the output is connected but has no active mode.
    pub mode: Option<Resolution>,
}

impl DisplayOutput {
    pub fn new(name: impl Into<String>, mode: Option<Resolution>) -> Self {
        Self {
            name: name.into(),
            mode,
        }
    }
}

/// Monitor segment of a configuration-store path, e.g. `monitorHDMI-1-1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonitorHandle {
    pub id: String,
}

impl MonitorHandle {
    pub const PREFIX: &'static str = "monitor";

    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Handle used when nothing better is known.
    pub fn fallback() -> Self {
        Self::new("monitor0")
    }

    /// Handle for an output the store has never seen.
    pub fn synthesize(output_name: &str) -> Self {
        Self::new(format!("{}{output_name}", Self::PREFIX))
    }

    /// The id without its `monitor` prefix (`monitorHDMI-1-1` -> `HDMI-1-1`).
    pub fn connector(&self) -> &str {
        self.id.strip_prefix(Self::PREFIX).unwrap_or(&self.id)
    }
}

impl fmt::Display for MonitorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// One string key in the desktop configuration store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigProperty {
    pub path: String,
    pub value: String,
}

impl ConfigProperty {
    /// The background image property for `monitor` on screen 0, workspace 0.
    pub fn last_image(monitor: &MonitorHandle, value: impl Into<String>) -> Self {
        Self {
            path: format!("/backdrop/screen0/{}/workspace0/last-image", monitor.id),
            value: value.into(),
        }
    }
}
