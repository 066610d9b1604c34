//! Run-wide constants, built once and passed to every stage.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::model::Resolution;

pub const DEFAULT_ORIGIN: &str = "https://www.bing.com";
pub const ARCHIVE_PATH: &str = "/HPImageArchive.aspx";
pub const DEFAULT_MARKET: &str = "en-US";
pub const XFCE_DESKTOP_CHANNEL: &str = "xfce4-desktop";
pub const FALLBACK_RESOLUTION: Resolution = Resolution::new(1920, 1080);

#[derive(Debug, Clone)]
pub struct Settings {
    pub origin: Url,
    pub archive_path: String,
    pub market: String,
    /// Send `uhd=1&uhdwidth=..&uhdheight=..` hints.
    pub uhd: bool,
    pub cache_dir: PathBuf,
    pub channel: String,
    pub fallback_resolution: Resolution,
    /// Connect and per-read limit for metadata; also caps the whole request.
    pub metadata_timeout: Duration,
    /// Connect and per-read limit for the image body.
    pub image_timeout: Duration,
    /// Cap on the whole image transfer.
    pub image_total_timeout: Duration,
    pub command_timeout: Duration,
}

impl Settings {
    pub fn new(origin: Url, cache_dir: PathBuf) -> Self {
        Self {
            origin,
            archive_path: ARCHIVE_PATH.to_string(),
            market: DEFAULT_MARKET.to_string(),
            uhd: true,
            cache_dir,
            channel: XFCE_DESKTOP_CHANNEL.to_string(),
            fallback_resolution: FALLBACK_RESOLUTION,
            metadata_timeout: Duration::from_secs(10),
            image_timeout: Duration::from_secs(30),
            image_total_timeout: Duration::from_secs(600),
            command_timeout: Duration::from_secs(5),
        }
    }
}
