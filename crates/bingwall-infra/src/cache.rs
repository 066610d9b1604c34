//! On-disk image cache keyed by the image URL's file name.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use bingwall_core::archive::cache_file_name;
use bingwall_core::error::DownloadError;
use bingwall_core::model::{CachedImage, ImageDescriptor};
use bingwall_core::settings::Settings;

use crate::http::{Timeouts, Transport, TransportError};

pub struct ImageCache<'a> {
    dir: &'a Path,
    timeouts: Timeouts,
    transport: &'a dyn Transport,
}

impl<'a> ImageCache<'a> {
    pub fn new(settings: &'a Settings, transport: &'a dyn Transport) -> Self {
        Self {
            dir: &settings.cache_dir,
            timeouts: Timeouts {
                io: settings.image_timeout,
                total: settings.image_total_timeout,
            },
            transport,
        }
    }

    /// Where the image for `descriptor` lives (or will live).
    ///
    /// Rejected before any network access if the path is not UTF-8.
    pub fn local_path(&self, descriptor: &ImageDescriptor) -> Result<PathBuf, DownloadError> {
        let name = cache_file_name(&descriptor.remote_url)
            .ok_or_else(|| DownloadError::InvalidFileName(descriptor.remote_url.to_string()))?;
        let path = self.dir.join(name);
        if path.to_str().is_none() {
            return Err(DownloadError::NonUtf8Path(path));
        }
        Ok(path)
    }

    /// Return the cached file, downloading it first on a miss.
    ///
    /// The body is streamed to a temporary file in the cache directory and
    /// renamed into place, so the final path only ever holds a complete image.
    pub fn ensure(&self, descriptor: &ImageDescriptor) -> Result<CachedImage, DownloadError> {
        let local_path = self.local_path(descriptor)?;
        let cached = CachedImage {
            local_path: local_path.clone(),
            source_url: descriptor.remote_url.clone(),
        };

        if local_path.is_file() {
            info!(path = %local_path.display(), "image already cached");
            return Ok(cached);
        }

        fs::create_dir_all(self.dir).map_err(|source| io_err(self.dir, source))?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".bingwall-")
            .suffix(".part")
            .tempfile_in(self.dir)
            .map_err(|source| io_err(self.dir, source))?;

        let bytes = self
            .transport
            .get(&descriptor.remote_url, self.timeouts, tmp.as_file_mut())
            .map_err(|err| match err {
                TransportError::Status(code) => DownloadError::Status(code),
                other => DownloadError::Transport(other.to_string()),
            })?;
        debug!(bytes, "image body received");

        tmp.as_file_mut()
            .flush()
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|source| io_err(tmp.path(), source))?;

        tmp.persist(&local_path)
            .map_err(|e| io_err(&local_path, e.error))?;

        info!(path = %local_path.display(), bytes, "image downloaded");
        Ok(cached)
    }
}

fn io_err(path: &Path, source: std::io::Error) -> DownloadError {
    DownloadError::Io {
        path: path.to_path_buf(),
        source,
    }
}
