//! Image-of-the-day archive request/response codec.

use serde::Deserialize;
use url::Url;

use crate::error::FetchError;
use crate::model::{ImageDescriptor, Resolution};
use crate::settings::Settings;

/// What to ask the archive for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveQuery {
    pub day_offset: u32,
    pub resolution: Resolution,
    pub market: String,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    images: Vec<ArchiveImage>,
}

#[derive(Debug, Deserialize)]
struct ArchiveImage {
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    copyright: Option<String>,
    #[serde(default, rename = "startdate")]
    start_date: Option<String>,
}

/// Build the metadata request URL.
///
/// `<origin><archive_path>?format=js&idx=<day>&n=1&mkt=<market>[&uhd=1&uhdwidth=<w>&uhdheight=<h>]`
pub fn request_url(settings: &Settings, query: &ArchiveQuery) -> Result<Url, FetchError> {
    let mut url = settings
        .origin
        .join(&settings.archive_path)
        .map_err(|e| FetchError::Request(e.to_string()))?;

    {
        let mut q = url.query_pairs_mut();
        q.clear()
            .append_pair("format", "js")
            .append_pair("idx", &query.day_offset.to_string())
            .append_pair("n", "1")
            .append_pair("mkt", &query.market);
        if settings.uhd {
            q.append_pair("uhd", "1")
                .append_pair("uhdwidth", &query.resolution.width.to_string())
                .append_pair("uhdheight", &query.resolution.height.to_string());
        }
    }

    Ok(url)
}

/// Parse an archive response body into a descriptor.
///
/// Root-relative image URLs are resolved against `origin`.
pub fn parse_response(
    body: &str,
    origin: &Url,
    query: &ArchiveQuery,
) -> Result<ImageDescriptor, FetchError> {
    let resp: ArchiveResponse = serde_json::from_str(body)?;
    let first = resp.images.into_iter().next().ok_or(FetchError::NoImages)?;

    let raw = first.url.trim();
    if raw.is_empty() {
        return Err(FetchError::NoImages);
    }
    let remote_url = origin
        .join(raw)
        .map_err(|e| FetchError::BadUrl(format!("{raw}: {e}")))?;

    Ok(ImageDescriptor {
        remote_url,
        day_offset: query.day_offset,
        market: query.market.clone(),
        requested: query.resolution,
        title: first.title.filter(|s| !s.is_empty()),
        copyright: first.copyright.filter(|s| !s.is_empty()),
        start_date: first.start_date.filter(|s| !s.is_empty()),
    })
}

/// Cache file name for an image URL: everything after the last `/`, query
/// included, fragment dropped.
///
/// Returns `None` for names that cannot be a regular file in a directory.
pub fn cache_file_name(url: &Url) -> Option<&str> {
    let s = url.as_str();
    let s = s.split_once('#').map_or(s, |(before, _)| before);
    let name = s.rsplit('/').next()?;
    match name {
        "" | "." | ".." => None,
        n => Some(n),
    }
}
