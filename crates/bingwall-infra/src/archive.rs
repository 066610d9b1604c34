//! Resolve the image of the day from the archive endpoint.

use tracing::{debug, info};

use bingwall_core::archive::{self, ArchiveQuery};
use bingwall_core::error::FetchError;
use bingwall_core::model::ImageDescriptor;
use bingwall_core::settings::Settings;

use crate::http::{Timeouts, Transport, TransportError};

pub struct MetadataResolver<'a> {
    settings: &'a Settings,
    transport: &'a dyn Transport,
}

impl<'a> MetadataResolver<'a> {
    pub fn new(settings: &'a Settings, transport: &'a dyn Transport) -> Self {
        Self {
            settings,
            transport,
        }
    }

    /// One GET, no retry.
    pub fn resolve(&self, query: &ArchiveQuery) -> Result<ImageDescriptor, FetchError> {
        let url = archive::request_url(self.settings, query)?;

        let mut body = Vec::new();
        self.transport
            .get(&url, Timeouts::flat(self.settings.metadata_timeout), &mut body)
            .map_err(|err| match err {
                TransportError::Status(code) => FetchError::Status(code),
                other => FetchError::Transport(other.to_string()),
            })?;
        debug!(bytes = body.len(), "archive response received");

        let body = String::from_utf8_lossy(&body);
        let descriptor = archive::parse_response(&body, &self.settings.origin, query)?;
        info!(
            url = %descriptor.remote_url,
            title = descriptor.title.as_deref().unwrap_or(""),
            "resolved image of the day"
        );
        Ok(descriptor)
    }
}
