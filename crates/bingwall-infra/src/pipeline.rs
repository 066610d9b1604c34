//! One wallpaper run: resolution -> metadata -> cache -> topology -> apply.
//!
//! Steps run strictly in order and none is retried; the next scheduled
//! invocation is the retry. Only metadata and download failures abort.

use thiserror::Error;
use tracing::{debug, info};

use bingwall_core::apply::{self, AppliedResult};
use bingwall_core::archive::ArchiveQuery;
use bingwall_core::desktop::DesktopSession;
use bingwall_core::error::{DownloadError, FetchError};
use bingwall_core::model::{CachedImage, ImageDescriptor, Resolution};
use bingwall_core::resolution;
use bingwall_core::settings::Settings;
use bingwall_core::topology::{self, Topology, TopologyStrategy};

use crate::archive::MetadataResolver;
use crate::cache::ImageCache;
use crate::http::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    ResolvingResolution,
    FetchingMetadata,
    Caching,
    ResolvingTopology,
    Applying,
    Done,
    Aborted,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Download(#[from] DownloadError),
}

impl PipelineError {
    /// The state the run was in when it aborted.
    pub fn aborted_in(&self) -> RunState {
        match self {
            Self::Fetch(_) => RunState::FetchingMetadata,
            Self::Download(_) => RunState::Caching,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub day_offset: u32,
    pub strategy: TopologyStrategy,
}

#[derive(Debug)]
pub struct RunReport {
    pub state: RunState,
    pub resolution: Resolution,
    pub descriptor: ImageDescriptor,
    pub image: CachedImage,
    pub topology: Topology,
    pub applied: AppliedResult,
}

pub struct Pipeline<'a> {
    settings: &'a Settings,
    session: &'a dyn DesktopSession,
    transport: &'a dyn Transport,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        settings: &'a Settings,
        session: &'a dyn DesktopSession,
        transport: &'a dyn Transport,
    ) -> Self {
        Self {
            settings,
            session,
            transport,
        }
    }

    /// Resolve and cache today's (or an earlier day's) image without touching the desktop.
    pub fn fetch(
        &self,
        day_offset: u32,
    ) -> Result<(Resolution, ImageDescriptor, CachedImage), PipelineError> {
        enter(RunState::ResolvingResolution);
        let resolution = resolution::probe(self.session, self.settings.fallback_resolution);

        enter(RunState::FetchingMetadata);
        let query = ArchiveQuery {
            day_offset,
            resolution,
            market: self.settings.market.clone(),
        };
        let descriptor = MetadataResolver::new(self.settings, self.transport)
            .resolve(&query)
            .inspect_err(|err| abort(RunState::FetchingMetadata, err))?;

        enter(RunState::Caching);
        let image = ImageCache::new(self.settings, self.transport)
            .ensure(&descriptor)
            .inspect_err(|err| abort(RunState::Caching, err))?;

        Ok((resolution, descriptor, image))
    }

    /// Full run. `Ok` always means [`RunState::Done`], even if some monitors failed.
    pub fn run(&self, opts: RunOptions) -> Result<RunReport, PipelineError> {
        let (resolution, descriptor, image) = self.fetch(opts.day_offset)?;
        let path = image_path(&image).inspect_err(|err| abort(RunState::Caching, err))?;

        enter(RunState::ResolvingTopology);
        let topology = topology::resolve(self.session, opts.strategy);

        enter(RunState::Applying);
        let applied = apply::apply(self.session, &topology.monitors, &path);

        enter(RunState::Done);
        let monitors: Vec<&str> = applied.succeeded.iter().map(|m| m.id.as_str()).collect();
        info!(monitors = %monitors.join(", "), "wallpaper set");

        Ok(RunReport {
            state: RunState::Done,
            resolution,
            descriptor,
            image,
            topology,
            applied,
        })
    }
}

fn image_path(image: &CachedImage) -> Result<String, PipelineError> {
    image
        .local_path
        .to_str()
        .map(str::to_owned)
        .ok_or_else(|| DownloadError::NonUtf8Path(image.local_path.clone()).into())
}

fn enter(state: RunState) {
    debug!(?state, "pipeline");
}

fn abort(from: RunState, err: &dyn std::error::Error) {
    debug!(?from, to = ?RunState::Aborted, error = %err, "pipeline");
}
