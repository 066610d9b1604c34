//! Monitor topology: which configuration-store monitor segments to write.
//!
//! Output names reported by the display subsystem and the monitor segments
//! found in the configuration store do not follow one stable convention
//! (`HDMI-1` may be stored as `monitorHDMI-1-1`), so matching is by substring.
//! When one output name is a prefix of another (`DP-1` vs `DP-1-1`) the first
//! stored path that contains it wins.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::desktop::DesktopSession;
use crate::model::{DisplayOutput, MonitorHandle};

const SCREEN0_PREFIX: &str = "/backdrop/screen0/";
const LAST_IMAGE_LEAF: &str = "/last-image";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TopologyStrategy {
    /// Cross-reference outputs when the display query works, else enumerate the store.
    #[default]
    Auto,
    /// Only the monitor segments already holding a `last-image` key.
    Direct,
    /// One handle per connected output, reusing stored segments where they match.
    CrossReferenced,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topology {
    /// Never empty.
    pub monitors: Vec<MonitorHandle>,
    /// Nothing was detected and the synthetic `monitor0` is used.
    pub degraded: bool,
}

impl Topology {
    fn from_detected(monitors: Vec<MonitorHandle>) -> Self {
        if monitors.is_empty() {
            warn!("no monitors detected; falling back to monitor0");
            return Self {
                monitors: vec![MonitorHandle::fallback()],
                degraded: true,
            };
        }
        Self {
            monitors,
            degraded: false,
        }
    }
}

/// Resolve monitor handles. Never fails; always yields at least one handle.
pub fn resolve(session: &dyn DesktopSession, strategy: TopologyStrategy) -> Topology {
    let detected = match strategy {
        TopologyStrategy::Direct => direct(session),
        TopologyStrategy::CrossReferenced => match connected_outputs(session) {
            Some(outputs) => cross_referenced(session, &outputs),
            None => Vec::new(),
        },
        TopologyStrategy::Auto => match connected_outputs(session) {
            Some(outputs) => cross_referenced(session, &outputs),
            None => {
                debug!("display query unusable; enumerating stored monitors");
                direct(session)
            }
        },
    };
    Topology::from_detected(detected)
}

/// `None` when the query failed or reported nothing connected.
fn connected_outputs(session: &dyn DesktopSession) -> Option<Vec<DisplayOutput>> {
    match session.query_connected_displays() {
        Ok(outputs) if !outputs.is_empty() => Some(outputs),
        Ok(_) => None,
        Err(err) => {
            warn!(error = %err, "display query failed");
            None
        }
    }
}

fn config_keys(session: &dyn DesktopSession) -> Vec<String> {
    session.list_config_keys().unwrap_or_else(|err| {
        warn!(error = %err, "listing configuration keys failed");
        Vec::new()
    })
}

/// Monitor segment of a path under `/backdrop/screen0/`, if that segment has children.
pub fn monitor_segment(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(SCREEN0_PREFIX)?;
    let (segment, _) = rest.split_once('/')?;
    (!segment.is_empty()).then_some(segment)
}

fn direct(session: &dyn DesktopSession) -> Vec<MonitorHandle> {
    let keys = config_keys(session);
    let segments = keys
        .iter()
        .filter(|k| k.ends_with(LAST_IMAGE_LEAF))
        .filter_map(|k| monitor_segment(k))
        .map(MonitorHandle::new);
    dedup(segments)
}

fn cross_referenced(session: &dyn DesktopSession, outputs: &[DisplayOutput]) -> Vec<MonitorHandle> {
    let keys = config_keys(session);
    let handles = outputs.iter().map(|out| {
        let reused = keys
            .iter()
            .filter(|k| k.contains(out.name.as_str()))
            .find_map(|k| monitor_segment(k));
        match reused {
            Some(segment) => {
                debug!(output = %out.name, segment, "reusing stored monitor segment");
                MonitorHandle::new(segment)
            }
            None => {
                debug!(output = %out.name, "no stored segment; synthesizing");
                MonitorHandle::synthesize(&out.name)
            }
        }
    });
    dedup(handles)
}

fn dedup(handles: impl Iterator<Item = MonitorHandle>) -> Vec<MonitorHandle> {
    let mut seen = HashSet::new();
    handles.filter(|h| seen.insert(h.id.clone())).collect()
}
