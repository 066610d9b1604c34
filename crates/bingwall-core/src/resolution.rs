//! Target resolution for the archive request.

use tracing::{debug, warn};

use crate::desktop::DesktopSession;
use crate::model::{DisplayOutput, Resolution};

/// Largest active mode by area, or `fallback` when no output has one.
pub fn select_resolution(outputs: &[DisplayOutput], fallback: Resolution) -> Resolution {
    outputs
        .iter()
        .filter_map(|o| o.mode)
        .filter(|m| m.area() > 0)
        .max_by_key(|m| m.area())
        .unwrap_or(fallback)
}

/// Query the session and pick the largest connected mode. Never fails.
pub fn probe(session: &dyn DesktopSession, fallback: Resolution) -> Resolution {
    match session.query_connected_displays() {
        Ok(outputs) => {
            let r = select_resolution(&outputs, fallback);
            debug!(outputs = outputs.len(), resolution = %r, "probed resolution");
            r
        }
        Err(err) => {
            warn!(error = %err, %fallback, "display query failed; using fallback resolution");
            fallback
        }
    }
}
