//! Write the background property for each monitor and reload the desktop.

use tracing::{debug, info, warn};

use crate::desktop::DesktopSession;
use crate::error::{ApplyWarning, CapabilityError};
use crate::model::{ConfigProperty, MonitorHandle};

#[derive(Debug, Default)]
pub struct AppliedResult {
    pub succeeded: Vec<MonitorHandle>,
    pub failed: Vec<ApplyWarning>,
    /// Set when the reload request itself failed.
    pub reload_error: Option<CapabilityError>,
}

impl AppliedResult {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.reload_error.is_none()
    }
}

/// Upsert `last-image` for every monitor, then request one reload.
///
/// A failed write does not stop the remaining ones and the reload is always attempted.
pub fn apply(
    session: &dyn DesktopSession,
    monitors: &[MonitorHandle],
    image_path: &str,
) -> AppliedResult {
    let mut result = AppliedResult::default();

    for monitor in monitors {
        let prop = ConfigProperty::last_image(monitor, image_path);
        debug!(path = %prop.path, "setting property");
        match session.set_config_property(&prop) {
            Ok(()) => result.succeeded.push(monitor.clone()),
            Err(cause) => {
                let w = ApplyWarning {
                    monitor: monitor.clone(),
                    cause,
                };
                warn!("{w}");
                result.failed.push(w);
            }
        }
    }

    if let Err(err) = session.trigger_desktop_reload() {
        warn!(error = %err, "desktop reload failed");
        result.reload_error = Some(err);
    }

    info!(
        succeeded = result.succeeded.len(),
        failed = result.failed.len(),
        "background applied"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeSession;

    #[test]
    fn writes_every_monitor_and_reloads_once() {
        let s = FakeSession::new();
        let monitors = [MonitorHandle::new("monitor0"), MonitorHandle::new("monitorDP-1")];
        let r = apply(&s, &monitors, "/cache/a.jpg");

        assert!(r.is_complete());
        assert_eq!(r.succeeded, monitors);
        let writes = s.writes.borrow();
        assert_eq!(writes.len(), 2);
        assert_eq!(
            writes[1].path,
            "/backdrop/screen0/monitorDP-1/workspace0/last-image"
        );
        assert_eq!(writes[1].value, "/cache/a.jpg");
        assert_eq!(s.reloads.get(), 1);
    }

    #[test]
    fn one_failing_monitor_does_not_stop_the_rest() {
        let s = FakeSession::new().failing_write("monitorHDMI-1");
        let monitors = [
            MonitorHandle::new("monitorHDMI-1"),
            MonitorHandle::new("monitoreDP-1"),
        ];
        let r = apply(&s, &monitors, "/cache/a.jpg");

        assert_eq!(r.succeeded, [MonitorHandle::new("monitoreDP-1")]);
        assert_eq!(r.failed.len(), 1);
        assert_eq!(r.failed[0].monitor.id, "monitorHDMI-1");
        assert_eq!(s.reloads.get(), 1);
        assert!(!r.is_complete());
    }

    #[test]
    fn reload_failure_is_recorded() {
        let s = FakeSession {
            reload_fails: true,
            ..FakeSession::new()
        };
        let r = apply(&s, &[MonitorHandle::fallback()], "/cache/a.jpg");
        assert_eq!(r.succeeded.len(), 1);
        assert!(r.reload_error.is_some());
    }
}
