//! Capability interface to the running desktop session.

use crate::error::CapabilityError;
use crate::model::{ConfigProperty, DisplayOutput};

/// Everything the pipeline needs from the OS besides HTTP and the disk cache.
pub trait DesktopSession {
    /// Outputs reported as connected, with their active mode if any.
    fn query_connected_displays(&self) -> Result<Vec<DisplayOutput>, CapabilityError>;

    /// Every property path currently present in the desktop channel.
    fn list_config_keys(&self) -> Result<Vec<String>, CapabilityError>;

    /// Create or overwrite one string property.
    fn set_config_property(&self, property: &ConfigProperty) -> Result<(), CapabilityError>;

    /// Ask the desktop to redraw its background.
    fn trigger_desktop_reload(&self) -> Result<(), CapabilityError>;
}
