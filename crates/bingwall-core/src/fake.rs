//! In-memory [`DesktopSession`] for exercising pipeline logic without a desktop.

use std::cell::{Cell, RefCell};

use crate::desktop::DesktopSession;
use crate::error::CapabilityError;
use crate::model::{ConfigProperty, DisplayOutput};

/// Scripted session. `None` for displays or keys means the tool is unavailable.
#[derive(Debug, Default)]
pub struct FakeSession {
    pub displays: Option<Vec<DisplayOutput>>,
    pub keys: Option<Vec<String>>,
    /// Writes whose path contains any of these fragments fail.
    pub failing_writes: Vec<String>,
    pub reload_fails: bool,

    pub writes: RefCell<Vec<ConfigProperty>>,
    pub reloads: Cell<u32>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_displays(mut self, displays: Vec<DisplayOutput>) -> Self {
        self.displays = Some(displays);
        self
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn failing_write(mut self, fragment: impl Into<String>) -> Self {
        self.failing_writes.push(fragment.into());
        self
    }

    fn unavailable(tool: &str) -> CapabilityError {
        CapabilityError::Spawn {
            tool: tool.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
        }
    }
}

impl DesktopSession for FakeSession {
    fn query_connected_displays(&self) -> Result<Vec<DisplayOutput>, CapabilityError> {
        self.displays.clone().ok_or_else(|| Self::unavailable("xrandr"))
    }

    fn list_config_keys(&self) -> Result<Vec<String>, CapabilityError> {
        self.keys.clone().ok_or_else(|| Self::unavailable("xfconf-query"))
    }

    fn set_config_property(&self, property: &ConfigProperty) -> Result<(), CapabilityError> {
        if self.failing_writes.iter().any(|f| property.path.contains(f)) {
            return Err(CapabilityError::Failed {
                tool: "xfconf-query".into(),
                code: Some(1),
                stderr: format!("refused {}", property.path),
            });
        }
        self.writes.borrow_mut().push(property.clone());
        Ok(())
    }

    fn trigger_desktop_reload(&self) -> Result<(), CapabilityError> {
        self.reloads.set(self.reloads.get() + 1);
        if self.reload_fails {
            return Err(Self::unavailable("xfdesktop"));
        }
        Ok(())
    }
}
