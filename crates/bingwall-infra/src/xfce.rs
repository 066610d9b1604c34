//! XFCE on X11: `xrandr`, `xfconf-query` and `xfdesktop`.

use std::ffi::OsString;
use std::time::Duration;

use bingwall_core::desktop::DesktopSession;
use bingwall_core::error::CapabilityError;
use bingwall_core::model::{ConfigProperty, DisplayOutput};
use bingwall_core::settings::Settings;
use bingwall_core::xrandr;

use crate::process_runner::{run, tool_bin};

pub const XRANDR_BIN_ENV: &str = "BINGWALL_XRANDR_BIN";
pub const XFCONF_BIN_ENV: &str = "BINGWALL_XFCONF_BIN";
pub const XFDESKTOP_BIN_ENV: &str = "BINGWALL_XFDESKTOP_BIN";

#[derive(Debug, Clone)]
pub struct XfceSession {
    channel: String,
    timeout: Duration,
    xrandr: OsString,
    xfconf: OsString,
    xfdesktop: OsString,
}

impl XfceSession {
    pub fn new(settings: &Settings) -> Self {
        Self {
            channel: settings.channel.clone(),
            timeout: settings.command_timeout,
            xrandr: tool_bin(XRANDR_BIN_ENV, "xrandr"),
            xfconf: tool_bin(XFCONF_BIN_ENV, "xfconf-query"),
            xfdesktop: tool_bin(XFDESKTOP_BIN_ENV, "xfdesktop"),
        }
    }
}

impl DesktopSession for XfceSession {
    fn query_connected_displays(&self) -> Result<Vec<DisplayOutput>, CapabilityError> {
        let out = run(&self.xrandr, ["--query"], self.timeout)?;
        Ok(xrandr::parse_connected(&out))
    }

    fn list_config_keys(&self) -> Result<Vec<String>, CapabilityError> {
        let out = run(&self.xfconf, ["-c", self.channel.as_str(), "-l"], self.timeout)?;
        Ok(out
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }

    fn set_config_property(&self, property: &ConfigProperty) -> Result<(), CapabilityError> {
        run(
            &self.xfconf,
            [
                "-c",
                self.channel.as_str(),
                "-p",
                property.path.as_str(),
                "--create",
                "-t",
                "string",
                "-s",
                property.value.as_str(),
            ],
            self.timeout,
        )?;
        Ok(())
    }

    fn trigger_desktop_reload(&self) -> Result<(), CapabilityError> {
        run(&self.xfdesktop, ["--reload"], self.timeout)?;
        Ok(())
    }
}
