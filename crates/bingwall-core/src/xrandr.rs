//! `xrandr --query` output parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{DisplayOutput, Resolution};

static CONNECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\S+)\s+connected\b(?:\s+primary)?(?:\s+(\d+)x(\d+)\+\d+\+\d+)?")
        .expect("static regex")
});

/// Connected outputs in report order. Disconnected outputs and mode lines are skipped.
pub fn parse_connected(text: &str) -> Vec<DisplayOutput> {
    text.lines()
        .filter_map(|line| {
            let caps = CONNECTED.captures(line)?;
            let mode = match (caps.get(2), caps.get(3)) {
                (Some(w), Some(h)) => {
                    let w = w.as_str().parse().ok()?;
                    let h = h.as_str().parse().ok()?;
                    Some(Resolution::new(w, h))
                }
                _ => None,
            };
            Some(DisplayOutput::new(&caps[1], mode))
        })
        .collect()
}
