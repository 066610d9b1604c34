//! CLI output formatting.

use std::ffi::OsStr;

use bingwall_infra::pipeline::RunReport;

/// Set to anything but empty, `0` or `false` for full error chains and debug logs.
pub const DEBUG_ENV: &str = "BINGWALL_DEBUG";

pub fn debug_enabled() -> bool {
    debug_flag(std::env::var_os(DEBUG_ENV).as_deref())
}

fn debug_flag(value: Option<&OsStr>) -> bool {
    match value.and_then(OsStr::to_str) {
        Some(v) => !matches!(v.trim(), "" | "0" | "false"),
        // Set but not UTF-8: still counts as set.
        None => value.is_some(),
    }
}

/// Terse: top context and root cause on one line. Verbose: every cause.
fn render_error(err: &anyhow::Error, verbose: bool) -> String {
    let mut out = format!("error: {err}");
    if verbose {
        for cause in err.chain().skip(1) {
            out.push_str(&format!("\n  caused by: {cause}"));
        }
    } else if err.chain().len() > 1 {
        out.push_str(&format!(": {}", err.root_cause()));
    }
    out
}

pub fn print_error(err: &anyhow::Error) {
    eprintln!("{}", render_error(err, debug_enabled()));
}

pub fn print_report(report: &RunReport) {
    if let Some(title) = &report.descriptor.title {
        println!("{title}");
    }
    println!("Image: {}", report.image.local_path.display());

    let set: Vec<&str> = report.applied.succeeded.iter().map(|m| m.id.as_str()).collect();
    if !set.is_empty() {
        println!("Wallpaper set for monitors: {}", set.join(", "));
    }
    for w in &report.applied.failed {
        eprintln!("warning: {w}");
    }
    if let Some(err) = &report.applied.reload_error {
        eprintln!("warning: desktop reload failed: {err}");
    }
}
