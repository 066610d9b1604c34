//! Helpers for tests that run fake tool binaries.

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Mutex;

/// Serialises tests that write executables or touch `BINGWALL_*` env vars.
pub static EXEC_LOCK: Mutex<()> = Mutex::new(());

pub fn write_exe(path: &Path, body: &str) {
    std::fs::write(path, body).unwrap();
    let mut perm = std::fs::metadata(path).unwrap().permissions();
    perm.set_mode(0o755);
    std::fs::set_permissions(path, perm).unwrap();
}
