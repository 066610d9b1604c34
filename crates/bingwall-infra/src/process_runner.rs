//! Run desktop tools with a deadline.

use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use bingwall_core::error::CapabilityError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Clone, Copy)]
enum Pipe {
    Stdout,
    Stderr,
}

/// Binary for `default`, overridable through the environment variable `env`.
pub fn tool_bin(env: &str, default: &str) -> OsString {
    std::env::var_os(env)
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.into())
}

/// Run `program` with `args`, returning stdout on a zero exit status.
///
/// The child is killed once `timeout` elapses. Output is collected until the
/// same deadline, so a background process that inherited the pipes cannot
/// hold the call open.
pub fn run<I, S>(program: &OsStr, args: I, timeout: Duration) -> Result<String, CapabilityError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let tool = program.to_string_lossy().into_owned();
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    debug!(?cmd, "running");

    let mut child = cmd.spawn().map_err(|source| CapabilityError::Spawn {
        tool: tool.clone(),
        source,
    })?;

    let deadline = Instant::now() + timeout;

    // Drain pipes concurrently so a chatty child cannot block on a full pipe.
    let (tx, rx) = mpsc::channel();
    drain(child.stdout.take(), Pipe::Stdout, &tx);
    drain(child.stderr.take(), Pipe::Stderr, &tx);
    drop(tx);

    let status = match wait_deadline(&mut child, deadline) {
        Ok(Some(status)) => status,
        Ok(None) => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(CapabilityError::Timeout {
                tool,
                secs: timeout.as_secs(),
            });
        }
        Err(source) => return Err(CapabilityError::Spawn { tool, source }),
    };

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(left) {
            Ok((Pipe::Stdout, chunk)) => stdout.extend_from_slice(&chunk),
            Ok((Pipe::Stderr, chunk)) => stderr.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                debug!(%tool, "output pipes still open at deadline");
                break;
            }
        }
    }
    let stdout = String::from_utf8_lossy(&stdout).into_owned();
    let stderr = String::from_utf8_lossy(&stderr);

    if !status.success() {
        return Err(CapabilityError::Failed {
            tool,
            code: status.code(),
            stderr: stderr.trim().to_string(),
        });
    }
    Ok(stdout)
}

fn wait_deadline(
    child: &mut Child,
    deadline: Instant,
) -> std::io::Result<Option<std::process::ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>, which: Pipe, tx: &Sender<(Pipe, Vec<u8>)>) {
    let Some(mut r) = pipe else { return };
    let tx = tx.clone();
    thread::spawn(move || {
        let mut buf = [0u8; 8192];
        loop {
            match r.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send((which, buf[..n].to_vec())).is_err() {
                        break;
                    }
                }
            }
        }
    });
}
