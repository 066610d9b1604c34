//! Blocking HTTP GET with per-request timeouts.

use std::io::{self, Write};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use url::Url;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Network(String),
    /// Writing the body to the sink failed, or the body stream broke.
    #[error("body transfer failed")]
    Body(#[source] io::Error),
}

/// Limits for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Connect, and each individual read while the body streams.
    pub io: Duration,
    /// The whole request, body included.
    pub total: Duration,
}

impl Timeouts {
    /// Same limit for every read and for the whole request.
    pub fn flat(limit: Duration) -> Self {
        Self {
            io: limit,
            total: limit,
        }
    }
}

/// Something that can GET a URL into a sink.
pub trait Transport {
    /// Stream the body of a 2xx response into `sink`, returning the byte count.
    fn get(
        &self,
        url: &Url,
        timeouts: Timeouts,
        sink: &mut dyn Write,
    ) -> Result<u64, TransportError>;
}

/// [`Transport`] backed by `ureq`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    user_agent: String,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self {
            user_agent: format!("bingwall/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Transport for UreqTransport {
    fn get(
        &self,
        url: &Url,
        timeouts: Timeouts,
        sink: &mut dyn Write,
    ) -> Result<u64, TransportError> {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeouts.io)
            .timeout_read(timeouts.io)
            .timeout(timeouts.total)
            .user_agent(&self.user_agent)
            .build();

        debug!(%url, ?timeouts, "GET");
        let resp = match agent.request_url("GET", url).call() {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, _)) => return Err(TransportError::Status(code)),
            Err(ureq::Error::Transport(t)) => return Err(TransportError::Network(t.to_string())),
        };

        let status = resp.status();
        if !(200..300).contains(&status) {
            return Err(TransportError::Status(status));
        }

        let mut reader = resp.into_reader();
        io::copy(&mut reader, sink).map_err(TransportError::Body)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serve one response whose body arrives in `chunks` pieces, `gap` apart.
    fn serve_slowly(chunks: usize, gap: Duration) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).unwrap() > 2 {
                line.clear();
            }

            let mut w = stream;
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {chunks}\r\nConnection: close\r\n\r\n"
            );
            w.write_all(head.as_bytes()).unwrap();
            w.flush().unwrap();
            for _ in 0..chunks {
                thread::sleep(gap);
                if w.write_all(b"x").and_then(|()| w.flush()).is_err() {
                    return;
                }
            }
        });

        Url::parse(&format!("http://{addr}/img.jpg")).unwrap()
    }

    #[test]
    fn slow_body_within_read_limit_completes() {
        let url = serve_slowly(6, Duration::from_millis(150));
        let timeouts = Timeouts {
            io: Duration::from_millis(500),
            total: Duration::from_secs(10),
        };

        let mut body = Vec::new();
        let n = UreqTransport::default().get(&url, timeouts, &mut body).unwrap();
        assert_eq!(n, 6);
        assert_eq!(body, b"xxxxxx");
    }

    #[test]
    fn stalled_body_hits_read_limit() {
        let url = serve_slowly(2, Duration::from_millis(1500));
        let timeouts = Timeouts {
            io: Duration::from_millis(300),
            total: Duration::from_secs(10),
        };

        let mut body = Vec::new();
        let err = UreqTransport::default()
            .get(&url, timeouts, &mut body)
            .unwrap_err();
        assert!(matches!(err, TransportError::Body(_)), "{err:?}");
    }
}
