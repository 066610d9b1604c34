//! Scripted transport shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};

use url::Url;

use bingwall_infra::http::{Timeouts, Transport, TransportError};

#[derive(Debug, Clone)]
pub enum Reply {
    Body(Vec<u8>),
    Status(u16),
    /// Write these bytes, then break the stream.
    Interrupted(Vec<u8>),
}

#[derive(Debug, Default)]
pub struct FakeTransport {
    replies: HashMap<String, Reply>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply for every URL starting with `prefix`.
    pub fn on(mut self, prefix: impl Into<String>, reply: Reply) -> Self {
        self.replies.insert(prefix.into(), reply);
        self
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for FakeTransport {
    fn get(
        &self,
        url: &Url,
        _timeouts: Timeouts,
        sink: &mut dyn Write,
    ) -> Result<u64, TransportError> {
        self.requests.borrow_mut().push(url.to_string());

        let reply = self
            .replies
            .iter()
            .filter(|(prefix, _)| url.as_str().starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, r)| r.clone())
            .ok_or_else(|| TransportError::Network(format!("no route to {url}")))?;

        match reply {
            Reply::Body(bytes) => {
                sink.write_all(&bytes).map_err(TransportError::Body)?;
                Ok(bytes.len() as u64)
            }
            Reply::Status(code) => Err(TransportError::Status(code)),
            Reply::Interrupted(bytes) => {
                sink.write_all(&bytes).map_err(TransportError::Body)?;
                Err(TransportError::Body(io::Error::new(
                    io::ErrorKind::ConnectionReset,
                    "connection reset mid-transfer",
                )))
            }
        }
    }
}
