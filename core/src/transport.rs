//! Executes `HttpRequest` values against the network.
//!
//! # Design
//! `Transport` is the only I/O seam in the crate. `UreqTransport` builds a
//! fresh agent per call so no connection outlives the request that opened
//! it; the agent (and any socket it holds) is dropped on every return path.
//! Status codes are never treated as errors here: 4xx/5xx come back as data
//! and `PruneClient` decides what they mean. Bodies are decoded lossily so
//! the status, not the encoding, decides which error a reply becomes.

use std::io::ErrorKind;
use std::time::Duration;

use crate::error::PruneError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a single HTTP exchange.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, PruneError>;
}

/// Blocking transport backed by `ureq`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqTransport;

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, PruneError> {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();

        let result = match (request.method, request.body.as_deref()) {
            (HttpMethod::Get, _) => {
                let mut builder = agent.get(&request.url);
                for (key, value) in &request.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                builder.call()
            }
            (HttpMethod::Post, body) => {
                let mut builder = agent.post(&request.url);
                for (key, value) in &request.headers {
                    builder = builder.header(key.as_str(), value.as_str());
                }
                match body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| map_ureq_error(e, &request.url, timeout))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        // Bytes first: a non-UTF-8 body must not hide the status. The
        // service may return arbitrarily large pruned code, so no size cap.
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| map_ureq_error(e, &request.url, timeout))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse { status, headers, body })
    }
}

fn map_ureq_error(err: ureq::Error, url: &str, timeout: Duration) -> PruneError {
    let mapped = match err {
        ureq::Error::Timeout(_) => PruneError::Timeout(timeout),
        ureq::Error::HostNotFound => PruneError::Connection {
            url: url.to_string(),
            reason: "host not found".to_string(),
        },
        ureq::Error::ConnectionFailed => PruneError::Connection {
            url: url.to_string(),
            reason: "connection failed".to_string(),
        },
        ureq::Error::Io(io) => match io.kind() {
            ErrorKind::TimedOut | ErrorKind::WouldBlock => PruneError::Timeout(timeout),
            ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
            | ErrorKind::AddrNotAvailable => PruneError::Connection {
                url: url.to_string(),
                reason: io.to_string(),
            },
            _ => PruneError::Unexpected(io.to_string()),
        },
        other => PruneError::Unexpected(other.to_string()),
    };
    log::warn!("request to {url} failed: {mapped}");
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refused_io_maps_to_connection() {
        let err = map_ureq_error(
            ureq::Error::Io(std::io::Error::from(ErrorKind::ConnectionRefused)),
            "http://127.0.0.1:1/prune",
            Duration::from_secs(1),
        );
        assert!(matches!(err, PruneError::Connection { ref url, .. } if url == "http://127.0.0.1:1/prune"));
    }

    #[test]
    fn timed_out_io_maps_to_timeout() {
        let err = map_ureq_error(
            ureq::Error::Io(std::io::Error::from(ErrorKind::TimedOut)),
            "http://localhost:8000/prune",
            Duration::from_secs(3),
        );
        assert!(matches!(err, PruneError::Timeout(d) if d == Duration::from_secs(3)));
    }

    #[test]
    fn host_not_found_maps_to_connection() {
        let err = map_ureq_error(
            ureq::Error::HostNotFound,
            "http://nowhere.invalid/prune",
            Duration::from_secs(1),
        );
        assert!(matches!(err, PruneError::Connection { .. }));
    }

    #[test]
    fn other_io_maps_to_unexpected() {
        let err = map_ureq_error(
            ureq::Error::Io(std::io::Error::new(ErrorKind::Other, "boom")),
            "http://localhost:8000/prune",
            Duration::from_secs(1),
        );
        assert!(matches!(err, PruneError::Unexpected(ref msg) if msg.contains("boom")));
    }
}
