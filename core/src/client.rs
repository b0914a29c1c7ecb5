//! Request builder, response parser and blocking driver for the pruning
//! service.
//!
//! # Design
//! `PruneClient` holds only its `ClientConfig` and a `Transport`; it keeps no
//! mutable state between calls, so one client can be shared across threads.
//! The work of a call is split in two pure halves, `build_prune` (validate and
//! describe the request) and `parse_prune` (interpret the response), with a
//! single `Transport::execute` between them in `prune`.

use std::time::Duration;

use crate::config::{ClientConfig, HEALTH_TIMEOUT};
use crate::error::PruneError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::metrics::compute_metrics;
use crate::transport::{Transport, UreqTransport};
use crate::types::{PruneRequest, PruneResponse, PruneResult};

/// Synchronous, stateless client for the pruning service.
#[derive(Debug, Clone)]
pub struct PruneClient<T = UreqTransport> {
    config: ClientConfig,
    transport: T,
}

impl PruneClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport)
    }
}

impl Default for PruneClient<UreqTransport> {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl<T: Transport> PruneClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate `input` and describe the `POST` that carries it.
    pub fn build_prune(&self, input: &PruneRequest) -> Result<HttpRequest, PruneError> {
        input.validate()?;
        let body =
            serde_json::to_string(input).map_err(|e| PruneError::Serialization(e.to_string()))?;
        log::debug!(
            "built prune request: url={} code_chars={} threshold={}",
            self.config.service_url,
            input.code.chars().count(),
            input.threshold
        );
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.config.service_url.clone(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Interpret the service's reply to a prune request for `code`.
    ///
    /// Sizes are computed from `code` and the returned pruned code; whatever
    /// the service reports about sizes is ignored.
    pub fn parse_prune(&self, code: &str, response: HttpResponse) -> Result<PruneResult, PruneError> {
        check_status(&response)?;
        let parsed: PruneResponse =
            serde_json::from_str(&response.body).map_err(|e| PruneError::Decode(e.to_string()))?;

        let pruned_code = parsed.pruned_code.unwrap_or_default();
        let (original_size, pruned_size, reduction_rate) = compute_metrics(code, &pruned_code);

        Ok(PruneResult {
            score: parsed.score.unwrap_or(0.0),
            pruned_code,
            original_size,
            pruned_size,
            reduction_rate,
        })
    }

    /// Describe the health probe: a bare `GET` of the service root.
    pub fn build_health(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.config.base_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Prune `code` down to what is relevant to `query`.
    ///
    /// Performs exactly one network call when the inputs are valid and none
    /// when they are not.
    pub fn prune(&self, code: &str, query: &str, threshold: f64) -> Result<PruneResult, PruneError> {
        self.prune_request(&PruneRequest::new(code, query, threshold))
    }

    pub fn prune_request(&self, input: &PruneRequest) -> Result<PruneResult, PruneError> {
        let request = self.build_prune(input)?;
        let response = self.transport.execute(&request, self.config.timeout)?;
        log::debug!("prune response: status={} body_len={}", response.status, response.body.len());

        let result = self.parse_prune(&input.code, response)?;
        log::info!(
            "pruned {} -> {} chars ({}% reduction, score {})",
            result.original_size,
            result.pruned_size,
            result.reduction_rate,
            result.score
        );
        Ok(result)
    }

    /// Advisory check that the service answers `200` at its root.
    ///
    /// Never fails: every transport error is reported as `false`.
    pub fn check_health(&self) -> bool {
        self.check_health_within(HEALTH_TIMEOUT)
    }

    pub fn check_health_within(&self, timeout: Duration) -> bool {
        let request = self.build_health();
        match self.transport.execute(&request, timeout) {
            Ok(response) => {
                log::debug!("health probe {} -> {}", request.url, response.status);
                response.status == 200
            }
            Err(e) => {
                log::debug!("health probe {} failed: {e}", request.url);
                false
            }
        }
    }
}

/// Map non-2xx status codes to `PruneError::Http`.
fn check_status(response: &HttpResponse) -> Result<(), PruneError> {
    if response.is_success() {
        return Ok(());
    }
    Err(PruneError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
