//! Request and result types for the pruning service.
//!
//! # Design
//! `PruneRequest` is the exact wire payload. `PruneResponse` is deliberately
//! lenient: both fields are optional and unknown fields are ignored, so a
//! service that omits `score` or `pruned_code` still yields a result.
//! `PruneResult` is what callers see; its size fields are computed locally
//! and never taken from the service.

use serde::{Deserialize, Serialize};

use crate::error::PruneError;

/// Payload sent to `POST {service_url}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PruneRequest {
    pub code: String,
    pub query: String,
    pub threshold: f64,
}

impl PruneRequest {
    pub fn new(code: impl Into<String>, query: impl Into<String>, threshold: f64) -> Self {
        Self {
            code: code.into(),
            query: query.into(),
            threshold,
        }
    }

    /// Check the request locally. Checks run in order and the first failure
    /// wins: code, then query, then threshold.
    pub fn validate(&self) -> Result<(), PruneError> {
        if self.code.trim().is_empty() {
            return Err(PruneError::Validation("code empty".to_string()));
        }
        if self.query.trim().is_empty() {
            return Err(PruneError::Validation("query empty".to_string()));
        }
        // NaN fails this range check as well.
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(PruneError::Validation("threshold out of range".to_string()));
        }
        Ok(())
    }
}

/// Body returned by the service. Only the two fields the client uses are
/// modelled; `null` is treated the same as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PruneResponse {
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub pruned_code: Option<String>,
}

/// Outcome of a successful prune call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PruneResult {
    pub score: f64,
    pub pruned_code: String,
    pub original_size: usize,
    pub pruned_size: usize,
    pub reduction_rate: f64,
}
