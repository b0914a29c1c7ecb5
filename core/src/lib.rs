//! Blocking client for a remote code-pruning service.
//!
//! # Overview
//! Sends source code plus a natural-language focus query to the service and
//! returns the relevance score and the pruned code it replies with, along
//! with locally computed size metrics. All pruning happens remotely.
//!
//! # Design
//! - `PruneClient` is stateless: it holds a `ClientConfig` and a `Transport`.
//! - Each call is split into `build_prune` (validate, produce request) and
//!   `parse_prune` (consume response), so the I/O boundary is explicit and
//!   the rules around it are testable without a network.
//! - `UreqTransport` is the default blocking transport; tests substitute
//!   their own.
//! - Every failure is a `PruneError`; only `check_health` swallows errors.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod transport;
pub mod types;

pub use client::PruneClient;
pub use config::{ClientConfig, DEFAULT_THRESHOLD};
pub use error::PruneError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use metrics::{compute_metrics, reduction_rate};
pub use transport::{Transport, UreqTransport};
pub use types::{PruneRequest, PruneResponse, PruneResult};
