//! ledgerlens-finance: metrics engine, quartile statistics, and advisory text generation

pub mod advisory;
pub mod metrics;
pub mod stats;

pub use advisory::{AdvisoryClient, AdvisorySettings, Provider, build_prompt};
pub use metrics::{CategorySpend, MetricsResult, compute_metrics, round2};
pub use stats::{IqrBounds, quantile};
