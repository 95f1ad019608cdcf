//! syshealth - Process-Local Health Aggregation
//!
//! Polls a set of independent subsystem probes, reduces their severities
//! with a fixed precedence rule and publishes the result as an immutable
//! snapshot that any part of the application can read without re-running
//! the checks.
//!
//! # Architecture
//!
//! ```text
//! Fact sources (adapters) → Probes → Aggregator → Snapshot readers
//! ```
//!
//! # Modules
//!
//! - [`adapters`] - Fact-source implementations (self-checks, connectivity, host info)
//! - [`domain`] - Fact-source ports and runtime metadata types
//! - [`error`] - Error types
//! - [`health`] - Probes, reduction, aggregator and rendering

pub mod adapters;
pub mod domain;
pub mod error;
pub mod health;

// Re-export commonly used types
pub use error::{Error, Result};
pub use health::{
    AggregatorConfig, AggregatorState, HealthAggregator, HealthSnapshot, ProbeResult, Severity,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
