//! Health Aggregation
//!
//! Polls subsystem probes, reduces their severities and publishes the result
//! as an immutable snapshot.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         Health Aggregator                             │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │  refresh()                                                            │
//! │     │                                                                 │
//! │     ▼                                                                 │
//! │  ┌────────────────┐   ┌────────────────┐   ┌──────────────────────┐   │
//! │  │   Probe Set    │──▶│   Reduction    │──▶│  Snapshot (Arc swap) │   │
//! │  │ (fault bounds) │   │ (precedence)   │   │                      │   │
//! │  └────────────────┘   └────────────────┘   └──────────────────────┘   │
//! │                                                      │                │
//! │                                              current() readers        │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use syshealth::adapters::{TcpConnectivityConfig, TcpConnectivityProvider};
//! use syshealth::health::{standard_probe_set, AggregatorConfig, HealthAggregator, ProbeSources};
//!
//! # async fn example() -> syshealth::Result<()> {
//! let connectivity = Arc::new(TcpConnectivityProvider::new(TcpConnectivityConfig::default())?);
//! let aggregator = HealthAggregator::new(
//!     AggregatorConfig::default(),
//!     standard_probe_set(ProbeSources::new(connectivity)),
//! )?;
//!
//! aggregator.initialize().await;
//! aggregator.refresh().await;
//! println!("overall: {}", aggregator.current().overall());
//! # Ok(())
//! # }
//! ```

mod aggregator;
pub mod probe;
pub mod probes;
mod proptest;
pub mod report;
mod severity;
mod snapshot;

pub use aggregator::{AggregatorConfig, AggregatorState, HealthAggregator, HealthAggregatorBuilder};
pub use probe::{evaluate_contained, Criticality, Probe, ProbeSet, DEFAULT_PROBE_TIMEOUT};
pub use probes::{names, standard_probe_set, ConnectivityProbe, ProbeSources, SelfCheckProbe};
pub use report::{format_bytes, render_health, render_system_info, HealthReport, SystemInfoReport};
pub use severity::{reduce, Severity};
pub use snapshot::{HealthSnapshot, ProbeResult};
