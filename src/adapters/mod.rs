//! Infrastructure Adapters
//!
//! Adapter implementations for the domain ports, following the Port/Adapter
//! (Hexagonal) architecture pattern.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Layer                              │
//! │  ┌────────────────────────────────────────────────────────────┐ │
//! │  │                    Ports (Traits)                           │ │
//! │  │  SelfCheck │ ConnectivityProvider │ RuntimeInfoProvider     │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters (This Module)                       │
//! │  ┌────────────────────────────────────────────────────────────┐ │
//! │  │ StaticSelfCheck │ FnSelfCheck │ TcpConnectivityProvider    │ │
//! │  │ StaticConnectivity │ HostRuntimeInfoProvider               │ │
//! │  └────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use syshealth::adapters::{TcpConnectivityConfig, TcpConnectivityProvider};
//! use syshealth::domain::ports::ConnectivityProvider;
//!
//! let provider = TcpConnectivityProvider::new(TcpConnectivityConfig::default())?;
//! let online = provider.status().await?.is_connected();
//! ```

mod connectivity;
mod host_info;
mod self_check;

pub use connectivity::{StaticConnectivity, TcpConnectivityConfig, TcpConnectivityProvider};
pub use host_info::{HostInfoConfig, HostRuntimeInfoProvider};
pub use self_check::{FnSelfCheck, StaticSelfCheck};
