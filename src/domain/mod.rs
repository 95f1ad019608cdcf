//! Domain Layer
//!
//! Fact-source abstractions and the runtime metadata value types.
//!
//! # Architecture
//!
//! - **Ports** (`ports.rs`) - Trait abstractions for the facts probes consume
//! - **System info** (`system_info.rs`) - Device/runtime metadata
//!
//! # Usage
//!
//! ```ignore
//! use syshealth::domain::ports::{Connectivity, ConnectivityProvider};
//!
//! async fn is_online<C: ConnectivityProvider>(provider: &C) -> bool {
//!     provider
//!         .status()
//!         .await
//!         .map(|c| c.is_connected())
//!         .unwrap_or(false)
//! }
//! ```

pub mod ports;
pub mod system_info;

pub use ports::{Connectivity, ConnectivityProvider, RuntimeInfoProvider, SelfCheck};
pub use system_info::{MemoryInfo, StorageInfo, SystemInfo};
