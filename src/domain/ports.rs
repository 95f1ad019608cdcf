//! Domain Ports (Port/Adapter Pattern)
//!
//! The fact sources that health probes interpret. Probes never reach into
//! global state; every fact they need arrives through one of these traits,
//! and the adapters in [`crate::adapters`] provide concrete implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Domain Layer                            │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │                    Ports (Traits)                    │    │
//! │  │  SelfCheck │ ConnectivityProvider │ RuntimeInfo...   │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Infrastructure Layer                       │
//! │  ┌─────────────────────────────────────────────────────┐    │
//! │  │                  Adapters (Impls)                    │    │
//! │  │  StaticSelfCheck │ TcpConnectivity │ HostRuntimeInfo │    │
//! │  └─────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::system_info::SystemInfo;
use crate::error::Result;

// =============================================================================
// Value Objects
// =============================================================================

/// Network path state as reported by a [`ConnectivityProvider`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Connectivity {
    /// An active network path exists
    pub active: bool,
    /// The active path is connected
    pub connected: bool,
}

impl Connectivity {
    /// Active and connected.
    pub fn online() -> Self {
        Self {
            active: true,
            connected: true,
        }
    }

    /// A path exists but is not connected (e.g. still associating).
    pub fn connecting() -> Self {
        Self {
            active: true,
            connected: false,
        }
    }

    /// No active network path.
    pub fn offline() -> Self {
        Self::default()
    }

    /// True only when an active path is also connected.
    pub fn is_connected(&self) -> bool {
        self.active && self.connected
    }
}

// =============================================================================
// Self-Check Port
// =============================================================================

/// Port for an opaque subsystem self-check signal.
///
/// `Ok(true)` means the subsystem reports itself available, `Ok(false)` that
/// it reports itself unavailable, and `Err` that the signal could not be read
/// at all.
///
/// # Example
///
/// ```ignore
/// struct DatabaseSelfCheck { pool: PgPool }
///
/// #[async_trait]
/// impl SelfCheck for DatabaseSelfCheck {
///     async fn check(&self) -> Result<bool> {
///         Ok(self.pool.acquire().await.is_ok())
///     }
/// }
/// ```
#[async_trait]
pub trait SelfCheck: Send + Sync {
    /// Read the signal.
    async fn check(&self) -> Result<bool>;
}

#[async_trait]
impl<T: SelfCheck + ?Sized> SelfCheck for Arc<T> {
    async fn check(&self) -> Result<bool> {
        (**self).check().await
    }
}

// =============================================================================
// Connectivity Port
// =============================================================================

/// Port reporting whether an active, connected network path exists.
#[async_trait]
pub trait ConnectivityProvider: Send + Sync {
    /// Query current connectivity.
    async fn status(&self) -> Result<Connectivity>;
}

#[async_trait]
impl<T: ConnectivityProvider + ?Sized> ConnectivityProvider for Arc<T> {
    async fn status(&self) -> Result<Connectivity> {
        (**self).status().await
    }
}

// =============================================================================
// Runtime Info Port
// =============================================================================

/// Port for slow-changing device/runtime metadata.
///
/// Consumed once during initialization; it plays no part in the health
/// reduction.
#[async_trait]
pub trait RuntimeInfoProvider: Send + Sync {
    /// Gather a fresh [`SystemInfo`].
    async fn collect(&self) -> Result<SystemInfo>;
}

#[async_trait]
impl<T: RuntimeInfoProvider + ?Sized> RuntimeInfoProvider for Arc<T> {
    async fn collect(&self) -> Result<SystemInfo> {
        (**self).collect().await
    }
}
