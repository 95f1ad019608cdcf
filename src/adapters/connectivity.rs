//! Connectivity Adapters
//!
//! Implements the `ConnectivityProvider` port with a TCP reachability check
//! and a fixed-answer provider.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;
use tracing::{debug, instrument};

use crate::domain::ports::{Connectivity, ConnectivityProvider};
use crate::error::{Error, Result};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the TCP connectivity provider
#[derive(Debug, Clone)]
pub struct TcpConnectivityConfig {
    /// Endpoint to reach, as `host:port`
    pub target: String,

    /// Budget for resolving and connecting together; keep it below the
    /// aggregator's probe timeout
    pub connect_timeout: Duration,
}

impl TcpConnectivityConfig {
    /// Reject a connect budget that would outlast the probe timeout
    pub fn validate_within(&self, probe_timeout: Duration) -> Result<()> {
        if self.connect_timeout >= probe_timeout {
            return Err(Error::Config(format!(
                "Connectivity timeout {:?} must be shorter than probe timeout {:?}",
                self.connect_timeout, probe_timeout
            )));
        }
        Ok(())
    }
}

impl Default for TcpConnectivityConfig {
    fn default() -> Self {
        Self {
            target: "1.1.1.1:443".to_string(),
            connect_timeout: Duration::from_secs(3),
        }
    }
}

// =============================================================================
// TCP Connectivity Provider
// =============================================================================

/// Reports connectivity by opening a TCP connection to a known endpoint.
///
/// - connect succeeds: online
/// - resolve plus connect outlast `connect_timeout`: a path may exist but is
///   not connected
/// - resolution fails or connect is refused/unreachable: offline
#[derive(Debug, Clone)]
pub struct TcpConnectivityProvider {
    config: TcpConnectivityConfig,
}

impl TcpConnectivityProvider {
    /// Create a provider; the target must be `host:port`
    pub fn new(config: TcpConnectivityConfig) -> Result<Self> {
        validate_target(&config.target)?;
        if config.connect_timeout.is_zero() {
            return Err(Error::Config(
                "Connectivity timeout must be non-zero".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Target endpoint
    pub fn target(&self) -> &str {
        &self.config.target
    }
}

fn validate_target(target: &str) -> Result<()> {
    let (host, port) = target.rsplit_once(':').ok_or_else(|| {
        Error::Config(format!(
            "Connectivity target '{}' must be host:port",
            target
        ))
    })?;

    if host.is_empty() {
        return Err(Error::Config(format!(
            "Connectivity target '{}' has an empty host",
            target
        )));
    }

    port.parse::<u16>().map_err(|e| {
        Error::Config(format!(
            "Connectivity target '{}' has an invalid port: {}",
            target, e
        ))
    })?;

    Ok(())
}

#[async_trait]
impl ConnectivityProvider for TcpConnectivityProvider {
    #[instrument(skip(self), fields(target = %self.config.target))]
    async fn status(&self) -> Result<Connectivity> {
        Ok(within_budget(self.config.connect_timeout, dial(&self.config.target)).await)
    }
}

/// Resolve `target` and connect to the first address
async fn dial(target: &str) -> Connectivity {
    let addr = match lookup_host(target).await {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => addr,
            None => {
                debug!("Target resolved to no addresses");
                return Connectivity::offline();
            }
        },
        Err(e) => {
            debug!("Failed to resolve target: {}", e);
            return Connectivity::offline();
        }
    };

    match TcpStream::connect(addr).await {
        Ok(_stream) => Connectivity::online(),
        Err(e) => {
            debug!("Connect to {} failed: {}", addr, e);
            Connectivity::offline()
        }
    }
}

/// One deadline for the whole attempt; running out means "connecting"
async fn within_budget<F>(limit: Duration, attempt: F) -> Connectivity
where
    F: Future<Output = Connectivity>,
{
    match timeout(limit, attempt).await {
        Ok(connectivity) => connectivity,
        Err(_) => {
            debug!("Connectivity attempt timed out after {:?}", limit);
            Connectivity::connecting()
        }
    }
}

// =============================================================================
// Static Connectivity
// =============================================================================

/// Connectivity provider with a fixed answer or a fixed fault.
#[derive(Debug, Clone)]
pub struct StaticConnectivity {
    answer: std::result::Result<Connectivity, String>,
}

impl StaticConnectivity {
    /// Always report `connectivity`
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            answer: Ok(connectivity),
        }
    }

    /// Always fail with `reason`
    pub fn faulty(reason: impl Into<String>) -> Self {
        Self {
            answer: Err(reason.into()),
        }
    }
}

#[async_trait]
impl ConnectivityProvider for StaticConnectivity {
    async fn status(&self) -> Result<Connectivity> {
        self.answer
            .clone()
            .map_err(|reason| Error::fact_unavailable("connectivity", reason))
    }
}
