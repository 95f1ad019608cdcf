//! Built-in subsystem probes
//!
//! Six checks are registered by default, in this display order:
//!
//! | name                   | source               | class     |
//! |------------------------|----------------------|-----------|
//! | `dependency-injection` | [`SelfCheck`]        | mandatory |
//! | `storage-layer`        | [`SelfCheck`]        | optional  |
//! | `ai-subsystem`         | [`SelfCheck`]        | optional  |
//! | `terminal-emulator`    | [`SelfCheck`]        | optional  |
//! | `rootfs-manager`       | [`SelfCheck`]        | optional  |
//! | `network-connectivity` | [`ConnectivityProvider`] | mandatory |

use std::sync::Arc;

use async_trait::async_trait;

use super::probe::{Criticality, Probe, ProbeSet};
use super::severity::Severity;
use crate::adapters::StaticSelfCheck;
use crate::domain::ports::{ConnectivityProvider, SelfCheck};
use crate::error::Result;

/// Probe names
pub mod names {
    pub const DEPENDENCY_INJECTION: &str = "dependency-injection";
    pub const STORAGE_LAYER: &str = "storage-layer";
    pub const AI_SUBSYSTEM: &str = "ai-subsystem";
    pub const TERMINAL_EMULATOR: &str = "terminal-emulator";
    pub const ROOTFS_MANAGER: &str = "rootfs-manager";
    pub const NETWORK_CONNECTIVITY: &str = "network-connectivity";

    /// Default registration order
    pub const STANDARD: [&str; 6] = [
        DEPENDENCY_INJECTION,
        STORAGE_LAYER,
        AI_SUBSYSTEM,
        TERMINAL_EMULATOR,
        ROOTFS_MANAGER,
        NETWORK_CONNECTIVITY,
    ];
}

// =============================================================================
// Self-Check Probe
// =============================================================================

/// Interprets a boolean self-check signal.
///
/// `true` is healthy; `false` degrades to the probe's failure severity. A
/// fault reading the signal is left to the probe set's boundary.
pub struct SelfCheckProbe {
    name: String,
    criticality: Criticality,
    source: Arc<dyn SelfCheck>,
}

impl SelfCheckProbe {
    /// Create a probe over an arbitrary self-check
    pub fn new(
        name: impl Into<String>,
        criticality: Criticality,
        source: Arc<dyn SelfCheck>,
    ) -> Self {
        Self {
            name: name.into(),
            criticality,
            source,
        }
    }

    /// Dependency-injection container availability
    pub fn dependency_injection(source: Arc<dyn SelfCheck>) -> Self {
        Self::new(names::DEPENDENCY_INJECTION, Criticality::Mandatory, source)
    }

    /// Persistent storage availability
    pub fn storage_layer(source: Arc<dyn SelfCheck>) -> Self {
        Self::new(names::STORAGE_LAYER, Criticality::Optional, source)
    }

    /// AI subsystem availability
    pub fn ai_subsystem(source: Arc<dyn SelfCheck>) -> Self {
        Self::new(names::AI_SUBSYSTEM, Criticality::Optional, source)
    }

    /// Terminal emulation availability
    pub fn terminal_emulator(source: Arc<dyn SelfCheck>) -> Self {
        Self::new(names::TERMINAL_EMULATOR, Criticality::Optional, source)
    }

    /// Root filesystem manager availability
    pub fn rootfs_manager(source: Arc<dyn SelfCheck>) -> Self {
        Self::new(names::ROOTFS_MANAGER, Criticality::Optional, source)
    }
}

#[async_trait]
impl Probe for SelfCheckProbe {
    fn name(&self) -> &str {
        &self.name
    }

    fn criticality(&self) -> Criticality {
        self.criticality
    }

    async fn evaluate(&self) -> Result<Severity> {
        if self.source.check().await? {
            Ok(Severity::Healthy)
        } else {
            Ok(self.criticality.failure_severity())
        }
    }
}

// =============================================================================
// Connectivity Probe
// =============================================================================

/// Healthy when an active, connected network path exists, warning otherwise.
///
/// Mandatory: a provider fault resolves to an error.
pub struct ConnectivityProbe {
    source: Arc<dyn ConnectivityProvider>,
}

impl ConnectivityProbe {
    /// Create a connectivity probe
    pub fn new(source: Arc<dyn ConnectivityProvider>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Probe for ConnectivityProbe {
    fn name(&self) -> &str {
        names::NETWORK_CONNECTIVITY
    }

    fn criticality(&self) -> Criticality {
        Criticality::Mandatory
    }

    async fn evaluate(&self) -> Result<Severity> {
        let status = self.source.status().await?;
        if status.is_connected() {
            Ok(Severity::Healthy)
        } else {
            Ok(Severity::Warning)
        }
    }
}

// =============================================================================
// Standard Probe Set
// =============================================================================

/// Fact sources for the standard probe set.
///
/// The five self-check signals default to [`StaticSelfCheck::passing`]
/// placeholders until an embedding application wires real ones.
#[derive(Clone)]
pub struct ProbeSources {
    /// Dependency container self-check (mandatory)
    pub dependency_injection: Arc<dyn SelfCheck>,
    /// Storage layer self-check
    pub storage_layer: Arc<dyn SelfCheck>,
    /// AI subsystem self-check
    pub ai_subsystem: Arc<dyn SelfCheck>,
    /// Terminal emulator self-check
    pub terminal_emulator: Arc<dyn SelfCheck>,
    /// Root filesystem manager self-check
    pub rootfs_manager: Arc<dyn SelfCheck>,
    /// Network connectivity facts (mandatory)
    pub connectivity: Arc<dyn ConnectivityProvider>,
}

impl ProbeSources {
    /// Placeholder self-checks plus a real connectivity provider
    pub fn new(connectivity: Arc<dyn ConnectivityProvider>) -> Self {
        let passing: Arc<dyn SelfCheck> = Arc::new(StaticSelfCheck::passing());
        Self {
            dependency_injection: passing.clone(),
            storage_layer: passing.clone(),
            ai_subsystem: passing.clone(),
            terminal_emulator: passing.clone(),
            rootfs_manager: passing,
            connectivity,
        }
    }

    /// Replace the `dependency-injection` source
    pub fn with_dependency_injection(mut self, source: Arc<dyn SelfCheck>) -> Self {
        self.dependency_injection = source;
        self
    }

    /// Replace the `storage-layer` source
    pub fn with_storage_layer(mut self, source: Arc<dyn SelfCheck>) -> Self {
        self.storage_layer = source;
        self
    }

    /// Replace the `ai-subsystem` source
    pub fn with_ai_subsystem(mut self, source: Arc<dyn SelfCheck>) -> Self {
        self.ai_subsystem = source;
        self
    }

    /// Replace the `terminal-emulator` source
    pub fn with_terminal_emulator(mut self, source: Arc<dyn SelfCheck>) -> Self {
        self.terminal_emulator = source;
        self
    }

    /// Replace the `rootfs-manager` source
    pub fn with_rootfs_manager(mut self, source: Arc<dyn SelfCheck>) -> Self {
        self.rootfs_manager = source;
        self
    }
}

/// The six built-in probes in their default order
pub fn standard_probe_set(sources: ProbeSources) -> ProbeSet {
    let probes: [Box<dyn Probe>; 6] = [
        Box::new(SelfCheckProbe::dependency_injection(
            sources.dependency_injection,
        )),
        Box::new(SelfCheckProbe::storage_layer(sources.storage_layer)),
        Box::new(SelfCheckProbe::ai_subsystem(sources.ai_subsystem)),
        Box::new(SelfCheckProbe::terminal_emulator(sources.terminal_emulator)),
        Box::new(SelfCheckProbe::rootfs_manager(sources.rootfs_manager)),
        Box::new(ConnectivityProbe::new(sources.connectivity)),
    ];

    ProbeSet::from_unique(probes.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FnSelfCheck, StaticConnectivity};
    use crate::domain::ports::Connectivity;
    use crate::error::Error;
    use crate::health::probe::{evaluate_contained, DEFAULT_PROBE_TIMEOUT};
    use crate::health::snapshot::ProbeResult;

    #[tokio::test]
    async fn test_self_check_probe_mapping() {
        let ok = SelfCheckProbe::storage_layer(Arc::new(StaticSelfCheck::passing()));
        assert_eq!(ok.evaluate().await.unwrap(), Severity::Healthy);

        let optional_down = SelfCheckProbe::storage_layer(Arc::new(StaticSelfCheck::failing()));
        assert_eq!(optional_down.evaluate().await.unwrap(), Severity::Warning);

        let mandatory_down =
            SelfCheckProbe::dependency_injection(Arc::new(StaticSelfCheck::failing()));
        assert_eq!(mandatory_down.evaluate().await.unwrap(), Severity::Error);
    }

    #[tokio::test]
    async fn test_self_check_fault_is_contained() {
        let faulty: Arc<dyn SelfCheck> = Arc::new(FnSelfCheck::new(|| {
            Err(Error::fact_unavailable("ai", "model not loaded"))
        }));
        let probe = SelfCheckProbe::ai_subsystem(faulty);

        assert!(probe.evaluate().await.is_err());
        assert_eq!(
            evaluate_contained(&probe, DEFAULT_PROBE_TIMEOUT).await,
            Severity::Warning
        );
    }

    #[tokio::test]
    async fn test_connectivity_probe_mapping() {
        let online = ConnectivityProbe::new(Arc::new(StaticConnectivity::new(
            Connectivity::online(),
        )));
        assert_eq!(online.evaluate().await.unwrap(), Severity::Healthy);

        let connecting = ConnectivityProbe::new(Arc::new(StaticConnectivity::new(
            Connectivity::connecting(),
        )));
        assert_eq!(connecting.evaluate().await.unwrap(), Severity::Warning);

        let offline = ConnectivityProbe::new(Arc::new(StaticConnectivity::new(
            Connectivity::offline(),
        )));
        assert_eq!(offline.evaluate().await.unwrap(), Severity::Warning);
    }

    #[tokio::test]
    async fn test_connectivity_fault_is_error() {
        let probe = ConnectivityProbe::new(Arc::new(StaticConnectivity::faulty("denied")));
        assert_eq!(
            evaluate_contained(&probe, DEFAULT_PROBE_TIMEOUT).await,
            Severity::Error
        );
    }

    #[tokio::test]
    async fn test_standard_set_order_and_placeholders() {
        let set = standard_probe_set(ProbeSources::new(Arc::new(StaticConnectivity::new(
            Connectivity::online(),
        ))));

        assert_eq!(set.names(), names::STANDARD.to_vec());

        let mut out = Vec::new();
        set.evaluate_into(DEFAULT_PROBE_TIMEOUT, &mut out).await;
        assert!(out.iter().all(|r: &ProbeResult| r.severity == Severity::Healthy));
    }

    #[test]
    fn test_standard_set_still_rejects_duplicates() {
        let connectivity = Arc::new(StaticConnectivity::new(Connectivity::online()));
        let mut set = standard_probe_set(ProbeSources::new(connectivity.clone()));

        let err = set.register(ConnectivityProbe::new(connectivity)).unwrap_err();
        assert!(matches!(err, Error::DuplicateProbe(name) if name == names::NETWORK_CONNECTIVITY));
        assert_eq!(set.len(), names::STANDARD.len());
    }

    #[tokio::test]
    async fn test_sources_override() {
        let sources = ProbeSources::new(Arc::new(StaticConnectivity::new(Connectivity::online())))
            .with_rootfs_manager(Arc::new(StaticSelfCheck::failing()));
        let set = standard_probe_set(sources);

        let mut out = Vec::new();
        set.evaluate_into(DEFAULT_PROBE_TIMEOUT, &mut out).await;

        let rootfs = out
            .iter()
            .find(|r| r.name == names::ROOTFS_MANAGER)
            .unwrap();
        assert_eq!(rootfs.severity, Severity::Warning);
    }
}
