//! Health Aggregation Integration Tests
//!
//! End-to-end tests through the public API:
//! - Standard probe set over real and fixed fact sources
//! - Initialization and refresh lifecycle
//! - Fault containment
//! - Rendering of the published snapshot

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;
use tokio_test::assert_ok;

use syshealth::adapters::{
    FnSelfCheck, HostInfoConfig, HostRuntimeInfoProvider, StaticConnectivity, StaticSelfCheck,
    TcpConnectivityConfig, TcpConnectivityProvider,
};
use syshealth::domain::ports::Connectivity;
use syshealth::health::{
    names, render_health, standard_probe_set, Criticality, Probe, ProbeSources,
};
use syshealth::{AggregatorConfig, AggregatorState, Error, HealthAggregator, Result, Severity};

fn online_sources() -> ProbeSources {
    ProbeSources::new(Arc::new(StaticConnectivity::new(Connectivity::online())))
}

// =============================================================================
// Lifecycle Tests
// =============================================================================

mod lifecycle_tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_then_current_is_all_unknown() {
        let aggregator =
            HealthAggregator::new(AggregatorConfig::default(), standard_probe_set(online_sources()))
                .unwrap();

        aggregator.initialize().await;
        let snapshot = aggregator.current();

        assert_eq!(snapshot.overall(), Severity::Unknown);
        assert_eq!(snapshot.probes().len(), names::STANDARD.len());
        for name in names::STANDARD {
            assert_eq!(snapshot.severity_of(name), Some(Severity::Unknown));
        }
        assert!(snapshot.last_checked().is_none());
    }

    #[tokio::test]
    async fn test_initialize_survives_host_info_failure() {
        let host_info = HostRuntimeInfoProvider::new(HostInfoConfig {
            data_dir: "/no/such/data/dir".into(),
            ..Default::default()
        });
        let aggregator = HealthAggregator::builder()
            .probe_set(standard_probe_set(online_sources()))
            .runtime_info(Arc::new(host_info))
            .build()
            .unwrap();

        aggregator.initialize().await;

        assert_eq!(aggregator.state(), AggregatorState::Initialized);
        assert_eq!(aggregator.current().overall(), Severity::Unknown);
        assert!(!aggregator.system_info().is_collected());
    }

    #[tokio::test]
    async fn test_initialize_collects_host_info() {
        let aggregator = HealthAggregator::builder()
            .probe_set(standard_probe_set(online_sources()))
            .runtime_info(Arc::new(HostRuntimeInfoProvider::default()))
            .build()
            .unwrap();

        aggregator.initialize().await;

        let info = aggregator.system_info();
        assert!(info.is_collected());
        assert_eq!(info.package_name, "syshealth");
    }

    #[tokio::test]
    async fn test_snapshots_held_by_readers_do_not_change() {
        let degraded = Arc::new(AtomicUsize::new(0));
        let flag = degraded.clone();
        let storage = Arc::new(FnSelfCheck::new(move || Ok(flag.load(Ordering::SeqCst) == 0)));
        let aggregator = HealthAggregator::new(
            AggregatorConfig::default(),
            standard_probe_set(online_sources().with_storage_layer(storage)),
        )
        .unwrap();

        let held = aggregator.refresh().await;
        assert_eq!(held.overall(), Severity::Healthy);

        degraded.store(1, Ordering::SeqCst);
        aggregator.refresh().await;

        assert_eq!(held.overall(), Severity::Healthy);
        assert_eq!(held.generation(), 1);
        assert_eq!(aggregator.current().overall(), Severity::Warning);
        assert_eq!(aggregator.current().generation(), 2);
    }
}

// =============================================================================
// Connectivity Tests
// =============================================================================

mod connectivity_tests {
    use super::*;

    fn tcp_sources(target: String) -> ProbeSources {
        let provider = assert_ok!(TcpConnectivityProvider::new(TcpConnectivityConfig {
            target,
            connect_timeout: Duration::from_secs(2),
        }));
        ProbeSources::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn test_reachable_endpoint_is_healthy() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let target = listener.local_addr().unwrap().to_string();

        let aggregator =
            HealthAggregator::new(AggregatorConfig::default(), standard_probe_set(tcp_sources(target)))
                .unwrap();
        let snapshot = aggregator.refresh().await;

        assert_eq!(
            snapshot.severity_of(names::NETWORK_CONNECTIVITY),
            Some(Severity::Healthy)
        );
        assert_eq!(snapshot.overall(), Severity::Healthy);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_warning() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let target = listener.local_addr().unwrap().to_string();
        drop(listener);

        let aggregator =
            HealthAggregator::new(AggregatorConfig::default(), standard_probe_set(tcp_sources(target)))
                .unwrap();
        let snapshot = aggregator.refresh().await;

        assert_eq!(
            snapshot.severity_of(names::NETWORK_CONNECTIVITY),
            Some(Severity::Warning)
        );
        assert_eq!(snapshot.overall(), Severity::Warning);
    }
}

// =============================================================================
// Fault Containment Tests
// =============================================================================

mod fault_tests {
    use super::*;

    struct HangingProbe;

    #[async_trait]
    impl Probe for HangingProbe {
        fn name(&self) -> &str {
            "hanging-service"
        }

        fn criticality(&self) -> Criticality {
            Criticality::Mandatory
        }

        async fn evaluate(&self) -> Result<Severity> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Severity::Healthy)
        }
    }

    struct PanickingProbe;

    #[async_trait]
    impl Probe for PanickingProbe {
        fn name(&self) -> &str {
            "panicking-capability"
        }

        fn criticality(&self) -> Criticality {
            Criticality::Optional
        }

        async fn evaluate(&self) -> Result<Severity> {
            panic!("capability check crashed")
        }
    }

    #[tokio::test]
    async fn test_each_fault_degrades_only_its_probe() {
        let sources = online_sources()
            .with_dependency_injection(Arc::new(FnSelfCheck::new(|| {
                Err(Error::fact_unavailable("di", "container missing"))
            })))
            .with_terminal_emulator(Arc::new(FnSelfCheck::new(|| {
                Err(Error::fact_unavailable("terminal", "pty denied"))
            })));
        let aggregator =
            HealthAggregator::new(AggregatorConfig::default(), standard_probe_set(sources)).unwrap();

        let snapshot = aggregator.refresh().await;

        assert_eq!(
            snapshot.severity_of(names::DEPENDENCY_INJECTION),
            Some(Severity::Error)
        );
        assert_eq!(
            snapshot.severity_of(names::TERMINAL_EMULATOR),
            Some(Severity::Warning)
        );
        assert_eq!(
            snapshot.severity_of(names::STORAGE_LAYER),
            Some(Severity::Healthy)
        );
        assert_eq!(snapshot.overall(), Severity::Error);
    }

    #[tokio::test]
    async fn test_hanging_and_panicking_probes_are_bounded() {
        let aggregator = HealthAggregator::builder()
            .config(AggregatorConfig {
                probe_timeout: Duration::from_millis(50),
                ..Default::default()
            })
            .probe_set(standard_probe_set(online_sources()))
            .probe(PanickingProbe)
            .probe(HangingProbe)
            .build()
            .unwrap();

        let snapshot = tokio::time::timeout(Duration::from_secs(5), aggregator.refresh())
            .await
            .expect("refresh must not hang");

        assert_eq!(
            snapshot.severity_of("panicking-capability"),
            Some(Severity::Warning)
        );
        assert_eq!(snapshot.severity_of("hanging-service"), Some(Severity::Error));
        assert_eq!(snapshot.probes().len(), 8);
        assert_eq!(snapshot.overall(), Severity::Error);
    }
}

// =============================================================================
// Worked Examples
// =============================================================================

mod example_tests {
    use super::*;

    #[tokio::test]
    async fn test_ai_warning_gives_warning_overall() {
        let aggregator = HealthAggregator::new(
            AggregatorConfig::default(),
            standard_probe_set(
                online_sources().with_ai_subsystem(Arc::new(StaticSelfCheck::failing())),
            ),
        )
        .unwrap();

        assert_eq!(aggregator.refresh().await.overall(), Severity::Warning);
    }

    #[tokio::test]
    async fn test_render_after_refresh() {
        let aggregator =
            HealthAggregator::new(AggregatorConfig::default(), standard_probe_set(online_sources()))
                .unwrap();

        aggregator.initialize().await;
        let before = render_health(&aggregator.current());
        assert!(before.contains("Overall: Unknown"));
        assert!(!before.contains("Last Check"));

        aggregator.refresh().await;
        let after = render_health(&aggregator.current());
        assert!(after.contains("Overall: Healthy"));
        assert!(after.contains("  network-connectivity: Healthy"));
        assert!(after.contains("Last Check: "));
    }

    #[tokio::test]
    async fn test_snapshot_json() {
        let aggregator =
            HealthAggregator::new(AggregatorConfig::default(), standard_probe_set(online_sources()))
                .unwrap();
        let snapshot = aggregator.refresh().await;

        let json = serde_json::to_value(&*snapshot).unwrap();
        assert_eq!(json["overall"], "healthy");
        assert_eq!(json["probes"].as_array().unwrap().len(), 6);
        assert_eq!(json["probes"][0]["name"], "dependency-injection");
    }
}
