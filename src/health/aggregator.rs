//! Health Aggregator
//!
//! Runs the probe set, reduces the results and publishes an immutable
//! [`HealthSnapshot`] that any number of readers can fetch without
//! re-running the checks.
//!
//! # Publication
//!
//! The current snapshot sits behind a `parking_lot::RwLock<Arc<_>>`. The
//! write lock is held only to swap the pointer, so a reader always gets
//! either the old or the new snapshot in full. Refreshes are serialized by an
//! async mutex that also owns the generation counter; [`current`] never waits
//! on it.
//!
//! [`current`]: HealthAggregator::current

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::FutureExt;
use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use super::probe::{panic_message, Probe, ProbeSet, DEFAULT_PROBE_TIMEOUT};
use super::snapshot::{HealthSnapshot, ProbeResult};
use crate::domain::ports::RuntimeInfoProvider;
use crate::domain::system_info::SystemInfo;
use crate::error::{Error, Result};

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the health aggregator
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Time bound for each probe evaluation
    pub probe_timeout: Duration,

    /// Period used by [`HealthAggregator::spawn_periodic`]
    pub refresh_interval: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            refresh_interval: Duration::from_secs(30),
        }
    }
}

impl AggregatorConfig {
    fn validate(&self) -> Result<()> {
        if self.probe_timeout.is_zero() {
            return Err(Error::Config("probe_timeout must be non-zero".to_string()));
        }
        if self.refresh_interval.is_zero() {
            return Err(Error::Config(
                "refresh_interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

/// Aggregator lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregatorState {
    /// Constructed; the initial snapshot is readable but not yet published
    Uninitialized,
    /// Initial all-unknown snapshot published
    Initialized,
    /// At least one refresh published
    Refreshed,
}

struct Published {
    snapshot: Arc<HealthSnapshot>,
    state: AggregatorState,
}

// =============================================================================
// Health Aggregator
// =============================================================================

/// Owns the probe set and the currently published snapshot.
///
/// Share it with `Arc`; there is no global instance.
pub struct HealthAggregator {
    config: AggregatorConfig,
    probes: ProbeSet,
    runtime_info: Option<Arc<dyn RuntimeInfoProvider>>,
    initial: Arc<HealthSnapshot>,
    published: RwLock<Published>,
    system_info: RwLock<Arc<SystemInfo>>,
    /// Serializes refreshes; holds the last generation handed out
    refresh_lock: Mutex<u64>,
}

impl HealthAggregator {
    /// Start building an aggregator
    pub fn builder() -> HealthAggregatorBuilder {
        HealthAggregatorBuilder::default()
    }

    /// Create an aggregator over an existing probe set
    pub fn new(config: AggregatorConfig, probes: ProbeSet) -> Result<Self> {
        Self::builder().config(config).probe_set(probes).build()
    }

    fn from_parts(
        config: AggregatorConfig,
        probes: ProbeSet,
        runtime_info: Option<Arc<dyn RuntimeInfoProvider>>,
    ) -> Self {
        let initial = Arc::new(HealthSnapshot::initial(probes.names()));

        Self {
            config,
            probes,
            runtime_info,
            published: RwLock::new(Published {
                snapshot: initial.clone(),
                state: AggregatorState::Uninitialized,
            }),
            initial,
            system_info: RwLock::new(Arc::new(SystemInfo::default())),
            refresh_lock: Mutex::new(0),
        }
    }

    /// Publish the all-unknown snapshot and gather runtime info.
    ///
    /// Repeated calls republish the same initial snapshot until the first
    /// refresh; after that only runtime info is gathered again. A failure
    /// while gathering runtime info is logged and otherwise ignored.
    #[instrument(skip(self))]
    pub async fn initialize(&self) {
        debug!("Initializing health aggregator");

        {
            let _serial = self.refresh_lock.lock().await;
            if self.state() == AggregatorState::Refreshed {
                debug!("Already refreshed, keeping published snapshot");
            } else {
                self.publish(self.initial.clone(), AggregatorState::Initialized);
            }
        }

        if let Some(provider) = &self.runtime_info {
            match AssertUnwindSafe(provider.collect()).catch_unwind().await {
                Ok(Ok(info)) => {
                    debug!(hostname = %info.hostname, "System info collected");
                    *self.system_info.write() = Arc::new(info);
                }
                Ok(Err(e)) => error!("Failed to collect system info: {}", e),
                Err(payload) => error!(
                    "System info collection panicked: {}",
                    panic_message(payload.as_ref())
                ),
            }
        }

        info!(probes = self.probes.len(), "Health aggregator initialized");
    }

    /// Run every probe once, reduce, and publish the result.
    ///
    /// Never fails: an orchestration fault publishes a fallback snapshot
    /// with an `Error` overall. Returns the snapshot that was published.
    #[instrument(skip(self), fields(run_id = tracing::field::Empty))]
    pub async fn refresh(&self) -> Arc<HealthSnapshot> {
        let mut last_generation = self.refresh_lock.lock().await;
        let generation = *last_generation + 1;
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));

        debug!(generation, "Performing health check");

        let mut gathered = Vec::with_capacity(self.probes.len());
        let outcome = AssertUnwindSafe(self.run_probes(&mut gathered))
            .catch_unwind()
            .await;

        let snapshot = Arc::new(self.settle(outcome, gathered, generation, run_id));
        *last_generation = generation;
        self.publish(snapshot.clone(), AggregatorState::Refreshed);
        snapshot
    }

    async fn run_probes(&self, gathered: &mut Vec<ProbeResult>) -> Result<()> {
        self.probes
            .evaluate_into(self.config.probe_timeout, gathered)
            .await;

        if gathered.len() != self.probes.len() {
            return Err(Error::Internal(format!(
                "Expected {} probe results, got {}",
                self.probes.len(),
                gathered.len()
            )));
        }
        Ok(())
    }

    fn settle(
        &self,
        outcome: std::thread::Result<Result<()>>,
        gathered: Vec<ProbeResult>,
        generation: u64,
        run_id: Uuid,
    ) -> HealthSnapshot {
        let checked_at = Utc::now();

        match outcome {
            Ok(Ok(())) => {
                let snapshot = HealthSnapshot::computed(gathered, generation, run_id, checked_at);
                debug!(overall = %snapshot.overall(), "Health check completed");
                snapshot
            }
            Ok(Err(e)) => {
                error!("Health check failed: {}", e);
                self.fallback(gathered, generation, run_id, checked_at)
            }
            Err(payload) => {
                error!(
                    "Health check panicked: {}",
                    panic_message(payload.as_ref())
                );
                self.fallback(gathered, generation, run_id, checked_at)
            }
        }
    }

    /// Keep whatever this run produced; probes that never ran stay unknown.
    fn fallback(
        &self,
        gathered: Vec<ProbeResult>,
        generation: u64,
        run_id: Uuid,
        checked_at: chrono::DateTime<Utc>,
    ) -> HealthSnapshot {
        let probes = self
            .initial
            .probes()
            .iter()
            .map(|registered| {
                gathered
                    .iter()
                    .find(|r| r.name == registered.name)
                    .cloned()
                    .unwrap_or_else(|| ProbeResult::unknown(registered.name.clone()))
            })
            .collect();

        HealthSnapshot::fallback(probes, generation, run_id, checked_at)
    }

    fn publish(&self, snapshot: Arc<HealthSnapshot>, state: AggregatorState) {
        *self.published.write() = Published { snapshot, state };
    }

    /// Latest published snapshot; never triggers a refresh
    pub fn current(&self) -> Arc<HealthSnapshot> {
        self.published.read().snapshot.clone()
    }

    /// Lifecycle state
    pub fn state(&self) -> AggregatorState {
        self.published.read().state
    }

    /// Runtime info gathered by [`initialize`](Self::initialize), or the
    /// placeholder if none was gathered
    pub fn system_info(&self) -> Arc<SystemInfo> {
        self.system_info.read().clone()
    }

    /// Registered probe names in display order
    pub fn probe_names(&self) -> Vec<String> {
        self.probes.names()
    }

    /// Aggregator configuration
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Refresh every `refresh_interval` until `token` is cancelled.
    ///
    /// The first refresh runs immediately.
    pub fn spawn_periodic(self: Arc<Self>, token: CancellationToken) -> JoinHandle<()> {
        let period = self.config.refresh_interval;

        tokio::spawn(async move {
            info!("Starting periodic health refresh every {:?}", period);

            let mut tick = interval(period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        info!("Periodic health refresh stopped");
                        break;
                    }
                    _ = tick.tick() => {
                        self.refresh().await;
                    }
                }
            }
        })
    }
}

impl std::fmt::Debug for HealthAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthAggregator")
            .field("config", &self.config)
            .field("probes", &self.probes)
            .field("state", &self.state())
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builder for [`HealthAggregator`]
#[derive(Default)]
pub struct HealthAggregatorBuilder {
    config: AggregatorConfig,
    probes: ProbeSet,
    extra: Vec<Box<dyn Probe>>,
    runtime_info: Option<Arc<dyn RuntimeInfoProvider>>,
}

impl HealthAggregatorBuilder {
    /// Set the configuration
    pub fn config(mut self, config: AggregatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Start from an existing probe set
    pub fn probe_set(mut self, probes: ProbeSet) -> Self {
        self.probes = probes;
        self
    }

    /// Append one probe after any already registered
    pub fn probe<P: Probe + 'static>(mut self, probe: P) -> Self {
        self.extra.push(Box::new(probe));
        self
    }

    /// Source of runtime info gathered during initialization
    pub fn runtime_info(mut self, provider: Arc<dyn RuntimeInfoProvider>) -> Self {
        self.runtime_info = Some(provider);
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<HealthAggregator> {
        self.config.validate()?;

        let mut probes = self.probes;
        for probe in self.extra {
            probes.register_boxed(probe)?;
        }

        Ok(HealthAggregator::from_parts(
            self.config,
            probes,
            self.runtime_info,
        ))
    }
}

// =============================================================================
// Tests
// =============================================================================
