//! Probe contract, per-probe fault boundary and the ordered probe set

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, error, warn};

use super::severity::Severity;
use super::snapshot::ProbeResult;
use crate::error::{Error, Result};

/// Default time bound for a single probe evaluation
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// Criticality
// =============================================================================

/// How much a subsystem matters when its check cannot complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    /// Required connectivity or service; a fault is an error
    Mandatory,
    /// Soft capability; a fault is a warning
    Optional,
}

impl Criticality {
    /// Severity a faulting probe of this class degrades to
    pub fn failure_severity(&self) -> Severity {
        match self {
            Criticality::Mandatory => Severity::Error,
            Criticality::Optional => Severity::Warning,
        }
    }
}

// =============================================================================
// Probe
// =============================================================================

/// A named, independent subsystem check.
///
/// Implementations receive their fact sources at construction and must not
/// depend on any other probe's result. Returning `Err` is allowed; the probe
/// set's fault boundary turns it into [`Criticality::failure_severity`].
#[async_trait]
pub trait Probe: Send + Sync {
    /// Stable, unique name
    fn name(&self) -> &str;

    /// Failure classification
    fn criticality(&self) -> Criticality;

    /// Evaluate the check once
    async fn evaluate(&self) -> Result<Severity>;
}

/// Run one probe inside its own fault boundary.
///
/// Errors, panics and timeouts are logged and mapped to the probe's failure
/// severity. Nothing escapes.
pub async fn evaluate_contained(probe: &dyn Probe, limit: Duration) -> Severity {
    let name = probe.name();
    let on_fault = probe.criticality().failure_severity();

    let fault = match timeout(limit, AssertUnwindSafe(probe.evaluate()).catch_unwind()).await {
        Ok(Ok(Ok(severity))) => {
            debug!(probe = %name, %severity, "Probe evaluated");
            return severity;
        }
        Ok(Ok(Err(e))) => e,
        Ok(Err(payload)) => Error::ProbePanicked {
            probe: name.to_string(),
            message: panic_message(payload.as_ref()),
        },
        Err(_) => Error::ProbeTimeout {
            probe: name.to_string(),
            timeout: limit,
        },
    };

    match &fault {
        Error::ProbePanicked { .. } => {
            error!(probe = %name, severity = %on_fault, "Probe fault contained: {}", fault)
        }
        _ => warn!(probe = %name, severity = %on_fault, "Probe fault contained: {}", fault),
    }
    on_fault
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

// =============================================================================
// Probe Set
// =============================================================================

/// Ordered collection of probes with unique names.
///
/// Registration order only affects display order.
#[derive(Default)]
pub struct ProbeSet {
    probes: Vec<Box<dyn Probe>>,
}

impl ProbeSet {
    /// Create an empty probe set
    pub fn new() -> Self {
        Self::default()
    }

    /// Take probes whose names are already known to be distinct
    pub(super) fn from_unique(probes: Vec<Box<dyn Probe>>) -> Self {
        debug_assert!(
            probes
                .iter()
                .enumerate()
                .all(|(i, p)| probes[..i].iter().all(|q| q.name() != p.name())),
            "duplicate probe name"
        );
        Self { probes }
    }

    /// Append a probe; rejects a name that is already registered
    pub fn register<P: Probe + 'static>(&mut self, probe: P) -> Result<()> {
        self.register_boxed(Box::new(probe))
    }

    /// Append an already boxed probe
    pub fn register_boxed(&mut self, probe: Box<dyn Probe>) -> Result<()> {
        if self.contains(probe.name()) {
            return Err(Error::DuplicateProbe(probe.name().to_string()));
        }
        self.probes.push(probe);
        Ok(())
    }

    /// Builder-style [`register`](Self::register)
    pub fn with<P: Probe + 'static>(mut self, probe: P) -> Result<Self> {
        self.register(probe)?;
        Ok(self)
    }

    /// Whether a probe with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.probes.iter().any(|p| p.name() == name)
    }

    /// Names in registration order
    pub fn names(&self) -> Vec<String> {
        self.probes.iter().map(|p| p.name().to_string()).collect()
    }

    /// Number of probes
    pub fn len(&self) -> usize {
        self.probes.len()
    }

    /// True if no probe is registered
    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    /// Evaluate every probe once, in order, appending to `out` as each
    /// finishes.
    pub async fn evaluate_into(&self, limit: Duration, out: &mut Vec<ProbeResult>) {
        for probe in &self.probes {
            let severity = evaluate_contained(probe.as_ref(), limit).await;
            out.push(ProbeResult::new(probe.name(), severity));
        }
    }
}

impl std::fmt::Debug for ProbeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeSet")
            .field("probes", &self.names())
            .finish()
    }
}
