//! Immutable health snapshots

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::severity::{reduce, Severity};

/// One probe's outcome within a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    /// Probe name
    pub name: String,
    /// Severity the probe resolved to
    pub severity: Severity,
}

impl ProbeResult {
    /// Create a probe result
    pub fn new(name: impl Into<String>, severity: Severity) -> Self {
        Self {
            name: name.into(),
            severity,
        }
    }

    /// Create an unresolved probe result
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::new(name, Severity::Unknown)
    }
}

/// Published record of all probe results plus their reduction.
///
/// Snapshots are built whole and never mutated afterwards; the aggregator
/// hands them out behind an `Arc`. `overall` is always derived from the probe
/// results at construction, except for fallback snapshots which pin it to
/// [`Severity::Error`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthSnapshot {
    overall: Severity,
    probes: Vec<ProbeResult>,
    last_checked: Option<DateTime<Utc>>,
    generation: u64,
    run_id: Option<Uuid>,
}

impl HealthSnapshot {
    /// Snapshot before any check has run: every probe `Unknown`, no timestamp.
    pub fn initial<I, S>(probe_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let probes: Vec<ProbeResult> = probe_names.into_iter().map(ProbeResult::unknown).collect();

        Self {
            overall: reduce(probes.iter().map(|p| p.severity)),
            probes,
            last_checked: None,
            generation: 0,
            run_id: None,
        }
    }

    /// Snapshot computed from a completed refresh.
    pub fn computed(
        probes: Vec<ProbeResult>,
        generation: u64,
        run_id: Uuid,
        checked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            overall: reduce(probes.iter().map(|p| p.severity)),
            probes,
            last_checked: Some(checked_at),
            generation,
            run_id: Some(run_id),
        }
    }

    /// Snapshot published after a refresh failed outside any probe.
    pub fn fallback(
        probes: Vec<ProbeResult>,
        generation: u64,
        run_id: Uuid,
        checked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            overall: Severity::Error,
            probes,
            last_checked: Some(checked_at),
            generation,
            run_id: Some(run_id),
        }
    }

    /// Overall severity
    pub fn overall(&self) -> Severity {
        self.overall
    }

    /// Probe results in registration order
    pub fn probes(&self) -> &[ProbeResult] {
        &self.probes
    }

    /// Severity of a single probe, if registered
    pub fn severity_of(&self, name: &str) -> Option<Severity> {
        self.probes
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.severity)
    }

    /// When this snapshot was computed, `None` before the first refresh
    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked
    }

    /// Publication counter; 0 for the initial snapshot
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Identifier of the refresh that produced this snapshot
    pub fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }

    /// Whether any refresh has produced this snapshot
    pub fn is_checked(&self) -> bool {
        self.last_checked.is_some()
    }
}

impl Default for HealthSnapshot {
    fn default() -> Self {
        Self::initial(std::iter::empty::<String>())
    }
}
