//! Error types for the health aggregator

use std::time::Duration;

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while gathering health facts
///
/// None of these ever escape [`HealthAggregator`](crate::health::HealthAggregator)
/// operations; they are folded into a [`Severity`](crate::health::Severity)
/// at the probe or aggregator boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A fact source could not answer
    #[error("Fact source '{source_name}' unavailable: {reason}")]
    FactUnavailable { source_name: String, reason: String },

    /// Probe did not finish within its time bound
    #[error("Probe '{probe}' timed out after {timeout:?}")]
    ProbeTimeout { probe: String, timeout: Duration },

    /// Probe panicked while evaluating
    #[error("Probe '{probe}' panicked: {message}")]
    ProbePanicked { probe: String, message: String },

    /// Two probes registered under one name
    #[error("Duplicate probe name: {0}")]
    DuplicateProbe(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for [`Error::FactUnavailable`]
    pub fn fact_unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::FactUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::fact_unavailable("connectivity", "no route");
        assert_eq!(
            err.to_string(),
            "Fact source 'connectivity' unavailable: no route"
        );

        let err = Error::ProbeTimeout {
            probe: "network-connectivity".to_string(),
            timeout: Duration::from_secs(5),
        };
        assert_eq!(
            err.to_string(),
            "Probe 'network-connectivity' timed out after 5s"
        );

        let err = Error::DuplicateProbe("storage-layer".to_string());
        assert_eq!(err.to_string(), "Duplicate probe name: storage-layer");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
