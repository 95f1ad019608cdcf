//! Severity lattice and the reduction rule

use serde::{Deserialize, Serialize};

/// Health severity of a probe or of the aggregate.
///
/// Variants are declared in ascending severity so the derived `Ord` is
/// `Unknown < Healthy < Warning < Error`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Not yet checked, or not resolvable
    #[default]
    Unknown,
    /// Working normally
    Healthy,
    /// Degraded but operational
    Warning,
    /// Broken
    Error,
}

impl Severity {
    /// All variants in ascending order
    pub const ALL: [Severity; 4] = [
        Severity::Unknown,
        Severity::Healthy,
        Severity::Warning,
        Severity::Error,
    ];

    /// Check if severity is healthy
    pub fn is_healthy(&self) -> bool {
        *self == Severity::Healthy
    }

    /// Check if severity is healthy or warning (operational)
    pub fn is_operational(&self) -> bool {
        matches!(self, Severity::Healthy | Severity::Warning)
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Unknown => "Unknown",
            Severity::Healthy => "Healthy",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Reduce per-probe severities to one overall severity.
///
/// ```text
/// Error    if any is Error
/// Warning  else if any is Warning
/// Healthy  else if all are Healthy (and there is at least one)
/// Unknown  otherwise
/// ```
///
/// The result depends only on the multiset of inputs, never on their order.
pub fn reduce<I>(severities: I) -> Severity
where
    I: IntoIterator<Item = Severity>,
{
    let mut seen_any = false;
    let mut any_warning = false;
    let mut all_healthy = true;

    for severity in severities {
        seen_any = true;
        match severity {
            Severity::Error => return Severity::Error,
            Severity::Warning => any_warning = true,
            Severity::Healthy => {}
            Severity::Unknown => all_healthy = false,
        }
    }

    if any_warning {
        Severity::Warning
    } else if seen_any && all_healthy {
        Severity::Healthy
    } else {
        Severity::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Severity::*;

    #[test]
    fn test_ordering() {
        assert!(Unknown < Healthy);
        assert!(Healthy < Warning);
        assert!(Warning < Error);
        let mut sorted = vec![Error, Unknown, Warning, Healthy];
        sorted.sort();
        assert_eq!(sorted, Severity::ALL.to_vec());
    }

    #[test]
    fn test_predicates() {
        assert!(Healthy.is_healthy());
        assert!(Healthy.is_operational());
        assert!(!Warning.is_healthy());
        assert!(Warning.is_operational());
        assert!(!Error.is_operational());
        assert!(!Unknown.is_operational());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Healthy), "Healthy");
        assert_eq!(format!("{}", Warning), "Warning");
        assert_eq!(format!("{}", Error), "Error");
        assert_eq!(format!("{}", Unknown), "Unknown");
    }

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(Severity::default(), Unknown);
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&Warning).unwrap(), "\"warning\"");
        let back: Severity = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(back, Error);
    }

    #[test]
    fn test_reduce_precedence_chain() {
        assert_eq!(reduce([Healthy, Error, Warning]), Error);
        assert_eq!(reduce([Healthy, Warning, Unknown]), Warning);
        assert_eq!(reduce([Healthy, Healthy]), Healthy);
        assert_eq!(reduce([Healthy, Unknown]), Unknown);
        assert_eq!(reduce([Unknown, Unknown]), Unknown);
    }

    #[test]
    fn test_reduce_empty_is_unknown() {
        assert_eq!(reduce(std::iter::empty()), Unknown);
    }

    #[test]
    fn test_reduce_worked_examples() {
        // di, storage, ai, terminal, rootfs, network
        assert_eq!(
            reduce([Healthy, Healthy, Warning, Healthy, Healthy, Healthy]),
            Warning
        );
        assert_eq!(
            reduce([Healthy, Error, Healthy, Healthy, Healthy, Warning]),
            Error
        );
    }
}
