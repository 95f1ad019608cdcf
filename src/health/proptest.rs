//! Property-Based Tests for Severity Reduction
//!
//! # Test Properties
//!
//! 1. **Order independence**: permuting inputs never changes the result
//! 2. **Dominance**: any `Error` input yields `Error`
//! 3. **Monotonic degradation**: worsening one input never improves the result
//! 4. **Closure**: all `Healthy` yields `Healthy`; all `Unknown` yields `Unknown`

#![cfg(test)]

use proptest::prelude::*;

use super::severity::{reduce, Severity};

// =============================================================================
// Property Strategies
// =============================================================================

fn severity_strategy() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn severities_strategy() -> impl Strategy<Value = Vec<Severity>> {
    prop::collection::vec(severity_strategy(), 0..16)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: the result depends only on the multiset of inputs.
    #[test]
    fn prop_order_independent(
        (original, shuffled) in severities_strategy()
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
    ) {
        prop_assert_eq!(reduce(original), reduce(shuffled));
    }

    /// Property: a single Error dominates everything else.
    #[test]
    fn prop_error_dominates(
        mut severities in severities_strategy(),
        position in any::<prop::sample::Index>(),
    ) {
        let at = position.index(severities.len() + 1);
        severities.insert(at, Severity::Error);
        prop_assert_eq!(reduce(severities), Severity::Error);
    }

    /// Property: replacing one input with a strictly worse one never lowers
    /// the overall severity.
    #[test]
    fn prop_monotonic_degradation(
        severities in prop::collection::vec(severity_strategy(), 1..16),
        position in any::<prop::sample::Index>(),
        replacement in severity_strategy(),
    ) {
        let at = position.index(severities.len());
        prop_assume!(replacement > severities[at]);

        let before = reduce(severities.clone());
        let mut worse = severities;
        worse[at] = replacement;

        prop_assert!(reduce(worse) >= before);
    }

    /// Property: all healthy inputs reduce to Healthy.
    #[test]
    fn prop_all_healthy(count in 1usize..16) {
        prop_assert_eq!(reduce(vec![Severity::Healthy; count]), Severity::Healthy);
    }

    /// Property: all unknown inputs (including none) reduce to Unknown.
    #[test]
    fn prop_all_unknown(count in 0usize..16) {
        prop_assert_eq!(reduce(vec![Severity::Unknown; count]), Severity::Unknown);
    }

    /// Property: Warning without Error reduces to Warning.
    #[test]
    fn prop_warning_without_error(
        mut severities in prop::collection::vec(
            prop::sample::select(vec![Severity::Unknown, Severity::Healthy, Severity::Warning]),
            0..16,
        ),
    ) {
        severities.push(Severity::Warning);
        prop_assert_eq!(reduce(severities), Severity::Warning);
    }
}
