//! Self-Check Adapters
//!
//! Implements the `SelfCheck` port with fixed and closure-backed signals.

use async_trait::async_trait;

use crate::domain::ports::SelfCheck;
use crate::error::Result;

/// Self-check with a fixed answer.
///
/// `passing()` is the placeholder used for subsystems that have no real
/// signal wired in yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticSelfCheck {
    available: bool,
}

impl StaticSelfCheck {
    /// Create a self-check that always reports `available`
    pub fn new(available: bool) -> Self {
        Self { available }
    }

    /// Always available
    pub fn passing() -> Self {
        Self::new(true)
    }

    /// Always unavailable
    pub fn failing() -> Self {
        Self::new(false)
    }
}

#[async_trait]
impl SelfCheck for StaticSelfCheck {
    async fn check(&self) -> Result<bool> {
        Ok(self.available)
    }
}

/// Self-check backed by a synchronous closure.
///
/// Handy for wiring an existing "is it up?" function without a new type.
pub struct FnSelfCheck<F> {
    check: F,
}

impl<F> FnSelfCheck<F>
where
    F: Fn() -> Result<bool> + Send + Sync,
{
    /// Wrap a closure
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F> std::fmt::Debug for FnSelfCheck<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSelfCheck").finish_non_exhaustive()
    }
}

#[async_trait]
impl<F> SelfCheck for FnSelfCheck<F>
where
    F: Fn() -> Result<bool> + Send + Sync,
{
    async fn check(&self) -> Result<bool> {
        (self.check)()
    }
}
