//! State stores
//!
//! Per-domain caches over the API modules. Each store records a
//! human-readable error message before re-throwing a failure, keeps its
//! collections untouched on failure, and resets its loading flag on
//! every exit path via [`FlagGuard`].

pub mod auth;
pub mod backtest;
pub mod portfolio;
pub mod valuation;

pub use auth::AuthStore;
pub use backtest::{BacktestStore, PollHandle, RunPoll};
pub use portfolio::PortfolioStore;
pub use valuation::ValuationStore;

use std::sync::atomic::{AtomicBool, Ordering};

/// RAII guard for a busy flag: set on construction, cleared on drop,
/// so success, failure and cancellation all reset it.
pub(crate) struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    pub(crate) fn set(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_guard_resets_on_drop() {
        let flag = AtomicBool::new(false);
        {
            let _guard = FlagGuard::set(&flag);
            assert!(flag.load(Ordering::SeqCst));
        }
        assert!(!flag.load(Ordering::SeqCst));
    }
}
