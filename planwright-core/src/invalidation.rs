//! Propagation of a reference-time move to cached diagnostics.
//!
//! Problems such as "operation planned before the current date" are
//! defined relative to now, so any operation may be affected by any time
//! move. The default strategy therefore notifies every live operation.

use planwright_types::PlanDate;
use tracing::debug;

use crate::store::OperationStore;

/// A move of the plan's reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeChange {
    pub previous: PlanDate,
    pub current: PlanDate,
}

/// Decides which operations to mark changed after a time move.
///
/// Whatever the strategy, every affected operation must have been
/// notified before `invalidate` returns.
pub trait InvalidationStrategy: Send + Sync {
    /// Returns the number of operations notified.
    fn invalidate(&self, operations: &dyn OperationStore, change: TimeChange) -> usize;
}

/// Marks every live operation changed exactly once.
#[derive(Debug, Default, Clone, Copy)]
pub struct FullSweep;

impl InvalidationStrategy for FullSweep {
    fn invalidate(&self, operations: &dyn OperationStore, change: TimeChange) -> usize {
        let live = operations.all();
        for operation in &live {
            operation.mark_changed();
        }
        debug!(
            previous = %change.previous,
            current = %change.current,
            notified = live.len(),
            "Operations marked changed"
        );
        live.len()
    }
}
