//! Global coordination core of the Planwright planning engine.
//!
//! - [`PlanContext`]: the process-wide plan (reference time, settings,
//!   singleton lifecycle and the `settings` scripting global)
//! - [`Category`] / [`CategoryTable`]: the closed set of erasable entity
//!   categories and the stores behind them
//! - [`InvalidationStrategy`]: how a time move reaches cached diagnostics
//!   ([`FullSweep`] by default)
//! - [`LogFile`]: the redirectable destination for `tracing` output
//! - [`PlanConfig`]: TOML configuration applied at construction
//!
//! Entity categories themselves (operations, buffers, demands, ...) live
//! outside this crate and plug in through [`CategoryStore`],
//! [`OperationStore`] and [`ChangeTracked`].

mod category;
mod config;
mod error;
mod invalidation;
mod log;
mod plan;
mod store;

pub use category::{Category, CategoryTable, CategoryTableBuilder};
pub use config::PlanConfig;
pub use error::{PlanError, PlanResult};
pub use invalidation::{FullSweep, InvalidationStrategy, TimeChange};
pub use log::{init_tracing, LogFile, LogWriter};
pub use plan::{PlanBuilder, PlanContext, PLAN_CATEGORY, SCRIPT_TYPE, SETTINGS_GLOBAL};
pub use store::{CategoryStore, ChangeTracked, DetachedCategory, EntityStore, OperationStore};
