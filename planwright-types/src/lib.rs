//! Core type definitions for Planwright.
//!
//! This crate defines the fundamental, category-agnostic types shared by
//! the planning core:
//! - [`PlanDate`], the reference-time timestamp the plan is anchored to
//!
//! Entity categories (operations, buffers, resources, ...) live outside the
//! core and are only addressed through the capability traits in
//! `planwright-core`.

mod date;

pub use date::PlanDate;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid date: {0}")]
    InvalidDate(String),
}
