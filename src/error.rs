//! Validation error taxonomy for project entry
//!
//! These errors are reported at the input boundary; no portfolio state is
//! mutated when one is returned. Purely numerical edge cases (IRR
//! indeterminacy, zero-investment B/C) are NOT errors — the evaluator
//! converts those to guarded sentinel values so batch evaluation never
//! aborts on one bad project.

use thiserror::Error;

/// Malformed or missing required input for a project definition
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Project name is empty or whitespace-only
    #[error("project name must not be empty")]
    EmptyName,

    /// Another active project already uses this name (case-insensitive)
    #[error("a project named \"{0}\" already exists")]
    DuplicateName(String),

    /// Initial investment must be strictly positive
    #[error("initial investment must be positive, got {0}")]
    NonPositiveInvestment(f64),

    /// Useful life outside the accepted 1..=100 range
    #[error("useful life must be between 1 and 100 periods, got {0}")]
    LifeOutOfRange(u32),

    /// Variable-flow text contained no parseable numbers
    #[error("no valid numeric cash flows were found in the input")]
    NoValidFlows,

    /// Builder produced an empty cash-flow vector (internal invariant)
    #[error("cash-flow construction yielded a zero useful life")]
    ZeroUsefulLife,
}
