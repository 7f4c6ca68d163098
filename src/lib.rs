//! Engineering-economics project evaluator
//!
//! This library provides:
//! - Cash-flow vector construction from constant-annuity or variable-flow input
//! - NPV, EAV, B/C, and IRR calculation at a shared discount rate (TMAR)
//! - A guarded Newton-Raphson IRR root-finder with a tagged outcome
//! - NPV sensitivity profiles over a rate grid
//! - An ordered project portfolio with validation and flat-list persistence

pub mod error;
pub mod evaluation;
pub mod portfolio;
pub mod project;

// Re-export commonly used types
pub use error::ValidationError;
pub use evaluation::{evaluate, npv_at_rate, EvaluationResult, Irr};
pub use portfolio::{Portfolio, ProjectEvaluation};
pub use project::{FlowEntry, Project};
