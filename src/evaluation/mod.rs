//! Financial evaluation engine: NPV, EAV, B/C, and the IRR root-finder

mod irr;
mod metrics;
mod sensitivity;

pub use irr::{solve as solve_irr, IndeterminateReason, Irr, MAX_ITERATIONS, RATE_MAX, RATE_MIN, TOLERANCE};
pub use metrics::{capital_recovery_factor, evaluate, npv_at_rate, EvaluationResult};
pub use sensitivity::{default_rate_grid, npv_profile};
