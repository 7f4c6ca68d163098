//! Internal Rate of Return (IRR) via Newton-Raphson
//!
//! Unconstrained Newton-Raphson on a rational function with multiple poles
//! can converge numerically to a meaningless or out-of-domain root. The
//! solver therefore carries explicit guards (singularity, flat derivative,
//! divergence, domain clamp) and a residual verification pass on
//! convergence, turning silent wrong answers into an explicit
//! "not determinable" outcome.

use serde::{Deserialize, Serialize};

/// Maximum Newton-Raphson iterations per solve
pub const MAX_ITERATIONS: usize = 1000;

/// Convergence tolerance on the successive-iterate difference
pub const TOLERANCE: f64 = 1e-5;

/// Lower bound of the economically valid rate domain (rate > -100%)
pub const RATE_MIN: f64 = -0.999;

/// Upper bound of the economically valid rate domain (1000%; beyond that the
/// root is economically unreal)
pub const RATE_MAX: f64 = 10.0;

/// Initial guess for the iteration (10%)
const INITIAL_GUESS: f64 = 0.10;

/// Absolute currency-unit residual above which a converged iterate is
/// rejected as a false root
const RESIDUAL_LIMIT: f64 = 1.0;

/// Why an IRR solve could not establish a rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndeterminateReason {
    /// The discount base `1 + r` approached zero during evaluation
    Singularity,
    /// Derivative near zero (inflection point or flat flow pattern)
    FlatDerivative,
    /// Iterate became infinite or NaN
    Diverged,
    /// Iterate left the economically valid domain [-99.9%, 1000%]
    OutOfRange,
    /// Iterates converged but the NPV residual at the root exceeded 1
    /// currency unit
    FalseConvergence,
    /// Iteration budget exhausted without convergence
    IterationLimit,
}

/// Tagged IRR outcome
///
/// `Converged` carries the rate as a percentage rounded to 2 decimal places.
/// Indeterminacy is data, not an error: the other metrics of an evaluation
/// stay valid alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Irr {
    Converged(f64),
    Indeterminate(IndeterminateReason),
}

impl Irr {
    /// The rate in percent, if one was established
    pub fn value(&self) -> Option<f64> {
        match self {
            Irr::Converged(pct) => Some(*pct),
            Irr::Indeterminate(_) => None,
        }
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, Irr::Converged(_))
    }
}

impl std::fmt::Display for Irr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Irr::Converged(pct) => write!(f, "{:.2}%", pct),
            Irr::Indeterminate(_) => write!(f, "N/A"),
        }
    }
}

/// Solve for the IRR of a project given its initial outlay and per-period
/// net cash flows (period 1 first)
///
/// Stateless: each call runs an independent iteration sequence from the same
/// initial guess.
pub fn solve(investment: f64, cash_flows: &[f64]) -> Irr {
    let mut x0 = INITIAL_GUESS;

    for _ in 0..MAX_ITERATIONS {
        let (f, df) = match npv_and_derivative(investment, cash_flows, x0) {
            Some(pair) => pair,
            None => return indeterminate(IndeterminateReason::Singularity),
        };

        if df.abs() < 1e-9 {
            return indeterminate(IndeterminateReason::FlatDerivative);
        }

        let x1 = x0 - f / df;

        if !x1.is_finite() {
            return indeterminate(IndeterminateReason::Diverged);
        }
        if !(RATE_MIN..=RATE_MAX).contains(&x1) {
            return indeterminate(IndeterminateReason::OutOfRange);
        }

        if (x1 - x0).abs() < TOLERANCE {
            // Verification pass: confirm x1 really is a root of the
            // original flows before reporting it
            let residual = npv_at(investment, cash_flows, x1);
            if residual.abs() > RESIDUAL_LIMIT {
                return indeterminate(IndeterminateReason::FalseConvergence);
            }
            return Irr::Converged(round2(x1 * 100.0));
        }

        x0 = x1;
    }

    indeterminate(IndeterminateReason::IterationLimit)
}

/// NPV and its derivative with respect to the rate, at rate `r`
///
/// Returns None when the discount base `1 + r` is too close to zero to
/// evaluate (mathematical singularity).
fn npv_and_derivative(investment: f64, cash_flows: &[f64], r: f64) -> Option<(f64, f64)> {
    let base = 1.0 + r;
    if base.abs() < 1e-9 {
        return None;
    }

    let mut f = -investment;
    let mut df = 0.0;
    for (t, &cf) in cash_flows.iter().enumerate() {
        f += cf / base.powi(t as i32 + 1);
        df -= (t as f64 + 1.0) * cf / base.powi(t as i32 + 2);
    }
    Some((f, df))
}

/// NPV of the flows at a decimal rate `r` (verification pass)
fn npv_at(investment: f64, cash_flows: &[f64], r: f64) -> f64 {
    let base = 1.0 + r;
    let mut v = -investment;
    for (t, &cf) in cash_flows.iter().enumerate() {
        v += cf / base.powi(t as i32 + 1);
    }
    v
}

fn indeterminate(reason: IndeterminateReason) -> Irr {
    log::debug!("IRR solve indeterminate: {:?}", reason);
    Irr::Indeterminate(reason)
}

fn round2(pct: f64) -> f64 {
    (pct * 100.0).round() / 100.0
}
