//! Financial indicator calculations: NPV, EAV, B/C, and the combined
//! evaluation entry point
//!
//! The evaluator is a pure function of (project, rate): it holds no state,
//! never mutates its inputs, and re-evaluation with identical inputs yields
//! identical outputs.

use serde::{Deserialize, Serialize};

use crate::evaluation::irr::{self, Irr};
use crate::project::Project;

/// Derived indicators for one project at one discount rate
///
/// Never persisted; recomputed from the current rate on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Net present value at the given rate
    pub npv: f64,
    /// Equivalent uniform annual value over the useful life
    pub eav: f64,
    /// Internal rate of return (percent), or not determinable
    pub irr: Irr,
    /// Present value of positive flows over the initial investment
    pub bc_ratio: f64,
}

/// Compute all indicators for `project` at `rate_percent` (the TMAR)
///
/// Purely numerical edge cases never escape as errors: a zero investment
/// guards B/C to 0, a zero life guards EAV to 0, and IRR indeterminacy is
/// carried as a tagged value alongside the valid NPV/EAV/B/C.
pub fn evaluate(project: &Project, rate_percent: f64) -> EvaluationResult {
    let i = rate_percent / 100.0;

    // NPV and the PV of strictly positive flows in one pass
    let mut npv = -project.investment;
    let mut pv_income = 0.0;
    for (t, &f) in project.cash_flows.iter().enumerate() {
        let factor = (1.0 + i).powi(t as i32 + 1);
        npv += f / factor;
        if f > 0.0 {
            pv_income += f / factor;
        }
    }

    let bc_ratio = if project.investment > 0.0 {
        pv_income / project.investment
    } else {
        log::warn!(
            "project {} has non-positive investment; B/C guarded to 0",
            project.id
        );
        0.0
    };

    let eav = equivalent_annual_value(npv, i, project.useful_life);
    let irr = irr::solve(project.investment, &project.cash_flows);

    EvaluationResult {
        npv,
        eav,
        irr,
        bc_ratio,
    }
}

/// NPV of `project` at an arbitrary rate in percent
///
/// Exposed independently of `evaluate` so sensitivity collaborators can
/// sample the NPV curve at a grid of rates without re-running the IRR solve.
pub fn npv_at_rate(project: &Project, rate_percent: f64) -> f64 {
    let i = rate_percent / 100.0;
    let mut npv = -project.investment;
    for (t, &f) in project.cash_flows.iter().enumerate() {
        npv += f / (1.0 + i).powi(t as i32 + 1);
    }
    npv
}

/// Spread `npv` uniformly over `n` periods at decimal rate `i`
///
/// At a zero rate the capital-recovery factor is undefined and the limit
/// `npv / n` applies. A zero life is a degenerate input guarded to 0.
fn equivalent_annual_value(npv: f64, i: f64, n: u32) -> f64 {
    if n == 0 {
        log::warn!("zero useful life; EAV guarded to 0");
        return 0.0;
    }
    if i == 0.0 {
        return npv / n as f64;
    }
    npv * capital_recovery_factor(i, n)
}

/// Capital-recovery factor `i(1+i)^n / ((1+i)^n - 1)`
///
/// Converts a present value into the equivalent uniform annuity over `n`
/// periods. Caller guarantees `i != 0`.
pub fn capital_recovery_factor(i: f64, n: u32) -> f64 {
    let growth = (1.0 + i).powi(n as i32);
    (i * growth) / (growth - 1.0)
}
