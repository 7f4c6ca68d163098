//! NPV sensitivity profile over a grid of discount rates
//!
//! Feeds graphing/comparison collaborators: each project's NPV is sampled at
//! a fixed set of rates so curves can be drawn or tabulated side by side.

use crate::evaluation::metrics::npv_at_rate;
use crate::project::Project;

/// Default sampling grid in percent: 0%, 5%, ..., 50%
pub fn default_rate_grid() -> Vec<f64> {
    (0..=10).map(|step| step as f64 * 5.0).collect()
}

/// Sample the NPV of `project` at each rate (percent) in `rates`
///
/// Returns `(rate_percent, npv)` pairs in grid order.
pub fn npv_profile(project: &Project, rates: &[f64]) -> Vec<(f64, f64)> {
    rates
        .iter()
        .map(|&r| (r, npv_at_rate(project, r)))
        .collect()
}
