//! Cash-flow vector construction from raw entry-mode input
//!
//! Two mutually exclusive modes:
//! - constant annuity: n equal flows, salvage folded into the last one
//! - variable flows: comma-delimited text, leniently parsed
//!
//! Lenient-parse policy: tokens that fail to parse are dropped rather than
//! aborting entry, and the drop count is surfaced so callers can warn the
//! user without hard-failing.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Maximum accepted useful life in periods for constant-annuity entry
pub const MAX_USEFUL_LIFE: u32 = 100;

/// Raw entry-mode input, as captured at the boundary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FlowEntry {
    /// Equal flow every period, optional salvage recovered in the last one
    Constant {
        useful_life: u32,
        annual_flow: f64,
        #[serde(default)]
        salvage_value: f64,
    },
    /// Explicit per-period flows as comma-separated text
    Variable {
        raw_flows: String,
        #[serde(default)]
        salvage_value: f64,
    },
}

/// Normalized output of a build: the flow vector plus entry diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltFlows {
    pub cash_flows: Vec<f64>,
    pub useful_life: u32,
    /// Tokens discarded by the lenient variable-flow parse (always 0 for
    /// constant-annuity entry)
    pub dropped_tokens: usize,
}

impl FlowEntry {
    /// Normalize this entry into a cash-flow vector and useful life
    pub fn build(&self) -> Result<BuiltFlows, ValidationError> {
        match self {
            FlowEntry::Constant {
                useful_life,
                annual_flow,
                salvage_value,
            } => build_constant(*useful_life, *annual_flow, *salvage_value),
            FlowEntry::Variable {
                raw_flows,
                salvage_value,
            } => build_variable(raw_flows, *salvage_value),
        }
    }
}

/// Constant-annuity mode: `n` periods of `annual_flow`, salvage added to the
/// last period (not a separate one)
pub fn build_constant(
    useful_life: u32,
    annual_flow: f64,
    salvage_value: f64,
) -> Result<BuiltFlows, ValidationError> {
    if useful_life == 0 || useful_life > MAX_USEFUL_LIFE {
        return Err(ValidationError::LifeOutOfRange(useful_life));
    }

    let n = useful_life as usize;
    let mut cash_flows = vec![annual_flow; n];
    cash_flows[n - 1] += salvage_value;

    finish(cash_flows, 0)
}

/// Variable-flow mode: split on commas, trim, parse each token as f64, drop
/// tokens that fail to parse (lenient parse), add salvage to the last element
pub fn build_variable(raw_flows: &str, salvage_value: f64) -> Result<BuiltFlows, ValidationError> {
    let tokens: Vec<&str> = raw_flows
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let mut cash_flows = Vec::with_capacity(tokens.len());
    let mut dropped = 0usize;
    for token in &tokens {
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => cash_flows.push(v),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        log::warn!(
            "variable-flow entry dropped {} unparseable token(s) out of {}",
            dropped,
            tokens.len()
        );
    }

    if cash_flows.is_empty() {
        return Err(ValidationError::NoValidFlows);
    }

    if salvage_value != 0.0 {
        let last = cash_flows.len() - 1;
        cash_flows[last] += salvage_value;
    }

    finish(cash_flows, dropped)
}

/// Shared post-condition: a built vector must cover at least one period
fn finish(cash_flows: Vec<f64>, dropped_tokens: usize) -> Result<BuiltFlows, ValidationError> {
    if cash_flows.is_empty() {
        return Err(ValidationError::ZeroUsefulLife);
    }
    Ok(BuiltFlows {
        useful_life: cash_flows.len() as u32,
        cash_flows,
        dropped_tokens,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_annuity_with_salvage() {
        let built = build_constant(5, 1000.0, 500.0).unwrap();
        assert_eq!(built.cash_flows, vec![1000.0, 1000.0, 1000.0, 1000.0, 1500.0]);
        assert_eq!(built.useful_life, 5);
        assert_eq!(built.dropped_tokens, 0);
    }

    #[test]
    fn test_constant_single_period() {
        let built = build_constant(1, 250.0, 50.0).unwrap();
        assert_eq!(built.cash_flows, vec![300.0]);
        assert_eq!(built.useful_life, 1);
    }

    #[test]
    fn test_constant_life_range() {
        assert_eq!(
            build_constant(0, 100.0, 0.0).unwrap_err(),
            ValidationError::LifeOutOfRange(0)
        );
        assert_eq!(
            build_constant(101, 100.0, 0.0).unwrap_err(),
            ValidationError::LifeOutOfRange(101)
        );
        assert!(build_constant(100, 100.0, 0.0).is_ok());
    }

    #[test]
    fn test_variable_lenient_parse_drops_bad_tokens() {
        let built = build_variable("100, abc, 200, 300", 50.0).unwrap();
        assert_eq!(built.cash_flows, vec![100.0, 200.0, 350.0]);
        assert_eq!(built.useful_life, 3);
        assert_eq!(built.dropped_tokens, 1);
    }

    #[test]
    fn test_variable_negative_and_whitespace() {
        let built = build_variable(" -500 ,  1200.5, -30 ", 0.0).unwrap();
        assert_eq!(built.cash_flows, vec![-500.0, 1200.5, -30.0]);
        assert_eq!(built.dropped_tokens, 0);
    }

    #[test]
    fn test_variable_zero_salvage_leaves_last_untouched() {
        let built = build_variable("100,200", 0.0).unwrap();
        assert_eq!(built.cash_flows, vec![100.0, 200.0]);
    }

    #[test]
    fn test_variable_no_valid_flows() {
        assert_eq!(
            build_variable("abc, --, ", 0.0).unwrap_err(),
            ValidationError::NoValidFlows
        );
        assert_eq!(
            build_variable("", 10.0).unwrap_err(),
            ValidationError::NoValidFlows
        );
    }

    #[test]
    fn test_entry_enum_serde_mode_tag() {
        let entry: FlowEntry = serde_json::from_str(
            r#"{"mode":"variable","raw_flows":"10,20","salvage_value":5.0}"#,
        )
        .unwrap();
        let built = entry.build().unwrap();
        assert_eq!(built.cash_flows, vec![10.0, 25.0]);

        // salvage_value defaults to 0 when absent
        let entry: FlowEntry =
            serde_json::from_str(r#"{"mode":"constant","useful_life":2,"annual_flow":7.0}"#)
                .unwrap();
        assert_eq!(entry.build().unwrap().cash_flows, vec![7.0, 7.0]);
    }
}
