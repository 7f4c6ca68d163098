//! Project record matching the persisted flat-list format

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::project::builder::{BuiltFlows, FlowEntry};

/// A single capital-investment project
///
/// Immutable once built. The cash-flow vector holds one entry per period
/// 1..=useful_life; the last entry has already absorbed any salvage value.
/// Invariant: `useful_life == cash_flows.len()` and `useful_life >= 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier (creation-time timestamp in milliseconds; the
    /// portfolio bumps it on collision)
    pub id: i64,

    /// Display name, unique case-insensitively among active projects
    pub name: String,

    /// Initial outlay at time 0, strictly positive
    pub investment: f64,

    /// Net cash flow per period, positive = income, negative = cost
    pub cash_flows: Vec<f64>,

    /// Number of periods, equal to `cash_flows.len()`
    pub useful_life: u32,
}

impl Project {
    /// Build a project from validated general fields and a flow entry mode
    ///
    /// The id is stamped from the current wall clock. Name uniqueness is the
    /// portfolio's concern, not checked here.
    pub fn new(name: &str, investment: f64, entry: &FlowEntry) -> Result<(Self, BuiltFlows), ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if investment <= 0.0 {
            return Err(ValidationError::NonPositiveInvestment(investment));
        }

        let built = entry.build()?;
        let project = Self {
            id: chrono::Utc::now().timestamp_millis(),
            name: name.to_string(),
            investment,
            cash_flows: built.cash_flows.clone(),
            useful_life: built.useful_life,
        };
        Ok((project, built))
    }

    /// Check the structural invariant of a record loaded from storage
    pub fn is_consistent(&self) -> bool {
        self.useful_life >= 1
            && self.useful_life as usize == self.cash_flows.len()
            && !self.name.trim().is_empty()
            && self.investment > 0.0
    }

    /// Undiscounted sum of all cash flows minus the investment
    ///
    /// Equals NPV at a 0% rate; handy for sanity checks and display.
    pub fn net_undiscounted(&self) -> f64 {
        self.cash_flows.iter().sum::<f64>() - self.investment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_stamps_fields() {
        let entry = FlowEntry::Constant {
            useful_life: 3,
            annual_flow: 500.0,
            salvage_value: 0.0,
        };
        let (p, built) = Project::new("  Plant A  ", 1000.0, &entry).unwrap();
        assert_eq!(p.name, "Plant A");
        assert_eq!(p.useful_life, 3);
        assert_eq!(p.cash_flows, vec![500.0, 500.0, 500.0]);
        assert_eq!(built.dropped_tokens, 0);
        assert!(p.is_consistent());
        assert!(p.id > 0);
    }

    #[test]
    fn test_rejects_empty_name_and_bad_investment() {
        let entry = FlowEntry::Constant {
            useful_life: 1,
            annual_flow: 100.0,
            salvage_value: 0.0,
        };
        assert_eq!(
            Project::new("   ", 1000.0, &entry).unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            Project::new("X", 0.0, &entry).unwrap_err(),
            ValidationError::NonPositiveInvestment(0.0)
        );
        assert_eq!(
            Project::new("X", -5.0, &entry).unwrap_err(),
            ValidationError::NonPositiveInvestment(-5.0)
        );
    }

    #[test]
    fn test_net_undiscounted() {
        let entry = FlowEntry::Constant {
            useful_life: 4,
            annual_flow: 300.0,
            salvage_value: 100.0,
        };
        let (p, _) = Project::new("B", 1000.0, &entry).unwrap();
        assert!((p.net_undiscounted() - 300.0).abs() < 1e-10);
    }

    #[test]
    fn test_persisted_layout_is_camel_case() {
        let p = Project {
            id: 42,
            name: "Mill".to_string(),
            investment: 1000.0,
            cash_flows: vec![500.0, 600.0],
            useful_life: 2,
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"cashFlows\""));
        assert!(json.contains("\"usefulLife\""));

        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, 42);
        assert_eq!(back.cash_flows, p.cash_flows);
        assert!(back.is_consistent());
    }
}
