//! Ordered, caller-owned project collection
//!
//! The collection owns entry validation (name uniqueness, positive
//! investment) and id assignment; the evaluation engine stays pure and
//! stateless. Insertion order is display order. Metrics are a projection of
//! (portfolio, rate) recomputed on demand, never stored on the records.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::evaluation::{self, EvaluationResult};
use crate::project::{FlowEntry, Project};

/// One project's metrics within a batch evaluation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEvaluation {
    pub id: i64,
    pub name: String,
    pub investment: f64,
    pub useful_life: u32,
    pub result: EvaluationResult,
}

/// Ordered collection of active projects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Portfolio {
    projects: Vec<Project>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-loaded record list, rejecting structurally broken
    /// records (useful life / flow length mismatch, empty name)
    pub fn from_records(projects: Vec<Project>) -> Result<Self, ValidationError> {
        for p in &projects {
            if p.name.trim().is_empty() {
                return Err(ValidationError::EmptyName);
            }
            if p.investment <= 0.0 {
                return Err(ValidationError::NonPositiveInvestment(p.investment));
            }
            if !p.is_consistent() {
                return Err(ValidationError::ZeroUsefulLife);
            }
        }
        Ok(Self { projects })
    }

    /// Validate, build, and append a new project
    ///
    /// Returns the assigned id plus the count of tokens the lenient
    /// variable-flow parse dropped, so the caller can warn without failing.
    /// No state is mutated when validation fails.
    pub fn add_project(
        &mut self,
        name: &str,
        investment: f64,
        entry: &FlowEntry,
    ) -> Result<(i64, usize), ValidationError> {
        let trimmed = name.trim();
        if self.contains_name(trimmed) {
            return Err(ValidationError::DuplicateName(trimmed.to_string()));
        }

        let (mut project, built) = Project::new(trimmed, investment, entry)?;

        // Timestamp ids can collide within a millisecond; bump forward
        while self.projects.iter().any(|p| p.id == project.id) {
            project.id += 1;
        }

        let id = project.id;
        self.projects.push(project);
        Ok((id, built.dropped_tokens))
    }

    /// Case-insensitive name lookup among active projects
    pub fn contains_name(&self, name: &str) -> bool {
        self.projects
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Remove one project by id; false when no such id exists
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        self.projects.len() < before
    }

    /// Drop every project
    pub fn clear(&mut self) {
        self.projects.clear();
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter()
    }

    pub fn get(&self, id: i64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Evaluate every project at `rate_percent`, in insertion order
    ///
    /// Never aborts on a degenerate project: guarded fallbacks and the IRR
    /// sentinel keep each row valid.
    pub fn evaluate_all(&self, rate_percent: f64) -> Vec<ProjectEvaluation> {
        self.projects
            .iter()
            .map(|p| ProjectEvaluation {
                id: p.id,
                name: p.name.clone(),
                investment: p.investment,
                useful_life: p.useful_life,
                result: evaluation::evaluate(p, rate_percent),
            })
            .collect()
    }

    /// Winner rule: the project with the highest NPV, and only when that NPV
    /// is strictly positive — a portfolio where everything destroys value
    /// has no recommendation
    pub fn best_project(evaluations: &[ProjectEvaluation]) -> Option<i64> {
        evaluations
            .iter()
            .max_by(|a, b| a.result.npv.total_cmp(&b.result.npv))
            .filter(|best| best.result.npv > 0.0)
            .map(|best| best.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constant(n: u32, flow: f64) -> FlowEntry {
        FlowEntry::Constant {
            useful_life: n,
            annual_flow: flow,
            salvage_value: 0.0,
        }
    }

    #[test]
    fn test_add_assigns_unique_ids_in_order() {
        let mut pf = Portfolio::new();
        let (id_a, _) = pf.add_project("A", 1000.0, &constant(3, 500.0)).unwrap();
        let (id_b, _) = pf.add_project("B", 2000.0, &constant(4, 800.0)).unwrap();
        assert_ne!(id_a, id_b);
        assert_eq!(pf.len(), 2);

        let names: Vec<_> = pf.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_duplicate_name_is_case_insensitive() {
        let mut pf = Portfolio::new();
        pf.add_project("Bridge", 1000.0, &constant(3, 500.0)).unwrap();
        let err = pf
            .add_project("  bRiDgE ", 900.0, &constant(2, 400.0))
            .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateName("bRiDgE".to_string()));
        // Failed add must not mutate
        assert_eq!(pf.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut pf = Portfolio::new();
        let (id_a, _) = pf.add_project("A", 1000.0, &constant(3, 500.0)).unwrap();
        pf.add_project("B", 2000.0, &constant(4, 800.0)).unwrap();
        pf.add_project("C", 1500.0, &constant(2, 900.0)).unwrap();

        assert!(pf.remove(id_a));
        assert!(!pf.remove(id_a));
        let names: Vec<_> = pf.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);

        // Removal frees the name for reuse
        assert!(pf.add_project("a", 100.0, &constant(1, 50.0)).is_ok());

        pf.clear();
        assert!(pf.is_empty());
    }

    #[test]
    fn test_evaluate_all_and_winner() {
        let mut pf = Portfolio::new();
        let (good, _) = pf.add_project("Good", 1000.0, &constant(3, 500.0)).unwrap();
        pf.add_project("Bad", 1000.0, &constant(3, 100.0)).unwrap();

        let evals = pf.evaluate_all(10.0);
        assert_eq!(evals.len(), 2);
        assert_eq!(Portfolio::best_project(&evals), Some(good));
    }

    #[test]
    fn test_no_winner_when_all_npv_nonpositive() {
        let mut pf = Portfolio::new();
        pf.add_project("Sink", 1000.0, &constant(3, 100.0)).unwrap();
        let evals = pf.evaluate_all(10.0);
        assert!(evals[0].result.npv < 0.0);
        assert_eq!(Portfolio::best_project(&evals), None);
    }

    #[test]
    fn test_from_records_rejects_inconsistent_record() {
        let broken = Project {
            id: 1,
            name: "X".to_string(),
            investment: 100.0,
            cash_flows: vec![10.0, 20.0],
            useful_life: 3, // does not match flow count
        };
        assert!(Portfolio::from_records(vec![broken]).is_err());
    }

    #[test]
    fn test_batch_survives_indeterminate_irr() {
        let mut pf = Portfolio::new();
        pf.add_project("Loss", 1000.0, &constant(3, -200.0)).unwrap();
        pf.add_project("Gain", 1000.0, &constant(3, 600.0)).unwrap();

        let evals = pf.evaluate_all(10.0);
        assert!(!evals[0].result.irr.is_converged());
        assert!(evals[1].result.irr.is_converged());
    }
}
