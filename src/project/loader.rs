//! Portfolio persistence: JSON save/load plus CSV import
//!
//! The JSON layout is the flat record list `{id, name, investment,
//! cashFlows[], usefulLife}` — derived metrics are never persisted, they are
//! recomputed from the current rate. CSV import feeds each row's flow text
//! through the variable-flow builder, so the lenient-parse policy applies.

use std::error::Error;
use std::fs;
use std::path::Path;

use csv::Reader;

use crate::portfolio::Portfolio;
use crate::project::builder::FlowEntry;
use crate::project::data::Project;

/// Load a portfolio from a JSON record list
///
/// A missing file is an empty portfolio, matching a first-run session.
pub fn load_portfolio_json<P: AsRef<Path>>(path: P) -> Result<Portfolio, Box<dyn Error>> {
    if !path.as_ref().exists() {
        return Ok(Portfolio::new());
    }
    let data = fs::read_to_string(path)?;
    let records: Vec<Project> = serde_json::from_str(&data)?;
    Ok(Portfolio::from_records(records)?)
}

/// Persist the portfolio as a pretty-printed JSON record list
pub fn save_portfolio_json<P: AsRef<Path>>(portfolio: &Portfolio, path: P) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(portfolio)?;
    fs::write(path, json)?;
    Ok(())
}

/// Raw CSV row: `Name,Investment,Flows,Salvage` with `Flows` a
/// comma-free delimited token list (semicolons between periods)
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Investment")]
    investment: f64,
    #[serde(rename = "Flows")]
    flows: String,
    #[serde(rename = "Salvage", default)]
    salvage: f64,
}

/// Import projects from a CSV file into a fresh portfolio
///
/// Flow tokens are separated by `;` within the cell and normalized to the
/// builder's comma-delimited form.
pub fn load_portfolio_csv<P: AsRef<Path>>(path: P) -> Result<Portfolio, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    portfolio_from_csv(reader)
}

/// Import projects from any reader (e.g., string buffer)
pub fn load_portfolio_csv_from_reader<R: std::io::Read>(reader: R) -> Result<Portfolio, Box<dyn Error>> {
    portfolio_from_csv(Reader::from_reader(reader))
}

fn portfolio_from_csv<R: std::io::Read>(mut reader: Reader<R>) -> Result<Portfolio, Box<dyn Error>> {
    let mut portfolio = Portfolio::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        let entry = FlowEntry::Variable {
            raw_flows: row.flows.replace(';', ","),
            salvage_value: row.salvage,
        };
        let (_, dropped) = portfolio.add_project(&row.name, row.investment, &entry)?;
        if dropped > 0 {
            log::warn!(
                "CSV import: project \"{}\" had {} unparseable flow token(s)",
                row.name.trim(),
                dropped
            );
        }
    }

    Ok(portfolio)
}
