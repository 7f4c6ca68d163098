//! Project records and cash-flow construction

pub mod builder;
mod data;
pub mod loader;

pub use builder::{build_constant, build_variable, BuiltFlows, FlowEntry, MAX_USEFUL_LIFE};
pub use data::Project;
pub use loader::{load_portfolio_csv, load_portfolio_json, save_portfolio_json};
