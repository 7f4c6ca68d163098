//! Project evaluator CLI
//!
//! Loads a project portfolio (JSON or CSV), evaluates every project at the
//! given discount rate, prints the comparison table with the best option
//! marked, and optionally writes a CSV report or the NPV sensitivity profile.

use anyhow::{bail, Context, Result};
use clap::Parser;
use econ_evaluator::evaluation::{default_rate_grid, npv_profile};
use econ_evaluator::portfolio::Portfolio;
use econ_evaluator::project::{load_portfolio_csv, load_portfolio_json};
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "econ_evaluator", version, about = "Evaluate competing capital-investment projects")]
struct Args {
    /// Portfolio file: a JSON record list or a CSV import (by extension)
    projects: PathBuf,

    /// Discount rate (TMAR) in percent
    #[arg(short, long, default_value_t = 10.0)]
    rate: f64,

    /// Write the evaluation table to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print the NPV sensitivity profile (0%..50% in 5% steps)
    #[arg(long)]
    sensitivity: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !args.rate.is_finite() || args.rate < 0.0 {
        bail!("discount rate must be a non-negative percentage, got {}", args.rate);
    }

    let portfolio = load_portfolio(&args.projects)
        .with_context(|| format!("failed to load portfolio from {}", args.projects.display()))?;

    if portfolio.is_empty() {
        println!("No projects registered in {}.", args.projects.display());
        return Ok(());
    }

    let evaluations = portfolio.evaluate_all(args.rate);
    let winner = Portfolio::best_project(&evaluations);

    println!("Project Evaluation Report");
    println!("Date: {}  TMAR: {:.2}%", chrono::Local::now().format("%Y-%m-%d"), args.rate);
    println!();
    println!(
        "{:<24} {:>14} {:>6} {:>14} {:>14} {:>10} {:>8}",
        "Project", "Investment", "Life", "NPV", "EAV", "IRR", "B/C"
    );
    println!("{}", "-".repeat(96));

    for eval in &evaluations {
        let mark = if winner == Some(eval.id) { " *" } else { "" };
        println!(
            "{:<24} {:>14.2} {:>6} {:>14.2} {:>14.2} {:>10} {:>8.2}{}",
            eval.name,
            eval.investment,
            eval.useful_life,
            eval.result.npv,
            eval.result.eav,
            eval.result.irr.to_string(),
            eval.result.bc_ratio,
            mark,
        );
    }

    match winner.and_then(|id| evaluations.iter().find(|e| e.id == id)) {
        Some(best) => println!("\nBest option at {:.2}%: {} (NPV {:.2})", args.rate, best.name, best.result.npv),
        None => println!("\nNo project has a positive NPV at {:.2}%.", args.rate),
    }

    if args.sensitivity {
        print_sensitivity(&portfolio);
    }

    if let Some(path) = &args.csv {
        write_report_csv(&evaluations, args.rate, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!("\nReport written to: {}", path.display());
    }

    Ok(())
}

fn load_portfolio(path: &PathBuf) -> Result<Portfolio> {
    let loaded = match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_portfolio_csv(path),
        _ => load_portfolio_json(path),
    };
    loaded.map_err(|e| anyhow::anyhow!("{e}"))
}

fn print_sensitivity(portfolio: &Portfolio) {
    let grid = default_rate_grid();

    println!("\nNPV Sensitivity");
    print!("{:<24}", "Project");
    for rate in &grid {
        print!(" {:>10}", format!("{}%", rate));
    }
    println!();

    for project in portfolio.iter() {
        print!("{:<24}", project.name);
        for (_, npv) in npv_profile(project, &grid) {
            print!(" {:>10.2}", npv);
        }
        println!();
    }
}

fn write_report_csv(
    evaluations: &[econ_evaluator::ProjectEvaluation],
    rate: f64,
    path: &PathBuf,
) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "# TMAR: {:.2}%  Date: {}", rate, chrono::Local::now().format("%Y-%m-%d"))?;
    writeln!(file, "Id,Name,Investment,UsefulLife,NPV,EAV,IRR,BC")?;
    for eval in evaluations {
        writeln!(
            file,
            "{},{},{:.2},{},{:.2},{:.2},{},{:.4}",
            eval.id,
            eval.name,
            eval.investment,
            eval.useful_life,
            eval.result.npv,
            eval.result.eav,
            eval.result.irr,
            eval.result.bc_ratio,
        )?;
    }
    Ok(())
}
