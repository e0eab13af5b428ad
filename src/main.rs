//! Elder-care planner CLI
//!
//! Runs the three care plans for an input document (or the stock values) and
//! prints the five-year snapshots side by side.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

use eldercare_planner::input::load_input;
use eldercare_planner::projection::MonthRow;
use eldercare_planner::{PlannerInput, PlannerReport, ProjectionConfig, ScenarioRunner};

/// Compare elder-care plans over a 15-year horizon
#[derive(Parser)]
#[command(name = "eldercare-planner", version, about)]
struct Cli {
    /// JSON input document; stock values are used when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Also write every projected month of every scenario to this CSV file
    #[arg(long)]
    monthly_csv: Option<PathBuf>,

    /// Run even if the input fails validation
    #[arg(long)]
    allow_invalid: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Flat snapshot record for CSV output
#[derive(Serialize)]
struct SnapshotRecord<'a> {
    scenario: &'a str,
    year: u32,
    total_wealth: f64,
    combined_home_value: f64,
    combined_liquid: f64,
    care_debt: f64,
    cumulative_cash_flow: f64,
    annualized_care_cost: f64,
}

/// Monthly row tagged with its scenario
#[derive(Serialize)]
struct MonthRecord<'a> {
    scenario: &'a str,
    month: u32,
    income: f64,
    rental_income: f64,
    expenses: f64,
    care_cost: f64,
    debt_service: f64,
    net_cash_flow: f64,
    cumulative_cash_flow: f64,
    gen1_liquid: f64,
    gen2_liquid: f64,
    combined_home_value: f64,
    care_debt: f64,
    total_wealth: f64,
}

impl<'a> MonthRecord<'a> {
    fn new(scenario: &'a str, row: &MonthRow) -> Self {
        Self {
            scenario,
            month: row.month,
            income: row.income,
            rental_income: row.rental_income,
            expenses: row.expenses,
            care_cost: row.care_cost,
            debt_service: row.debt_service,
            net_cash_flow: row.net_cash_flow,
            cumulative_cash_flow: row.cumulative_cash_flow,
            gen1_liquid: row.gen1_liquid,
            gen2_liquid: row.gen2_liquid,
            combined_home_value: row.combined_home_value,
            care_debt: row.care_debt,
            total_wealth: row.total_wealth,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let input = match &cli.config {
        Some(path) => load_input(path)
            .with_context(|| format!("failed to load input from {}", path.display()))?,
        None => PlannerInput::default(),
    };

    if let Err(err) = input.validate() {
        if !cli.allow_invalid {
            return Err(err).context("input failed validation (pass --allow-invalid to run anyway)");
        }
        log::warn!("Running on invalid input: {}", err);
    }

    let runner = ScenarioRunner::new(input.clone());
    let report = runner.run_all();

    match cli.format {
        OutputFormat::Table => print_table(&input, &report),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Csv => write_snapshot_csv(&report)?,
    }

    if let Some(path) = &cli.monthly_csv {
        let detailed = ScenarioRunner::with_config(
            input,
            ProjectionConfig {
                detailed_output: true,
                ..Default::default()
            },
        );
        let report = detailed.run_all();
        write_monthly_csv(path, &report)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Monthly detail written to: {}", path.display());
    }

    Ok(())
}

fn print_table(input: &PlannerInput, report: &PlannerReport) {
    println!("Elder Care Financial Planner");
    println!("============================\n");

    let care = &input.assumptions.care;
    for result in &report.results {
        let spec = &result.spec;
        println!(
            "{} ({} Gen1 home)",
            spec.kind.label(),
            if spec.rent_gen1_home { "keep & rent" } else { "sell" }
        );
        println!(
            "{:>5} {:>14} {:>14} {:>14} {:>12} {:>14} {:>12}  {}",
            "Year", "Wealth", "Homes", "Liquid", "CareDebt", "CumCashFlow", "CareCost", "Care"
        );
        println!("{}", "-".repeat(120));
        for snap in &result.snapshots {
            let start = snap.year.saturating_sub(4).max(1);
            println!(
                "{:>5} {:>14.0} {:>14.0} {:>14.0} {:>12.0} {:>14.0} {:>12.0}  {}",
                snap.year,
                snap.total_wealth,
                snap.combined_home_value,
                snap.combined_liquid,
                snap.care_debt,
                snap.cumulative_cash_flow,
                snap.annualized_care_cost,
                care.tier_labels_between(start, snap.year),
            );
        }
        println!();
    }

    println!("Total wealth vs. care facility:");
    for row in &report.comparison {
        let cells: Vec<String> = row
            .entries
            .iter()
            .map(|e| format!("{} {:.0} ({:+.0})", e.kind.label(), e.total_wealth, e.vs_facility))
            .collect();
        println!("  Year {:>2}: {}", row.year, cells.join(" | "));
    }

    if !report.care_debt_warnings.is_empty() {
        println!("\nCare debt warning:");
        for w in &report.care_debt_warnings {
            println!(
                "  {}: care debt reaches ${:.0} by year {}",
                w.kind_label, w.peak_care_debt, w.first_year
            );
        }
    }

    let f = &report.rebuild_financing;
    println!("\nSell & rebuild financing:");
    println!("  Gen2 sale proceeds: ${:.0}", f.gen2_sale_proceeds);
    println!("  Gen1 sale proceeds: ${:.0}", f.gen1_sale_proceeds);
    println!("  Total proceeds:     ${:.0}", f.total_proceeds);
    println!(
        "  Down payment ({:.1}%): ${:.0}",
        f.effective_down_payment_percent, f.down_payment_amount
    );
    println!("  Mortgage:           ${:.0}", f.mortgage_principal);
    println!("  Excess to liquid:   ${:.0}", f.excess_liquid);

    let rental = input.assumptions.rental.static_breakdown(input.gen1.real_estate_value);
    println!("\nGen1 rental breakdown (today's dollars):");
    println!("  Gross annual rent:  ${:.0}", rental.gross_annual);
    println!("  Effective rent:     ${:.0}", rental.effective_annual);
    println!("  Management fee:    -${:.0}", rental.management_fee);
    println!("  Tax & insurance:   -${:.0}", rental.tax_insurance);
    println!("  Maintenance:       -${:.0}", rental.maintenance);
    println!("  Net annual income:  ${:.0}", rental.net_annual);
}

fn write_snapshot_csv(report: &PlannerReport) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout().lock());
    for result in &report.results {
        for snap in &result.snapshots {
            wtr.serialize(SnapshotRecord {
                scenario: result.spec.kind.label(),
                year: snap.year,
                total_wealth: snap.total_wealth,
                combined_home_value: snap.combined_home_value,
                combined_liquid: snap.combined_liquid,
                care_debt: snap.care_debt,
                cumulative_cash_flow: snap.cumulative_cash_flow,
                annualized_care_cost: snap.annualized_care_cost,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

fn write_monthly_csv(path: &Path, report: &PlannerReport) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for result in &report.results {
        for row in &result.months {
            wtr.serialize(MonthRecord::new(result.spec.kind.label(), row))?;
        }
    }
    wtr.flush()?;
    Ok(())
}
