//! Command line EMI calculator
//!
//! Solves for the monthly installment or the tenure and prints the amortization schedule

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use emi_calculator::{
    format, CalculationMode, CalculationReport, CalculationRequest, Calculator, CalculatorConfig,
    ScheduleResult,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "emi_calc", about = "EMI and amortization calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// JSON file with calculator settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write the amortization schedule to this CSV file
    #[arg(long, global = true)]
    schedule: Option<PathBuf>,

    /// Print the full report as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate the monthly installment for a tenure in years
    Installment {
        /// Loan amount
        #[arg(long)]
        principal: f64,
        /// Annual interest rate in percent (8.5 for 8.5%)
        #[arg(long)]
        rate: f64,
        /// Tenure in years
        #[arg(long)]
        tenure_years: u32,
    },
    /// Calculate the tenure for a fixed monthly installment
    Tenure {
        #[arg(long)]
        principal: f64,
        #[arg(long)]
        rate: f64,
        /// Fixed monthly installment
        #[arg(long)]
        payment: f64,
    },
}

impl Command {
    fn request(&self) -> CalculationRequest {
        match *self {
            Command::Installment { principal, rate, tenure_years } => CalculationRequest {
                principal,
                annual_rate_percent: rate,
                mode: CalculationMode::Installment { tenure_years },
            },
            Command::Tenure { principal, rate, payment } => CalculationRequest {
                principal,
                annual_rate_percent: rate,
                mode: CalculationMode::Tenure { payment },
            },
        }
    }
}

/// Schedule row as displayed, amounts fixed to two decimals
#[derive(Debug, Serialize)]
struct ScheduleRecord {
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "EMI")]
    emi: String,
    #[serde(rename = "Principal Paid")]
    principal_paid: String,
    #[serde(rename = "Interest Paid")]
    interest_paid: String,
    #[serde(rename = "Remaining Balance")]
    remaining_balance: String,
}

fn records(schedule: &ScheduleResult) -> Vec<ScheduleRecord> {
    schedule
        .rows
        .iter()
        .map(|row| ScheduleRecord {
            month: row.period_index,
            emi: format!("{:.2}", row.payment),
            principal_paid: format!("{:.2}", row.principal_portion),
            interest_paid: format!("{:.2}", row.interest_portion),
            remaining_balance: format!("{:.2}", row.remaining_balance),
        })
        .collect()
}

fn write_schedule_csv(path: &Path, schedule: &ScheduleResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for record in records(schedule) {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_text(report: &CalculationReport) {
    println!("{}", report.message);
    if report.schedule.is_empty() {
        return;
    }

    println!();
    println!("{:>5} | {:>14} | {:>14} | {:>14} | {:>16}",
             "Month", "EMI", "Principal Paid", "Interest Paid", "Remaining Balance");
    for row in &report.schedule.rows {
        println!("{:>5} | {:>14} | {:>14} | {:>14} | {:>16}",
                 row.period_index,
                 format::money(row.payment),
                 format::money(row.principal_portion),
                 format::money(row.interest_portion),
                 format::money(row.remaining_balance));
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CalculatorConfig::from_json_file(path)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => CalculatorConfig::default(),
    };
    let calculator = Calculator::new(config);

    let request = cli.command.request();
    log::info!("calculating {:?}", request);
    let report = calculator.report(&request);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&report);
    }

    if let Some(path) = &cli.schedule {
        if !report.schedule.is_empty() {
            write_schedule_csv(path, &report.schedule)?;
            log::info!("schedule written to {}", path.display());
        }
    }

    if report.failed {
        std::process::exit(1);
    }
    Ok(())
}
