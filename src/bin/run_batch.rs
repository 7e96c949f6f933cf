//! Run a batch of loan scenarios from CSV
//!
//! Input columns: id,mode,principal,rate,tenure_years,payment
//! Outputs one summary row per scenario

use anyhow::{bail, Context, Result};
use clap::Parser;
use emi_calculator::{CalculationMode, CalculationRequest, Calculator, CalculatorConfig, LoanError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Evaluate loan scenarios from a CSV file")]
struct Args {
    /// Scenario CSV
    input: PathBuf,

    /// Summary CSV to write
    #[arg(long, default_value = "batch_output.csv")]
    output: PathBuf,

    /// JSON file with calculator settings
    #[arg(long)]
    config: Option<PathBuf>,
}

/// One scenario as read from CSV
#[derive(Debug, Clone, Deserialize)]
struct ScenarioRow {
    id: String,
    mode: String,
    principal: f64,
    rate: f64,
    #[serde(default)]
    tenure_years: Option<u32>,
    #[serde(default)]
    payment: Option<f64>,
}

impl ScenarioRow {
    fn request(&self) -> Result<CalculationRequest, LoanError> {
        let mode = match self.mode.trim().to_ascii_lowercase().as_str() {
            "installment" | "emi" => CalculationMode::Installment {
                tenure_years: self
                    .tenure_years
                    .ok_or_else(|| LoanError::invalid("tenure", "is required for installment mode"))?,
            },
            "tenure" => CalculationMode::Tenure {
                payment: self
                    .payment
                    .ok_or_else(|| LoanError::invalid("payment", "is required for tenure mode"))?,
            },
            other => return Err(LoanError::invalid("mode", format!("unknown calculation type '{}'", other))),
        };
        Ok(CalculationRequest {
            principal: self.principal,
            annual_rate_percent: self.rate,
            mode,
        })
    }
}

/// Summary output row
#[derive(Debug, Clone, Default, Serialize)]
struct SummaryRow {
    id: String,
    mode: String,
    payment: Option<f64>,
    months: Option<f64>,
    total_interest: Option<f64>,
    total_paid: Option<f64>,
    status: String,
}

fn evaluate(calculator: &Calculator, scenario: &ScenarioRow) -> SummaryRow {
    let result = scenario.request().and_then(|request| calculator.calculate(&request));
    match result {
        Ok(calc) => SummaryRow {
            id: scenario.id.clone(),
            mode: scenario.mode.clone(),
            payment: Some(round2(calc.payment)),
            months: Some(round2(calc.period_count)),
            total_interest: Some(round2(calc.schedule.total_interest)),
            total_paid: Some(round2(calc.schedule.total_paid())),
            status: "ok".to_string(),
        },
        Err(err) => {
            log::warn!("scenario {} failed: {}", scenario.id, err);
            SummaryRow {
                id: scenario.id.clone(),
                mode: scenario.mode.clone(),
                status: err.user_message(),
                ..Default::default()
            }
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let config = match &args.config {
        Some(path) => CalculatorConfig::from_json_file(path)?,
        None => CalculatorConfig::default(),
    };
    let calculator = Calculator::new(config);

    println!("Loading scenarios from {}...", args.input.display());
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let scenarios: Vec<ScenarioRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .with_context(|| format!("malformed scenario in {}", args.input.display()))?;
    if scenarios.is_empty() {
        bail!("no scenarios found in {}", args.input.display());
    }
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let calc_start = Instant::now();
    // Scenarios are independent; order of the output follows the input
    let summaries: Vec<SummaryRow> = scenarios
        .par_iter()
        .map(|scenario| evaluate(&calculator, scenario))
        .collect();
    println!("Calculations complete in {:?}", calc_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    for row in &summaries {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let failed = summaries.iter().filter(|s| s.status != "ok").count();
    println!("Output written to {}", args.output.display());
    println!("  {} ok, {} failed", summaries.len() - failed, failed);
    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario(mode: &str, tenure_years: Option<u32>, payment: Option<f64>) -> ScenarioRow {
        ScenarioRow {
            id: "s1".to_string(),
            mode: mode.to_string(),
            principal: 10_000.0,
            rate: 10.0,
            tenure_years,
            payment,
        }
    }

    #[test]
    fn test_evaluate_ok() {
        let calculator = Calculator::default();
        let summary = evaluate(&calculator, &scenario("tenure", None, Some(1_000.0)));
        assert_eq!(summary.status, "ok");
        assert_eq!(summary.months, Some(10.48));
    }

    #[test]
    fn test_evaluate_missing_field() {
        let calculator = Calculator::default();
        let summary = evaluate(&calculator, &scenario("installment", None, Some(1_000.0)));
        assert_eq!(summary.status, "Error: tenure is required for installment mode");
        assert!(summary.payment.is_none());
    }

    #[test]
    fn test_evaluate_unknown_mode() {
        let calculator = Calculator::default();
        let summary = evaluate(&calculator, &scenario("balloon", Some(5), None));
        assert!(summary.status.contains("unknown calculation type"));
    }
}
