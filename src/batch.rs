//! # Headless Mode
//!
//! Submits one simulation built from the command line and prints the
//! results, for scripts and pipes where no terminal is attached.

use crate::cmd_args::CommandLineArgs;
use crate::config::SimulationProfile;
use crate::repl::models::SimulationResult;
use crate::repl::services::SimulationClient;
use crate::repl::views::{metric_lines, BarChart, ChartSpec};
use anyhow::{Context, Result};
use std::io::Write;

/// Chart width used when printing outside a terminal
pub const CHART_WIDTH: usize = 80;

/// Run one simulation and print metric lines and the chart to `out`
///
/// Validation and service failures are returned as errors carrying the
/// message the interactive form would show.
pub async fn run_once<W: Write>(
    cmd_args: &CommandLineArgs,
    profile: &SimulationProfile,
    out: &mut W,
) -> Result<SimulationResult> {
    let draft = cmd_args.initial_draft()?;
    let request = draft.submit()?;

    let client = SimulationClient::new(profile)?;
    tracing::info!(
        "Submitting simulation to {}: λ={} stations={} time={}",
        client.url(),
        request.lambda_rate,
        request.station_count(),
        request.simulation_time
    );

    let outcome = client.simulate(&request).await;
    tracing::debug!(
        "Simulation finished in {:?} with status {:?}",
        outcome.duration,
        outcome.status_code
    );
    let result = outcome
        .result
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    print_result(&result, out)?;

    if let Some(path) = cmd_args.chart_json() {
        write_chart_json(&result, path)?;
    }

    Ok(result)
}

/// Metric lines, a blank line, then the chart
pub fn print_result<W: Write>(result: &SimulationResult, out: &mut W) -> Result<()> {
    for line in metric_lines(result) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    for line in BarChart::from_result(result).render(CHART_WIDTH) {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write the chart description as pretty JSON
pub fn write_chart_json(result: &SimulationResult, path: &str) -> Result<()> {
    let json = ChartSpec::from_result(result).to_json_pretty()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write chart description to '{path}'"))?;
    tracing::debug!("Chart description written to {}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_result_should_list_metrics_then_chart() {
        let mut out = Vec::new();

        print_result(&SimulationResult::new(3.456, 1.234), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Average Queue Length (L): 3.46");
        assert_eq!(lines[1], "Average Wait Time (W): 1.23");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "Queue Simulation Results");
    }

    #[test]
    fn write_chart_json_should_create_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");

        write_chart_json(&SimulationResult::new(2.0, 1.0), path.to_str().unwrap()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["title"], "Queue Simulation Results");
        assert_eq!(value["datasets"][0]["data"][0], 2.0);
    }

    #[tokio::test]
    async fn invalid_arguments_should_fail_before_any_request() {
        let args = CommandLineArgs::parse_from(["queuesim", "--once", "--lambda", "0"]);
        // Nothing listens here; reaching the network would give a different error
        let profile = SimulationProfile::new("http://127.0.0.1:9", "/simulate/");
        let mut out = Vec::new();

        let error = run_once(&args, &profile, &mut out).await.unwrap_err();

        assert_eq!(
            error.to_string(),
            "Invalid input: Arrival Rate (λ): must be greater than zero"
        );
        assert!(out.is_empty());
    }
}
