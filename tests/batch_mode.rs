mod common;

use common::*;
use queuesim::batch;
use queuesim::cmd_args::CommandLineArgs;
use queuesim::repl::models::SimulationResult;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn run_once_should_print_metrics_and_chart() {
    let server = start_simulation_server().await;
    stub_json(&server, 200, metrics(3.456, 1.234)).await;
    let args = CommandLineArgs::parse_from(["queuesim", "--once"]);
    let mut out = Vec::new();

    let result = batch::run_once(&args, &profile_for(&server), &mut out)
        .await
        .unwrap();

    assert_eq!(result, SimulationResult::new(3.456, 1.234));
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Average Queue Length (L): 3.46");
    assert_eq!(lines[1], "Average Wait Time (W): 1.23");
    assert!(text.contains("Queue Simulation Results"));
    assert!(text.contains("■ Simulation Results"));
}

#[tokio::test]
async fn run_once_should_send_stations_from_arguments() {
    let server = start_simulation_server().await;
    Mock::given(method("POST"))
        .and(path(SIMULATE_PATH))
        .and(body_json(json!({
            "lambda_rate": 0.5,
            "service_rates": [2.0],
            "num_servers": [3],
            "simulation_time": 50.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(metrics(0.1, 0.2)))
        .expect(1)
        .mount(&server)
        .await;
    let args = CommandLineArgs::parse_from([
        "queuesim",
        "--once",
        "--lambda",
        "0.5",
        "--service-rate",
        "2",
        "--servers",
        "3",
        "--time",
        "50",
    ]);
    let mut out = Vec::new();

    let result = batch::run_once(&args, &profile_for(&server), &mut out).await;

    assert_eq!(result.unwrap(), SimulationResult::new(0.1, 0.2));
}

#[tokio::test]
async fn run_once_should_write_chart_description() {
    let server = start_simulation_server().await;
    stub_json(&server, 200, metrics(2.0, 1.0)).await;
    let dir = tempfile::tempdir().unwrap();
    let chart_path = dir.path().join("chart.json");
    let args = CommandLineArgs::parse_from([
        "queuesim",
        "--once",
        "--chart-json",
        chart_path.to_str().unwrap(),
    ]);
    let mut out = Vec::new();

    batch::run_once(&args, &profile_for(&server), &mut out)
        .await
        .unwrap();

    let chart: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&chart_path).unwrap()).unwrap();
    assert_eq!(chart["title"], "Queue Simulation Results");
    assert_eq!(
        chart["labels"],
        json!(["Average Queue Length (L)", "Average Wait Time (W)"])
    );
    assert_eq!(chart["datasets"][0]["data"], json!([2.0, 1.0]));
}

#[tokio::test]
async fn run_once_should_fail_with_service_message() {
    let server = start_simulation_server().await;
    stub_json(&server, 400, json!({ "error": "invalid lambda" })).await;
    let args = CommandLineArgs::parse_from(["queuesim", "--once"]);
    let mut out = Vec::new();

    let error = batch::run_once(&args, &profile_for(&server), &mut out)
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "invalid lambda");
    assert!(out.is_empty());
}
