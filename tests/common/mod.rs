//! Shared fixtures: a stubbed simulation service and a profile pointing at it.

#![allow(dead_code)]

use queuesim::config::SimulationProfile;
use queuesim::repl::models::SimulationRequest;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SIMULATE_PATH: &str = "/simulate/";

/// Start an empty stub server
pub async fn start_simulation_server() -> MockServer {
    MockServer::start().await
}

/// Profile that sends requests to `server`
pub fn profile_for(server: &MockServer) -> SimulationProfile {
    SimulationProfile::new(server.uri(), SIMULATE_PATH)
}

/// Answer every simulation with `status` and a JSON body
pub async fn stub_json(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(SIMULATE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Answer the next `times` simulations with `status` and a JSON body
pub async fn stub_json_times(server: &MockServer, status: u16, body: Value, times: u64) {
    Mock::given(method("POST"))
        .and(path(SIMULATE_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .up_to_n_times(times)
        .mount(server)
        .await;
}

/// Answer every simulation with a bare status
pub async fn stub_status(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(SIMULATE_PATH))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

pub fn metrics(l: f64, w: f64) -> Value {
    json!({ "L": l, "W": w })
}

/// The request the default form produces
pub fn default_request() -> SimulationRequest {
    SimulationRequest {
        lambda_rate: 0.8,
        service_rates: vec![1.0, 1.2],
        num_servers: vec![2, 2],
        simulation_time: 1000.0,
    }
}
