//! # Simulation Wire Types
//!
//! JSON shapes exchanged with the simulation service.

use serde::{Deserialize, Serialize};

/// Body of `POST /simulate/`
///
/// Only built from a validated draft, so `service_rates` and `num_servers`
/// always have the same non-zero length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub lambda_rate: f64,
    pub service_rates: Vec<f64>,
    pub num_servers: Vec<u32>,
    pub simulation_time: f64,
}

impl SimulationRequest {
    pub fn station_count(&self) -> usize {
        self.service_rates.len()
    }
}

/// Summary metrics returned by the service
///
/// Either metric may be missing from a malformed response; the renderer
/// shows a placeholder rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Average number of items in the network (L)
    #[serde(rename = "L", default)]
    pub average_queue_length: Option<f64>,
    /// Average time an item spends in the network (W)
    #[serde(rename = "W", default)]
    pub average_wait_time: Option<f64>,
}

impl SimulationResult {
    pub fn new(average_queue_length: f64, average_wait_time: f64) -> Self {
        Self {
            average_queue_length: Some(average_queue_length),
            average_wait_time: Some(average_wait_time),
        }
    }

    /// Whether both metrics are present
    pub fn is_complete(&self) -> bool {
        self.average_queue_length.is_some() && self.average_wait_time.is_some()
    }
}
