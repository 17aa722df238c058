//! # Simulation Service
//!
//! Sends simulation requests to the remote service and delivers the outcome
//! back to the UI loop through a channel.

use crate::config::SimulationProfile;
use crate::repl::models::{SimulationRequest, SimulationResult};
use serde::Deserialize;
use std::error::Error as _;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::mpsc;

/// Shown whenever the service gives no usable error message
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Failure of one simulation exchange
#[derive(Debug, Error)]
pub enum SimulationError {
    /// The request never produced a response
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a failure status and no message
    #[error("service responded with status {0}")]
    Status(u16),

    /// The service explained what went wrong
    #[error("{0}")]
    Api(String),

    /// A success status with a body that is not a result
    #[error("could not read response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SimulationError {
    /// The single string the user sees for this failure
    pub fn user_message(&self) -> String {
        match self {
            SimulationError::Api(message) => message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Error body shape used by the service
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Outcome of one exchange, timing included
#[derive(Debug)]
pub struct SimulationOutcome {
    pub result: Result<SimulationResult, SimulationError>,
    /// HTTP status when a response arrived at all
    pub status_code: Option<u16>,
    pub duration: Duration,
}

/// Message type for async simulation response handling
#[derive(Debug)]
pub struct SimulationResponseMessage {
    /// Sequence number of the request this answers
    pub seq: u64,
    pub outcome: SimulationOutcome,
}

/// Client side of the simulation service
#[derive(Debug, Clone)]
pub struct SimulationClient {
    client: reqwest::Client,
    url: String,
}

impl SimulationClient {
    /// Create a client for the endpoint named by the profile
    pub fn new(profile: &SimulationProfile) -> Result<Self, SimulationError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            url: profile.simulate_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Run one simulation request to completion
    pub async fn simulate(&self, request: &SimulationRequest) -> SimulationOutcome {
        let start_time = Instant::now();
        tracing::debug!(
            "POST {} with {} station(s)",
            self.url,
            request.station_count()
        );

        let (result, status_code) = match self.client.post(&self.url).json(request).send().await {
            Ok(response) => {
                let status = response.status();
                let result = match response.text().await {
                    Ok(body) => interpret_response(status.as_u16(), status.is_success(), &body),
                    Err(e) => Err(SimulationError::Transport(e)),
                };
                (result, Some(status.as_u16()))
            }
            Err(e) => (Err(SimulationError::Transport(e)), None),
        };

        if let Err(e) = &result {
            // Show full error chain, the user only gets the short message
            let mut error_message = format!("{e}");
            let mut source = e.source();
            while let Some(cause) = source {
                error_message.push_str(&format!("\n  Caused by: {cause}"));
                source = cause.source();
            }
            tracing::error!("Simulation request failed: {error_message}");
        }

        SimulationOutcome {
            result,
            status_code,
            duration: start_time.elapsed(),
        }
    }
}

/// Decide what a response body means given its status
fn interpret_response(
    status_code: u16,
    is_success: bool,
    body: &str,
) -> Result<SimulationResult, SimulationError> {
    // A body carrying an `error` message is a failure whatever the status;
    // the service reports unstable parameters with a 200 and such a body
    let error_message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error);
    if let Some(message) = error_message {
        return Err(SimulationError::Api(message));
    }

    if !is_success {
        return Err(SimulationError::Status(status_code));
    }

    Ok(serde_json::from_str(body)?)
}

/// Service for managing simulation request operations
///
/// Wraps the client and a channel so requests can run on tokio tasks while
/// the UI loop keeps handling input.
pub struct SimulationService {
    client: SimulationClient,
    response_receiver: mpsc::Receiver<SimulationResponseMessage>,
    response_sender: mpsc::Sender<SimulationResponseMessage>,
}

impl SimulationService {
    /// Create a new SimulationService with a profile
    pub fn new(profile: &SimulationProfile) -> Result<Self, SimulationError> {
        tracing::debug!("Creating SimulationService for {}", profile.simulate_url());
        let (response_sender, response_receiver) = mpsc::channel(10);

        Ok(Self {
            client: SimulationClient::new(profile)?,
            response_receiver,
            response_sender,
        })
    }

    pub fn client(&self) -> &SimulationClient {
        &self.client
    }

    /// Execute a simulation request asynchronously
    ///
    /// This spawns a tokio task that executes the request and sends the
    /// result back through the internal channel tagged with `seq`.
    pub fn execute_async(&self, seq: u64, request: SimulationRequest) {
        let client = self.client.clone();
        let result_sender = self.response_sender.clone();

        tokio::spawn(async move {
            let outcome = client.simulate(&request).await;
            // Ignore send errors (receiver might have been dropped)
            let _ = result_sender
                .send(SimulationResponseMessage { seq, outcome })
                .await;
        });
    }

    /// Check if there are any pending responses (non-blocking)
    pub fn poll_response(&mut self) -> Option<SimulationResponseMessage> {
        self.response_receiver.try_recv().ok()
    }

    /// Wait for the next response
    pub async fn next_response(&mut self) -> Option<SimulationResponseMessage> {
        self.response_receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpret_response_should_parse_success_body() {
        let result = interpret_response(200, true, r#"{"L": 3.456, "W": 1.234}"#).unwrap();
        assert_eq!(result, SimulationResult::new(3.456, 1.234));
    }

    #[test]
    fn interpret_response_should_surface_error_field_on_failure_status() {
        let error = interpret_response(400, false, r#"{"error": "invalid lambda"}"#).unwrap_err();
        assert_eq!(error.user_message(), "invalid lambda");
    }

    #[test]
    fn interpret_response_should_surface_error_field_on_success_status() {
        let error = interpret_response(
            200,
            true,
            r#"{"error": "Stability condition not met for station 0"}"#,
        )
        .unwrap_err();
        assert_eq!(
            error.user_message(),
            "Stability condition not met for station 0"
        );
    }

    #[test]
    fn interpret_response_should_fall_back_without_error_field() {
        let error = interpret_response(500, false, "").unwrap_err();
        assert!(matches!(error, SimulationError::Status(500)));
        assert_eq!(error.user_message(), FALLBACK_ERROR_MESSAGE);

        let error = interpret_response(502, false, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(error.user_message(), "An error occurred");
    }

    #[test]
    fn interpret_response_should_reject_unreadable_success_body() {
        let error = interpret_response(200, true, "not json").unwrap_err();
        assert!(matches!(error, SimulationError::Decode(_)));
        assert_eq!(error.user_message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn client_should_target_profile_endpoint() {
        let profile = SimulationProfile::new("http://localhost:9000/", "/simulate/");
        let client = SimulationClient::new(&profile).unwrap();
        assert_eq!(client.url(), "http://localhost:9000/simulate/");
    }
}
