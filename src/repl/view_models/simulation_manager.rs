//! # Simulation Management
//!
//! Bridges the form and the simulation service: validates and issues
//! submissions, and applies responses to the simulation store.

use crate::repl::events::{ModelEvent, ViewEvent};
use crate::repl::models::{SimulationRequest, SimulationResult};
use crate::repl::services::SimulationResponseMessage;
use crate::repl::view_models::core::ViewModel;

impl ViewModel {
    /// Validate the draft and start a request
    ///
    /// Returns the sequence number and request to hand to the service, or
    /// `None` when the form is invalid or a request is already in flight.
    pub fn submit_simulation(&mut self) -> Option<(u64, SimulationRequest)> {
        if self.store.is_loading() {
            tracing::debug!("Submit ignored, simulation #{} in flight", self.store.latest_issued());
            return None;
        }

        let request = match self.draft.submit() {
            Ok(request) => request,
            Err(errors) => {
                tracing::debug!("Submission rejected: {}", errors);
                self.status_line.set_status_message(errors.to_string());
                self.emit_model_event(ModelEvent::SubmissionRejected {
                    invalid_fields: errors.len(),
                });
                self.emit_view_event([
                    ViewEvent::FormRedrawRequired,
                    ViewEvent::StatusBarUpdateRequired,
                ]);
                return None;
            }
        };

        let seq = self.store.begin();
        tracing::info!(
            "Submitting simulation #{}: λ={} stations={} time={}",
            seq,
            request.lambda_rate,
            request.station_count(),
            request.simulation_time
        );
        self.status_line.clear_status_message();
        self.emit_model_event(ModelEvent::SimulationStarted { seq });
        self.emit_view_event([
            ViewEvent::FormRedrawRequired,
            ViewEvent::ResultsRedrawRequired,
            ViewEvent::StatusBarUpdateRequired,
        ]);

        Some((seq, request))
    }

    /// Apply a response delivered by the simulation service
    pub fn apply_simulation_response(&mut self, message: SimulationResponseMessage) -> ModelEvent {
        let SimulationResponseMessage { seq, outcome } = message;
        let result = outcome.result.map_err(|e| e.user_message());
        let event = self.store.resolve(seq, result);

        if !matches!(event, ModelEvent::SimulationDiscarded { .. }) {
            self.status_line
                .set_http_status(outcome.status_code, outcome.duration.as_millis() as u64);
            self.emit_view_event([
                ViewEvent::FormRedrawRequired,
                ViewEvent::ResultsRedrawRequired,
                ViewEvent::StatusBarUpdateRequired,
            ]);
        }

        self.emit_model_event(event.clone());
        event
    }

    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    pub fn current_result(&self) -> Option<&SimulationResult> {
        self.store.result()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.store.error()
    }
}
