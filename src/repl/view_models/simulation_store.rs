//! # Simulation Store
//!
//! Explicit state container for the request lifecycle:
//! `idle → loading → success | failure → loading` on the next submit.
//!
//! Every submission gets a sequence number. Only the response to the most
//! recently issued request is applied; anything older is discarded, so a
//! slow earlier response can never overwrite a newer one.

use crate::repl::events::ModelEvent;
use crate::repl::models::SimulationResult;

/// Where the request lifecycle currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    Idle,
    Loading,
    Success,
    Failure,
}

/// Result, error and loading state of the simulation
#[derive(Debug, Clone, Default)]
pub struct SimulationStore {
    result: Option<SimulationResult>,
    error: Option<String>,
    latest_issued: u64,
    pending: Option<u64>,
}

impl SimulationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request and return its sequence number
    ///
    /// The previous error is cleared; the previous result stays visible until
    /// the new outcome arrives.
    pub fn begin(&mut self) -> u64 {
        self.latest_issued += 1;
        self.pending = Some(self.latest_issued);
        self.error = None;
        tracing::debug!("Simulation #{} started", self.latest_issued);
        self.latest_issued
    }

    /// Apply the outcome of request `seq`
    ///
    /// A failure replaces any earlier result, so a stale result is never shown
    /// next to a fresh error.
    pub fn resolve(&mut self, seq: u64, outcome: Result<SimulationResult, String>) -> ModelEvent {
        if seq != self.latest_issued || self.pending != Some(seq) {
            tracing::warn!(
                "Discarding response to simulation #{} (latest is #{})",
                seq,
                self.latest_issued
            );
            return ModelEvent::SimulationDiscarded { seq };
        }

        self.pending = None;
        match outcome {
            Ok(result) => {
                tracing::debug!("Simulation #{} succeeded: {:?}", seq, result);
                self.result = Some(result);
                self.error = None;
                ModelEvent::SimulationSucceeded { seq }
            }
            Err(message) => {
                tracing::debug!("Simulation #{} failed: {}", seq, message);
                self.result = None;
                self.error = Some(message.clone());
                ModelEvent::SimulationFailed { seq, message }
            }
        }
    }

    pub fn phase(&self) -> SimulationPhase {
        if self.pending.is_some() {
            SimulationPhase::Loading
        } else if self.error.is_some() {
            SimulationPhase::Failure
        } else if self.result.is_some() {
            SimulationPhase::Success
        } else {
            SimulationPhase::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn result(&self) -> Option<&SimulationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sequence number of the most recently issued request (0 before any)
    pub fn latest_issued(&self) -> u64 {
        self.latest_issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_should_start_idle() {
        let store = SimulationStore::new();

        assert_eq!(store.phase(), SimulationPhase::Idle);
        assert!(!store.is_loading());
        assert!(store.result().is_none());
        assert!(store.error().is_none());
    }

    #[test]
    fn begin_should_enter_loading_and_clear_error() {
        let mut store = SimulationStore::new();
        let seq = store.begin();
        store.resolve(seq, Err("invalid lambda".to_string()));
        assert_eq!(store.phase(), SimulationPhase::Failure);

        let next = store.begin();

        assert_eq!(next, seq + 1);
        assert_eq!(store.phase(), SimulationPhase::Loading);
        assert!(store.error().is_none());
    }

    #[test]
    fn success_should_store_result_and_stop_loading() {
        let mut store = SimulationStore::new();
        let seq = store.begin();

        let event = store.resolve(seq, Ok(SimulationResult::new(3.456, 1.234)));

        assert_eq!(event, ModelEvent::SimulationSucceeded { seq });
        assert_eq!(store.phase(), SimulationPhase::Success);
        assert_eq!(store.result(), Some(&SimulationResult::new(3.456, 1.234)));
        assert!(!store.is_loading());
    }

    #[test]
    fn failure_should_clear_previous_result() {
        let mut store = SimulationStore::new();
        let first = store.begin();
        store.resolve(first, Ok(SimulationResult::new(1.0, 2.0)));

        let second = store.begin();
        // Result stays visible while the next request is in flight
        assert!(store.result().is_some());

        let event = store.resolve(second, Err("An error occurred".to_string()));

        assert_eq!(
            event,
            ModelEvent::SimulationFailed {
                seq: second,
                message: "An error occurred".to_string()
            }
        );
        assert!(store.result().is_none());
        assert_eq!(store.error(), Some("An error occurred"));
        assert!(!store.is_loading());
    }

    #[test]
    fn stale_response_should_not_overwrite_newer_request() {
        let mut store = SimulationStore::new();
        let slow = store.begin();
        let fast = store.begin();

        store.resolve(fast, Ok(SimulationResult::new(5.0, 6.0)));
        let event = store.resolve(slow, Ok(SimulationResult::new(1.0, 1.0)));

        assert_eq!(event, ModelEvent::SimulationDiscarded { seq: slow });
        assert_eq!(store.result(), Some(&SimulationResult::new(5.0, 6.0)));
    }

    #[test]
    fn stale_response_should_not_end_loading_of_newer_request() {
        let mut store = SimulationStore::new();
        let slow = store.begin();
        let fast = store.begin();

        store.resolve(slow, Err("late".to_string()));

        assert!(store.is_loading());
        assert!(store.error().is_none());

        store.resolve(fast, Ok(SimulationResult::new(2.0, 3.0)));
        assert!(!store.is_loading());
    }

    #[test]
    fn duplicate_response_should_be_discarded() {
        let mut store = SimulationStore::new();
        let seq = store.begin();
        store.resolve(seq, Ok(SimulationResult::new(2.0, 3.0)));

        let event = store.resolve(seq, Err("again".to_string()));

        assert_eq!(event, ModelEvent::SimulationDiscarded { seq });
        assert_eq!(store.phase(), SimulationPhase::Success);
    }
}
