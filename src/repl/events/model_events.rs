//! # Model Events
//!
//! Events emitted when the form draft or the simulation state changes.
//! These events notify the system of data changes for reactive updates.

use super::types::{FieldPath, FocusTarget};

/// Events emitted when models change
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// An input was edited and parsed successfully
    FieldUpdated { path: FieldPath },

    /// An input was edited but does not hold a valid number
    FieldRejected { path: FieldPath, reason: String },

    /// A station was appended to the form
    StationAdded { index: usize },

    /// A station was removed from the form
    StationRemoved { index: usize },

    /// Focus moved to another form element
    FocusMoved { old: FocusTarget, new: FocusTarget },

    /// Submission refused because some inputs are invalid
    SubmissionRejected { invalid_fields: usize },

    /// A request was issued with this sequence number
    SimulationStarted { seq: u64 },

    /// The latest request produced a result
    SimulationSucceeded { seq: u64 },

    /// The latest request failed with a user-facing message
    SimulationFailed { seq: u64, message: String },

    /// A response arrived for a request that is no longer the latest
    SimulationDiscarded { seq: u64 },
}
