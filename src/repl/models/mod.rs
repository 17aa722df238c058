//! # Models Module
//!
//! Plain data owned by the view model: the form draft, the wire types
//! exchanged with the simulation service, and status bar state.

pub mod form_model;
pub mod simulation_request;
pub mod status_line;
pub mod validation;

pub use form_model::{FieldValue, FormError, SimulationDraft, StationDraft, ValidationErrors};
pub use simulation_request::{SimulationRequest, SimulationResult};
pub use status_line::{HttpStatus, StatusLine};
pub use validation::FieldError;
