//! # Services
//!
//! Side-effecting collaborators of the view model.

pub mod simulation;

pub use simulation::{
    SimulationClient, SimulationError, SimulationOutcome, SimulationResponseMessage,
    SimulationService, FALLBACK_ERROR_MESSAGE,
};
