//! # ViewModel Module
//!
//! ViewModel implementation split into focused responsibilities:
//! form editing, the simulation request lifecycle and the state store.

mod core;
mod form_manager;
mod simulation_manager;
pub mod simulation_store;

pub use core::ViewModel;
pub use form_manager::{SUBMIT_LABEL_BUSY, SUBMIT_LABEL_IDLE};
pub use simulation_store::{SimulationPhase, SimulationStore};
