//! # queuesim - Terminal Client for a Queueing-Network Simulation Service
//!
//! Collects an arrival rate, a simulation time and a list of stations
//! (service rate and server count each), posts them to a remote simulation
//! service and renders the returned average queue length (L) and average
//! wait time (W) as text and a bar chart.
//!
//! ## Architecture
//!
//! The interactive form follows the Model-View-ViewModel (MVVM) pattern:
//!
//! ```text
//! ┌─────────────┐    Events    ┌──────────────┐    Updates   ┌──────────┐
//! │    View     │◄─────────────│  ViewModel   │◄─────────────│  Models  │
//! │             │              │              │              │          │
//! │ - Form      │              │ - Focus      │              │ - Draft  │
//! │ - Results   │              │ - Store      │              │ - Wire   │
//! │ - Status    │              │ - Submission │              │   types  │
//! └─────────────┘              └──────────────┘              └──────────┘
//!                                      ▲
//!                                      │ Commands
//!                                      ▼
//!                               ┌──────────────┐      ┌───────────────┐
//!                               │  Controller  │─────▶│ Simulation    │
//!                               │              │◄─────│ Service (HTTP)│
//!                               │ - Event Loop │      └───────────────┘
//!                               └──────────────┘
//! ```
//!
//! Without a terminal, or with `--once`, [`batch`] submits a single request
//! built from the command line and prints the results.

pub mod batch;
pub mod cmd_args;
pub mod config;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
