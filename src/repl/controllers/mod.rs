//! # Controllers Module
//!
//! The application controller: owns the event loop and wires input,
//! view model, simulation service and renderer together.

pub mod app_controller;

pub use app_controller::AppController;
