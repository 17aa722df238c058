//! # Interactive Simulation Form
//!
//! MVVM implementation of the terminal form: models hold the draft and the
//! wire types, the ViewModel coordinates them, views render, commands map
//! keys and the controller runs the loop.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod view_models;
pub mod views;

// Re-export core types
pub use controllers::AppController;
pub use io::{EventStream, RenderStream};
pub use view_models::ViewModel;
