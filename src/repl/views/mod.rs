//! # Views Module
//!
//! Rendering of the form, the simulation results and the status bar.

pub mod form_renderer;
pub mod results_renderer;
pub mod terminal_renderer;

pub use results_renderer::{metric_lines, BarChart, ChartSpec};
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
