//! # Core Event Types
//!
//! Identifiers shared by the event system: which form field an edit targets
//! and which form element holds the focus.

use std::fmt;

/// Top-level numeric input of the simulation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    ArrivalRate,
    SimulationTime,
}

impl ScalarField {
    pub fn label(&self) -> &'static str {
        match self {
            ScalarField::ArrivalRate => "Arrival Rate (λ)",
            ScalarField::SimulationTime => "Simulation Time",
        }
    }
}

/// Per-station numeric input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationField {
    ServiceRate,
    ServerCount,
}

impl StationField {
    pub fn label(&self) -> &'static str {
        match self {
            StationField::ServiceRate => "Service Rate",
            StationField::ServerCount => "Number of Servers",
        }
    }
}

/// Address of one input in the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Scalar(ScalarField),
    Station { index: usize, field: StationField },
}

impl FieldPath {
    pub fn station(index: usize, field: StationField) -> Self {
        FieldPath::Station { index, field }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Scalar(field) => f.write_str(field.label()),
            // Stations are numbered from 1 on screen
            FieldPath::Station { index, field } => {
                write!(f, "Station {} {}", index + 1, field.label())
            }
        }
    }
}

/// Focusable element of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    Field(FieldPath),
    RemoveStation(usize),
    AddStation,
    Submit,
}

impl FocusTarget {
    /// The input this target edits, if it is an input at all
    pub fn field(&self) -> Option<FieldPath> {
        match self {
            FocusTarget::Field(path) => Some(*path),
            _ => None,
        }
    }

    /// The station this target belongs to, if any
    pub fn station_index(&self) -> Option<usize> {
        match self {
            FocusTarget::Field(FieldPath::Station { index, .. }) => Some(*index),
            FocusTarget::RemoveStation(index) => Some(*index),
            _ => None,
        }
    }
}
