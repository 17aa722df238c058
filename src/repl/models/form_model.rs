//! # Simulation Form Model
//!
//! The mutable draft behind the simulation form. Each input keeps the text the
//! user typed together with the typed outcome of parsing it, so the form can
//! show exactly what was entered while a request is only ever built from
//! valid numbers.

use crate::repl::events::{FieldPath, ScalarField, StationField};
use crate::repl::models::simulation_request::SimulationRequest;
use crate::repl::models::validation::{parse_positive_integer, parse_positive_real, FieldError};
use std::fmt;
use thiserror::Error;

pub const DEFAULT_ARRIVAL_RATE: f64 = 0.8;
pub const DEFAULT_SIMULATION_TIME: f64 = 1000.0;
pub const DEFAULT_SERVICE_RATE: f64 = 1.0;
pub const DEFAULT_SERVER_COUNT: u32 = 2;

/// Service rates of the stations the form starts with
const INITIAL_SERVICE_RATES: [f64; 2] = [1.0, 1.2];

/// Errors from addressing or editing the draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("station {index} does not exist (the form has {len})")]
    StationOutOfRange { index: usize, len: usize },

    #[error("got {service_rates} service rate(s) but {server_counts} server count(s)")]
    StationListMismatch {
        service_rates: usize,
        server_counts: usize,
    },

    #[error("at least one station is required")]
    NoStations,

    #[error(transparent)]
    Invalid(#[from] FieldError),
}

/// Every invalid input found when submitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<(FieldPath, FieldError)>);

impl ValidationErrors {
    pub fn fields(&self) -> &[(FieldPath, FieldError)] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Invalid input: ")?;
        for (i, (path, error)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{path}: {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw text of one input and the result of parsing it
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValue<T> {
    raw: String,
    parsed: Result<T, FieldError>,
}

impl<T: Copy + ToString> FieldValue<T> {
    fn valid(value: T) -> Self {
        Self {
            raw: value.to_string(),
            parsed: Ok(value),
        }
    }

    fn parse_with(raw: &str, parse: fn(&str) -> Result<T, FieldError>) -> Self {
        Self {
            raw: raw.to_string(),
            parsed: parse(raw),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Option<T> {
        self.parsed.as_ref().ok().copied()
    }

    pub fn error(&self) -> Option<&FieldError> {
        self.parsed.as_ref().err()
    }

    fn outcome(&self) -> Result<(), FieldError> {
        self.parsed.as_ref().map(|_| ()).map_err(Clone::clone)
    }
}

/// One queueing stage of the form
#[derive(Debug, Clone, PartialEq)]
pub struct StationDraft {
    pub service_rate: FieldValue<f64>,
    pub server_count: FieldValue<u32>,
}

impl StationDraft {
    fn with_values(service_rate: f64, server_count: u32) -> Self {
        Self {
            service_rate: FieldValue::valid(service_rate),
            server_count: FieldValue::valid(server_count),
        }
    }
}

impl Default for StationDraft {
    fn default() -> Self {
        Self::with_values(DEFAULT_SERVICE_RATE, DEFAULT_SERVER_COUNT)
    }
}

/// The editable simulation request
///
/// Stations are stored as (service rate, server count) pairs, so the two
/// parameter lists sent on the wire always line up by index. The form never
/// holds fewer than one station.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationDraft {
    arrival_rate: FieldValue<f64>,
    simulation_time: FieldValue<f64>,
    stations: Vec<StationDraft>,
}

impl SimulationDraft {
    /// Create the draft shown when the form is first displayed
    pub fn new() -> Self {
        Self {
            arrival_rate: FieldValue::valid(DEFAULT_ARRIVAL_RATE),
            simulation_time: FieldValue::valid(DEFAULT_SIMULATION_TIME),
            stations: INITIAL_SERVICE_RATES
                .iter()
                .map(|rate| StationDraft::with_values(*rate, DEFAULT_SERVER_COUNT))
                .collect(),
        }
    }

    pub fn arrival_rate(&self) -> &FieldValue<f64> {
        &self.arrival_rate
    }

    pub fn simulation_time(&self) -> &FieldValue<f64> {
        &self.simulation_time
    }

    pub fn stations(&self) -> &[StationDraft] {
        &self.stations
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Parsed service rates in station order (`None` for invalid inputs)
    pub fn service_rates(&self) -> Vec<Option<f64>> {
        self.stations.iter().map(|s| s.service_rate.value()).collect()
    }

    /// Parsed server counts in station order (`None` for invalid inputs)
    pub fn server_counts(&self) -> Vec<Option<u32>> {
        self.stations.iter().map(|s| s.server_count.value()).collect()
    }

    /// Replace a top-level input with new text
    pub fn update_scalar_field(&mut self, field: ScalarField, raw: &str) -> Result<(), FieldError> {
        let slot = match field {
            ScalarField::ArrivalRate => &mut self.arrival_rate,
            ScalarField::SimulationTime => &mut self.simulation_time,
        };
        *slot = FieldValue::parse_with(raw, parse_positive_real);
        slot.outcome()
    }

    /// Replace one station's input with new text
    pub fn update_station_field(
        &mut self,
        index: usize,
        field: StationField,
        raw: &str,
    ) -> Result<(), FormError> {
        let len = self.stations.len();
        let station = self
            .stations
            .get_mut(index)
            .ok_or(FormError::StationOutOfRange { index, len })?;

        let outcome = match field {
            StationField::ServiceRate => {
                station.service_rate = FieldValue::parse_with(raw, parse_positive_real);
                station.service_rate.outcome()
            }
            StationField::ServerCount => {
                station.server_count = FieldValue::parse_with(raw, parse_positive_integer);
                station.server_count.outcome()
            }
        };
        outcome.map_err(FormError::from)
    }

    /// Edit any input by its path
    pub fn update_field(&mut self, path: FieldPath, raw: &str) -> Result<(), FormError> {
        match path {
            FieldPath::Scalar(field) => self.update_scalar_field(field, raw).map_err(Into::into),
            FieldPath::Station { index, field } => self.update_station_field(index, field, raw),
        }
    }

    /// Append a station with the default service rate and server count
    pub fn add_station(&mut self) -> usize {
        self.stations.push(StationDraft::default());
        self.stations.len() - 1
    }

    /// Remove a station unless it is the last one; returns whether it was removed
    pub fn remove_station(&mut self, index: usize) -> bool {
        if self.stations.len() <= 1 || index >= self.stations.len() {
            return false;
        }
        self.stations.remove(index);
        true
    }

    /// Replace every station from paired service rate and server count texts
    ///
    /// Texts that do not parse are kept and reported by [`Self::submit`].
    pub fn replace_stations<S: AsRef<str>>(
        &mut self,
        service_rates: &[S],
        server_counts: &[S],
    ) -> Result<(), FormError> {
        if service_rates.len() != server_counts.len() {
            return Err(FormError::StationListMismatch {
                service_rates: service_rates.len(),
                server_counts: server_counts.len(),
            });
        }
        if service_rates.is_empty() {
            return Err(FormError::NoStations);
        }

        self.stations = service_rates
            .iter()
            .zip(server_counts)
            .map(|(rate, count)| StationDraft {
                service_rate: FieldValue::parse_with(rate.as_ref(), parse_positive_real),
                server_count: FieldValue::parse_with(count.as_ref(), parse_positive_integer),
            })
            .collect();
        Ok(())
    }

    /// Raw text of an input
    pub fn raw_text(&self, path: FieldPath) -> Option<&str> {
        match path {
            FieldPath::Scalar(ScalarField::ArrivalRate) => Some(self.arrival_rate.raw()),
            FieldPath::Scalar(ScalarField::SimulationTime) => Some(self.simulation_time.raw()),
            FieldPath::Station { index, field } => {
                self.stations.get(index).map(|station| match field {
                    StationField::ServiceRate => station.service_rate.raw(),
                    StationField::ServerCount => station.server_count.raw(),
                })
            }
        }
    }

    /// Parse problem of an input, if it currently holds invalid text
    pub fn field_error(&self, path: FieldPath) -> Option<&FieldError> {
        match path {
            FieldPath::Scalar(ScalarField::ArrivalRate) => self.arrival_rate.error(),
            FieldPath::Scalar(ScalarField::SimulationTime) => self.simulation_time.error(),
            FieldPath::Station { index, field } => {
                self.stations.get(index).and_then(|station| match field {
                    StationField::ServiceRate => station.service_rate.error(),
                    StationField::ServerCount => station.server_count.error(),
                })
            }
        }
    }

    /// Package the draft into a request, or list every invalid input
    pub fn submit(&self) -> Result<SimulationRequest, ValidationErrors> {
        let mut errors = Vec::new();

        let mut collect = |path: FieldPath, error: Option<&FieldError>| {
            if let Some(error) = error {
                errors.push((path, error.clone()));
            }
        };

        collect(
            FieldPath::Scalar(ScalarField::ArrivalRate),
            self.arrival_rate.error(),
        );
        for (index, station) in self.stations.iter().enumerate() {
            collect(
                FieldPath::station(index, StationField::ServiceRate),
                station.service_rate.error(),
            );
            collect(
                FieldPath::station(index, StationField::ServerCount),
                station.server_count.error(),
            );
        }
        collect(
            FieldPath::Scalar(ScalarField::SimulationTime),
            self.simulation_time.error(),
        );

        match (self.arrival_rate.value(), self.simulation_time.value()) {
            (Some(lambda_rate), Some(simulation_time)) if errors.is_empty() => {
                Ok(SimulationRequest {
                    lambda_rate,
                    service_rates: self.service_rates().into_iter().flatten().collect(),
                    num_servers: self.server_counts().into_iter().flatten().collect(),
                    simulation_time,
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }
}

impl Default for SimulationDraft {
    fn default() -> Self {
        Self::new()
    }
}
