//! # Form Management
//!
//! Focus navigation, text editing and station add/remove on the simulation
//! form. All edits go through the draft so every keystroke is re-validated.

use crate::repl::events::{FieldPath, FocusTarget, ModelEvent, ScalarField, StationField, ViewEvent};
use crate::repl::models::FormError;
use crate::repl::view_models::core::ViewModel;

pub const SUBMIT_LABEL_IDLE: &str = "Run Simulation";
pub const SUBMIT_LABEL_BUSY: &str = "Simulating...";

impl ViewModel {
    /// Focusable elements in screen order
    pub fn focus_order(&self) -> Vec<FocusTarget> {
        let station_count = self.draft.station_count();
        let mut order = vec![
            FocusTarget::Field(FieldPath::Scalar(ScalarField::ArrivalRate)),
            FocusTarget::Field(FieldPath::Scalar(ScalarField::SimulationTime)),
        ];
        for index in 0..station_count {
            order.push(FocusTarget::Field(FieldPath::station(
                index,
                StationField::ServiceRate,
            )));
            order.push(FocusTarget::Field(FieldPath::station(
                index,
                StationField::ServerCount,
            )));
            // The last station has no remove button
            if station_count > 1 {
                order.push(FocusTarget::RemoveStation(index));
            }
        }
        order.push(FocusTarget::AddStation);
        order.push(FocusTarget::Submit);
        order
    }

    pub fn focused(&self) -> FocusTarget {
        self.focus
    }

    /// Move focus to a target if it is currently on screen
    pub fn set_focus(&mut self, target: FocusTarget) -> bool {
        if !self.focus_order().contains(&target) {
            return false;
        }
        self.move_focus_to(target);
        true
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.step_focus(-1);
    }

    fn step_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let len = order.len() as isize;
        let current = order.iter().position(|t| *t == self.focus).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.move_focus_to(order[next]);
    }

    fn move_focus_to(&mut self, target: FocusTarget) {
        let old = self.focus;
        if old == target {
            return;
        }
        self.focus = target;
        self.emit_model_event(ModelEvent::FocusMoved { old, new: target });
        self.emit_view_event([ViewEvent::FormRedrawRequired]);
    }

    /// Replace the text of any input
    pub fn update_field(&mut self, path: FieldPath, raw: &str) -> Result<(), FormError> {
        let outcome = self.draft.update_field(path, raw);
        // Nothing changed
        if matches!(outcome, Err(FormError::StationOutOfRange { .. })) {
            return outcome;
        }

        let event = match &outcome {
            Ok(()) => ModelEvent::FieldUpdated { path },
            Err(error) => ModelEvent::FieldRejected {
                path,
                reason: error.to_string(),
            },
        };
        self.emit_model_event(event);
        self.emit_view_event([ViewEvent::FormRedrawRequired]);
        outcome
    }

    /// Append a character to the focused input
    pub fn insert_char(&mut self, ch: char) -> bool {
        let Some(path) = self.focus.field() else {
            return false;
        };
        let mut text = self.draft.raw_text(path).unwrap_or_default().to_string();
        text.push(ch);
        // Invalid text is kept and flagged, it is not an error here
        let _ = self.update_field(path, &text);
        true
    }

    /// Remove the last character of the focused input
    pub fn delete_char(&mut self) -> bool {
        let Some(path) = self.focus.field() else {
            return false;
        };
        let mut text = self.draft.raw_text(path).unwrap_or_default().to_string();
        if text.pop().is_none() {
            return false;
        }
        let _ = self.update_field(path, &text);
        true
    }

    /// Append a station with default values
    pub fn add_station(&mut self) -> usize {
        let index = self.draft.add_station();
        self.emit_model_event(ModelEvent::StationAdded { index });
        self.emit_view_event([ViewEvent::FormRedrawRequired]);
        index
    }

    /// Remove a station unless it is the only one
    pub fn remove_station(&mut self, index: usize) -> bool {
        if !self.draft.remove_station(index) {
            tracing::debug!("Station {} not removed", index);
            return false;
        }
        self.emit_model_event(ModelEvent::StationRemoved { index });
        self.refocus_after_removal(index);
        self.emit_view_event([ViewEvent::FormRedrawRequired]);
        true
    }

    /// Remove the station the focus is on
    pub fn remove_focused_station(&mut self) -> bool {
        match self.focus.station_index() {
            Some(index) => self.remove_station(index),
            None => false,
        }
    }

    /// Keep the focus on an element that still exists after a removal
    fn refocus_after_removal(&mut self, removed: usize) {
        let last = self.draft.station_count() - 1;
        let target = match self.focus {
            FocusTarget::Field(FieldPath::Station { index, field }) if index >= removed => {
                let index = if index == removed { removed.min(last) } else { index - 1 };
                FocusTarget::Field(FieldPath::station(index, field))
            }
            FocusTarget::RemoveStation(index) if index >= removed => {
                let index = if index == removed { removed.min(last) } else { index - 1 };
                if self.draft.station_count() > 1 {
                    FocusTarget::RemoveStation(index)
                } else {
                    FocusTarget::Field(FieldPath::station(index, StationField::ServiceRate))
                }
            }
            FocusTarget::RemoveStation(index) if self.draft.station_count() == 1 => {
                FocusTarget::Field(FieldPath::station(index.min(last), StationField::ServiceRate))
            }
            other => other,
        };
        self.focus = target;
    }

    /// Whether the submit control accepts input
    pub fn is_submit_enabled(&self) -> bool {
        !self.store.is_loading()
    }

    /// Label of the submit control
    pub fn submit_label(&self) -> &'static str {
        if self.store.is_loading() {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL_IDLE
        }
    }
}
