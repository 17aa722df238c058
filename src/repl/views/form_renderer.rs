//! # Form Layout
//!
//! Turns the ViewModel's form state into a list of display lines. The
//! terminal renderer decides colors; this module only decides content.

use crate::repl::events::{FieldPath, FocusTarget, ScalarField, StationField};
use crate::repl::view_models::ViewModel;
use unicode_width::UnicodeWidthStr;

pub const APP_TITLE: &str = "Queue Simulation";
pub const STATIONS_HEADING: &str = "Stations";
pub const ADD_STATION_LABEL: &str = "Add Station";
pub const REMOVE_STATION_LABEL: &str = "Remove";

const FOCUS_MARKER: &str = "▸ ";
const INPUT_WIDTH: usize = 12;

/// What a form line shows
#[derive(Debug, Clone, PartialEq)]
pub enum FormLineKind {
    Heading(String),
    Blank,
    Input {
        label: String,
        value: String,
        error: Option<String>,
    },
    Button {
        label: String,
        enabled: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormLine {
    pub kind: FormLineKind,
    pub focused: bool,
}

impl FormLine {
    fn heading(text: &str) -> Self {
        Self {
            kind: FormLineKind::Heading(text.to_string()),
            focused: false,
        }
    }

    fn blank() -> Self {
        Self {
            kind: FormLineKind::Blank,
            focused: false,
        }
    }

    /// Focus marker or matching indentation
    pub fn marker(&self) -> &'static str {
        if self.focused {
            FOCUS_MARKER
        } else {
            "  "
        }
    }

    /// Label padded to `label_width` columns
    pub fn padded_label(label: &str, label_width: usize) -> String {
        let padding = label_width.saturating_sub(UnicodeWidthStr::width(label));
        format!("{label}{}", " ".repeat(padding))
    }

    /// Input value framed in its box
    pub fn input_box(value: &str) -> String {
        let padding = INPUT_WIDTH.saturating_sub(UnicodeWidthStr::width(value));
        format!("[{value}{}]", " ".repeat(padding))
    }

    pub fn button(label: &str) -> String {
        format!("[ {label} ]")
    }

    /// Uncolored rendering of the line
    pub fn to_plain_string(&self, label_width: usize) -> String {
        match &self.kind {
            FormLineKind::Heading(text) => text.clone(),
            FormLineKind::Blank => String::new(),
            FormLineKind::Input {
                label,
                value,
                error,
            } => {
                let mut line = format!(
                    "{}{} {}",
                    self.marker(),
                    Self::padded_label(label, label_width),
                    Self::input_box(value)
                );
                if let Some(error) = error {
                    line.push_str(&format!(" ✗ {error}"));
                }
                line
            }
            FormLineKind::Button { label, .. } => {
                format!("{}{}", self.marker(), Self::button(label))
            }
        }
    }
}

fn input_line(view_model: &ViewModel, path: FieldPath, label: String) -> FormLine {
    let draft = view_model.draft();
    FormLine {
        kind: FormLineKind::Input {
            label,
            value: draft.raw_text(path).unwrap_or_default().to_string(),
            error: draft.field_error(path).map(|e| e.to_string()),
        },
        focused: view_model.focused() == FocusTarget::Field(path),
    }
}

fn button_line(view_model: &ViewModel, target: FocusTarget, label: &str, enabled: bool) -> FormLine {
    FormLine {
        kind: FormLineKind::Button {
            label: label.to_string(),
            enabled,
        },
        focused: view_model.focused() == target,
    }
}

/// Lines of the form in screen order
pub fn form_lines(view_model: &ViewModel) -> Vec<FormLine> {
    let mut lines = vec![FormLine::heading(APP_TITLE), FormLine::blank()];

    for field in [ScalarField::ArrivalRate, ScalarField::SimulationTime] {
        lines.push(input_line(
            view_model,
            FieldPath::Scalar(field),
            field.label().to_string(),
        ));
    }

    lines.push(FormLine::blank());
    lines.push(FormLine::heading(STATIONS_HEADING));

    let station_count = view_model.draft().station_count();
    for index in 0..station_count {
        lines.push(input_line(
            view_model,
            FieldPath::station(index, StationField::ServiceRate),
            format!("Station {} {}", index + 1, StationField::ServiceRate.label()),
        ));
        lines.push(input_line(
            view_model,
            FieldPath::station(index, StationField::ServerCount),
            StationField::ServerCount.label().to_string(),
        ));
        if station_count > 1 {
            lines.push(button_line(
                view_model,
                FocusTarget::RemoveStation(index),
                REMOVE_STATION_LABEL,
                true,
            ));
        }
    }

    lines.push(button_line(
        view_model,
        FocusTarget::AddStation,
        ADD_STATION_LABEL,
        true,
    ));
    lines.push(FormLine::blank());
    lines.push(button_line(
        view_model,
        FocusTarget::Submit,
        view_model.submit_label(),
        view_model.is_submit_enabled(),
    ));

    lines
}

/// Widest input label, for column alignment
pub fn label_width(lines: &[FormLine]) -> usize {
    lines
        .iter()
        .filter_map(|line| match &line.kind {
            FormLineKind::Input { label, .. } => Some(UnicodeWidthStr::width(label.as_str())),
            _ => None,
        })
        .max()
        .unwrap_or(0)
}

/// Plain-text rendering of the whole form
pub fn render_form(view_model: &ViewModel) -> Vec<String> {
    let lines = form_lines(view_model);
    let width = label_width(&lines);
    lines
        .iter()
        .map(|line| line.to_plain_string(width))
        .collect()
}
