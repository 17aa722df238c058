//! # Terminal Renderer
//!
//! Draws the form, the results section and the status bar onto a
//! [`RenderStream`]. The frame is laid out top to bottom:
//!
//! ```text
//! Queue Simulation
//!   Arrival Rate (λ)   [0.8         ]
//!   ...
//!   [ Run Simulation ]
//!
//! Simulation Results            <- or the error message
//! Metrics
//! Average Queue Length (L): 3.46
//! ...bar chart...
//!                         status bar (last row)
//! ```
//!
//! The results section stays pinned under the form; when both do not fit,
//! the form scrolls in the rows left above it.

use crate::repl::events::ViewEvent;
use crate::repl::io::RenderStream;
use crate::repl::view_models::ViewModel;
use crate::repl::views::form_renderer::{self, FormLine, FormLineKind};
use crate::repl::views::results_renderer::{metric_lines, BarChart, ChartRow};
use anyhow::Result;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::Write;
use unicode_width::UnicodeWidthStr;

pub const RESULTS_HEADING: &str = "Simulation Results";
pub const METRICS_HEADING: &str = "Metrics";

/// Form rows kept on screen while results are shown
const MIN_FORM_ROWS: usize = 3;

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! queue_term {
    ($($arg:expr),* $(,)?) => {
        queue!($($arg),*).map_err(anyhow::Error::from)
    };
}

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal for drawing
    fn initialize(&mut self) -> Result<()>;

    /// Redraw the whole frame
    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    /// Redraw only the status bar
    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()>;

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ViewModel) -> Result<()>;

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

/// One row of the frame body
#[derive(Debug, Clone)]
enum ScreenLine {
    Form(FormLine),
    Heading(String),
    Text(String),
    Error(String),
    Legend(String),
    Chart(ChartRow),
    Muted(String),
    Blank,
}

/// Terminal view renderer over any render stream
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn render_stream(&self) -> &RS {
        &self.render_stream
    }

    fn results_lines(&self, view_model: &ViewModel) -> Vec<ScreenLine> {
        let mut lines = Vec::new();

        if let Some(error) = view_model.current_error() {
            lines.push(ScreenLine::Blank);
            // Shown exactly as the service worded it
            lines.push(ScreenLine::Error(error.to_string()));
        }

        if let Some(result) = view_model.current_result() {
            lines.push(ScreenLine::Blank);
            lines.push(ScreenLine::Heading(RESULTS_HEADING.to_string()));
            lines.push(ScreenLine::Heading(METRICS_HEADING.to_string()));
            lines.extend(metric_lines(result).into_iter().map(ScreenLine::Text));
            lines.push(ScreenLine::Blank);

            let chart = BarChart::from_result(result);
            let width = self.terminal_size.0 as usize;
            lines.push(ScreenLine::Heading(chart.title.to_string()));
            lines.push(ScreenLine::Legend(chart.series_label.to_string()));
            lines.extend(chart.rows(width).into_iter().map(ScreenLine::Chart));
            lines.extend(chart.axis_lines(width).into_iter().map(ScreenLine::Muted));
        }

        lines
    }

    /// Index of the first body line so the focused control stays visible
    fn scroll_offset(focused_row: Option<usize>, body_height: usize) -> usize {
        match focused_row {
            Some(row) if body_height > 0 && row >= body_height => row + 1 - body_height,
            _ => 0,
        }
    }

    /// Rows given to the form viewport and to the results below it
    ///
    /// Results stay pinned under the form and the form scrolls in what is
    /// left, keeping at least `MIN_FORM_ROWS` of it when the form has that
    /// many. Results are cut from the bottom (chart first) only when even
    /// that does not fit.
    fn split_body(form_len: usize, results_len: usize, body_height: usize) -> (usize, usize) {
        let min_form = form_len.min(MIN_FORM_ROWS).min(body_height);
        let results_height = results_len.min(body_height - min_form);
        let form_height = form_len.min(body_height - results_height);
        (form_height, results_height)
    }

    fn render_line(&mut self, line: &ScreenLine, label_width: usize) -> Result<()> {
        let out = &mut self.render_stream;
        match line {
            ScreenLine::Blank => {}
            ScreenLine::Heading(text) => {
                queue_term!(
                    out,
                    SetAttribute(Attribute::Bold),
                    Print(text),
                    SetAttribute(Attribute::Reset)
                )?;
            }
            ScreenLine::Text(text) => queue_term!(out, Print(text))?,
            ScreenLine::Error(text) => {
                queue_term!(out, SetForegroundColor(Color::Red), Print(text), ResetColor)?;
            }
            ScreenLine::Muted(text) => {
                queue_term!(
                    out,
                    SetForegroundColor(Color::AnsiValue(240)),
                    Print(text),
                    ResetColor
                )?;
            }
            ScreenLine::Legend(label) => {
                queue_term!(out, Print("■ "), Print(label))?;
            }
            ScreenLine::Chart(row) => {
                queue_term!(
                    out,
                    Print(&row.label),
                    Print(" │"),
                    SetForegroundColor(row.color.terminal_color()),
                    Print(&row.bar),
                    ResetColor,
                    Print(" "),
                    Print(&row.value)
                )?;
            }
            ScreenLine::Form(form_line) => Self::render_form_line(out, form_line, label_width)?,
        }
        Ok(())
    }

    fn render_form_line(out: &mut RS, line: &FormLine, label_width: usize) -> Result<()> {
        match &line.kind {
            FormLineKind::Heading(text) => {
                queue_term!(
                    out,
                    SetAttribute(Attribute::Bold),
                    Print(text),
                    SetAttribute(Attribute::Reset)
                )?;
            }
            FormLineKind::Blank => {}
            FormLineKind::Input {
                label,
                value,
                error,
            } => {
                let box_color = if error.is_some() {
                    Color::Red
                } else if line.focused {
                    Color::Cyan
                } else {
                    Color::Reset
                };
                queue_term!(
                    out,
                    SetForegroundColor(Color::Cyan),
                    Print(line.marker()),
                    ResetColor,
                    Print(FormLine::padded_label(label, label_width)),
                    Print(" "),
                    SetForegroundColor(box_color),
                    Print(FormLine::input_box(value)),
                    ResetColor
                )?;
                if let Some(error) = error {
                    queue_term!(
                        out,
                        SetForegroundColor(Color::Red),
                        Print(format!(" ✗ {error}")),
                        ResetColor
                    )?;
                }
            }
            FormLineKind::Button { label, enabled } => {
                let color = if !enabled {
                    Color::AnsiValue(240)
                } else if line.focused {
                    Color::Cyan
                } else {
                    Color::Reset
                };
                queue_term!(
                    out,
                    SetForegroundColor(Color::Cyan),
                    Print(line.marker()),
                    SetForegroundColor(color),
                    Print(FormLine::button(label)),
                    ResetColor
                )?;
            }
        }
        Ok(())
    }

    /// Cursor column at the end of a focused input's text
    fn input_cursor_column(line: &FormLine, label_width: usize) -> Option<u16> {
        match &line.kind {
            FormLineKind::Input { value, .. } if line.focused => {
                // marker + label + " [" + value
                let column = 2 + label_width + 2 + UnicodeWidthStr::width(value.as_str());
                Some(column as u16)
            }
            _ => None,
        }
    }

    /// Left and right halves of the status bar, without styling
    fn status_parts(view_model: &ViewModel) -> (Option<(Color, String)>, String) {
        let status_line = view_model.status_line();

        let left = if let Some(message) = status_line.status_message() {
            Some((Color::Yellow, message.to_string()))
        } else if view_model.is_loading() {
            Some((Color::Yellow, "● Simulating...".to_string()))
        } else if let Some(duration_ms) = status_line.http_status().duration_ms {
            let duration = std::time::Duration::from_millis(duration_ms);
            let duration_text = humantime::format_duration(duration).to_string();
            let (color, status) = match status_line.http_status().status_code {
                Some(code @ 200..=299) => (Color::Green, code.to_string()),
                Some(code) => (Color::Red, code.to_string()),
                None => (Color::Red, "no response".to_string()),
            };
            Some((color, format!("● {status} | {duration_text}")))
        } else {
            None
        };

        let right = if status_line.server_url().is_empty() {
            status_line.profile_name().to_string()
        } else {
            format!("{} | {}", status_line.profile_name(), status_line.server_url())
        };

        (left, right)
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.clear_screen()?;
        self.render_stream.hide_cursor()?;
        Ok(())
    }

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;

        let form_lines = form_renderer::form_lines(view_model);
        let label_width = form_renderer::label_width(&form_lines);
        let focused_row = form_lines.iter().position(|line| line.focused);
        let cursor_column = focused_row
            .and_then(|row| Self::input_cursor_column(&form_lines[row], label_width));

        let results = self.results_lines(view_model);

        // Last row belongs to the status bar
        let body_height = self.terminal_size.1.saturating_sub(1) as usize;
        let (form_height, results_height) =
            Self::split_body(form_lines.len(), results.len(), body_height);
        let offset = Self::scroll_offset(focused_row, form_height);

        let visible = form_lines
            .into_iter()
            .map(ScreenLine::Form)
            .skip(offset)
            .take(form_height)
            .chain(results.into_iter().take(results_height));
        for (row, line) in visible.enumerate() {
            self.render_stream.move_cursor(0, row as u16)?;
            self.render_line(&line, label_width)?;
            queue_term!(self.render_stream, Print("\r\n"))?;
        }

        self.render_status_bar(view_model)?;

        match (focused_row, cursor_column) {
            (Some(row), Some(column)) if row >= offset && row - offset < form_height => {
                self.render_stream
                    .move_cursor(column, (row - offset) as u16)?;
                self.render_stream.show_cursor()?;
            }
            _ => self.render_stream.hide_cursor()?,
        }

        self.render_stream.flush().map_err(anyhow::Error::from)?;
        Ok(())
    }

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let (width, height) = self.terminal_size;
        let status_row = height.saturating_sub(1);
        let (left, right) = Self::status_parts(view_model);

        self.render_stream.move_cursor(0, status_row)?;
        self.render_stream.clear_line()?;

        let left_width = left
            .as_ref()
            .map(|(_, text)| UnicodeWidthStr::width(text.as_str()))
            .unwrap_or(0);
        if let Some((color, text)) = left {
            queue_term!(
                self.render_stream,
                SetForegroundColor(color),
                Print(text),
                ResetColor
            )?;
        }

        let right_width = UnicodeWidthStr::width(right.as_str());
        let padding = (width as usize).saturating_sub(left_width + right_width);
        // Right part is dropped rather than wrapped on narrow terminals
        if padding > 0 {
            queue_term!(
                self.render_stream,
                Print(" ".repeat(padding)),
                SetForegroundColor(Color::AnsiValue(240)),
                Print(right),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ViewModel) -> Result<()> {
        if event.needs_full_frame() {
            self.render_full(view_model)
        } else {
            self.render_status_bar(view_model)?;
            self.render_stream.flush().map_err(anyhow::Error::from)
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        self.render_stream.flush().map_err(anyhow::Error::from)?;
        Ok(())
    }
}
