//! # View Events
//!
//! Events that tell the renderer which part of the screen is out of date.

/// Events emitted when view updates are needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Full screen redraw required (terminal resize, first frame)
    FullRedrawRequired,

    /// Form inputs or buttons changed
    FormRedrawRequired,

    /// Result, error or loading indicator changed
    ResultsRedrawRequired,

    /// Status bar needs updating
    StatusBarUpdateRequired,
}

impl ViewEvent {
    /// Whether handling this event means redrawing the whole frame
    pub fn needs_full_frame(&self) -> bool {
        !matches!(self, ViewEvent::StatusBarUpdateRequired)
    }
}
