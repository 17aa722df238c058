//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands suggest, the controller decides and applies them to the ViewModel.

/// Events that commands can produce to request changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEvent {
    /// Move focus to the next control
    FocusNextRequested,

    /// Move focus to the previous control
    FocusPreviousRequested,

    /// Append a character to the focused input
    CharInsertRequested { ch: char },

    /// Remove the last character of the focused input
    CharDeleteRequested,

    /// Append a station with default values
    AddStationRequested,

    /// Remove a station; `None` means the focused one
    RemoveStationRequested { index: Option<usize> },

    /// Validate the form and start a simulation
    SubmitRequested,

    /// Request application quit
    QuitRequested,
}
