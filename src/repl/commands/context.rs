//! # Command Context
//!
//! Read-only view of the state commands need for relevancy checks.

use crate::repl::events::FocusTarget;
use crate::repl::view_models::ViewModel;

/// Read-only snapshot of ViewModel state for commands
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModelSnapshot {
    pub focused: FocusTarget,
    pub is_loading: bool,
    pub station_count: usize,
}

impl ViewModelSnapshot {
    /// Create snapshot from current ViewModel state
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self {
            focused: view_model.focused(),
            is_loading: view_model.is_loading(),
            station_count: view_model.draft().station_count(),
        }
    }
}

/// Base context available to all commands
pub struct CommandContext {
    pub state: ViewModelSnapshot,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot) -> Self {
        Self { state }
    }

    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self::new(ViewModelSnapshot::from_view_model(view_model))
    }

    /// Whether the focus is on an editable input
    pub fn is_editing(&self) -> bool {
        self.state.focused.field().is_some()
    }
}
