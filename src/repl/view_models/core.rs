//! # Core ViewModel Structure
//!
//! Contains the main ViewModel struct and basic initialization logic.
//! This is the root coordinator: it owns the form draft, the simulation
//! store and the status line, and the specialized managers extend it.

use crate::repl::events::{FieldPath, FocusTarget, ModelEvent, ScalarField, ViewEvent};
use crate::repl::models::{SimulationDraft, StatusLine};
use crate::repl::view_models::simulation_store::SimulationStore;

/// Main ViewModel that coordinates the form, the request lifecycle and the view
pub struct ViewModel {
    // Form state
    pub(super) draft: SimulationDraft,
    pub(super) focus: FocusTarget,

    // Request lifecycle
    pub(super) store: SimulationStore,

    // Display state
    pub(super) status_line: StatusLine,
    pub(super) terminal_dimensions: (u16, u16), // (width, height)

    // Event management
    pub(super) pending_view_events: Vec<ViewEvent>,
    pub(super) pending_model_events: Vec<ModelEvent>,
}

impl ViewModel {
    /// Create new ViewModel with the default form
    pub fn new() -> Self {
        Self::with_draft(SimulationDraft::new())
    }

    /// Create a ViewModel whose form starts from `draft`
    pub fn with_draft(draft: SimulationDraft) -> Self {
        Self {
            draft,
            focus: FocusTarget::Field(FieldPath::Scalar(ScalarField::ArrivalRate)),
            store: SimulationStore::new(),
            status_line: StatusLine::new(),
            terminal_dimensions: (80, 24),
            pending_view_events: Vec::new(),
            pending_model_events: Vec::new(),
        }
    }

    pub fn draft(&self) -> &SimulationDraft {
        &self.draft
    }

    pub fn store(&self) -> &SimulationStore {
        &self.store
    }

    pub fn status_line(&self) -> &StatusLine {
        &self.status_line
    }

    /// Store profile information for display
    pub fn set_profile_info(&mut self, profile_name: String, server_url: String) {
        self.status_line.set_profile(profile_name, server_url);
        self.emit_view_event([ViewEvent::StatusBarUpdateRequired]);
    }

    /// Update terminal size
    pub fn update_terminal_size(&mut self, width: u16, height: u16) {
        self.terminal_dimensions = (width, height);
        self.emit_view_event([ViewEvent::FullRedrawRequired]);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_dimensions
    }

    /// Queue view events for the renderer
    pub(super) fn emit_view_event(&mut self, events: impl IntoIterator<Item = ViewEvent>) {
        for event in events {
            if !self.pending_view_events.contains(&event) {
                self.pending_view_events.push(event);
            }
        }
        tracing::trace!("Pending view events: {:?}", self.pending_view_events);
    }

    /// Record a model event describing a state change
    pub(super) fn emit_model_event(&mut self, event: ModelEvent) {
        tracing::debug!("Model event: {:?}", event);
        self.pending_model_events.push(event);
    }

    /// Collect and clear pending view events
    pub fn collect_pending_view_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.pending_view_events)
    }

    /// Collect and clear pending model events
    pub fn collect_pending_model_events(&mut self) -> Vec<ModelEvent> {
        std::mem::take(&mut self.pending_model_events)
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}
