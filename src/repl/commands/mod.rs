//! # Command Pattern
//!
//! Commands map key events to [`CommandEvent`]s. They never touch the
//! ViewModel directly: the controller applies the events it receives.
//!
//! The registry asks each command in turn whether it is relevant and
//! executes the first match.

use anyhow::Result;
use crossterm::event::KeyEvent;

pub mod app;
pub mod context;
pub mod events;
pub mod form;

pub use app::AppTerminateCommand;
pub use context::{CommandContext, ViewModelSnapshot};
pub use events::CommandEvent;
pub use form::{
    ActivateFocusedCommand, AddStationCommand, DeleteCharCommand, FocusNextCommand,
    FocusPreviousCommand, InsertCharCommand, RemoveStationCommand,
};

/// A key binding
pub trait Command: Send + Sync {
    /// Whether this command handles `event` in the current state
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events describing what should happen
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Name for debugging and logging
    fn name(&self) -> &'static str;
}

/// Ordered set of commands; the first relevant one wins
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };
        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Control chords first so they never reach character insertion
        self.add_command(Box::new(AppTerminateCommand));
        self.add_command(Box::new(AddStationCommand));
        self.add_command(Box::new(RemoveStationCommand));
        self.add_command(Box::new(FocusNextCommand));
        self.add_command(Box::new(FocusPreviousCommand));
        self.add_command(Box::new(ActivateFocusedCommand));
        self.add_command(Box::new(DeleteCharCommand));
        self.add_command(Box::new(InsertCharCommand));
    }

    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Run the first relevant command for `event`
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        match self
            .commands
            .iter()
            .find(|command| command.is_relevant(context, &event))
        {
            Some(command) => {
                tracing::debug!("Key {:?} handled by {}", event, command.name());
                command.execute(event, context)
            }
            None => {
                tracing::trace!("No command for key {:?}", event);
                Ok(vec![])
            }
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::events::{FieldPath, FocusTarget, ScalarField};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn context(focused: FocusTarget, is_loading: bool) -> CommandContext {
        CommandContext::new(ViewModelSnapshot {
            focused,
            is_loading,
            station_count: 2,
        })
    }

    fn on_arrival_rate() -> CommandContext {
        context(
            FocusTarget::Field(FieldPath::Scalar(ScalarField::ArrivalRate)),
            false,
        )
    }

    #[test]
    fn registry_should_route_ctrl_c_to_quit_not_insert() {
        let registry = CommandRegistry::new();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        let events = registry.process_event(event, &on_arrival_rate()).unwrap();

        assert_eq!(events, vec![CommandEvent::QuitRequested]);
    }

    #[test]
    fn registry_should_route_plain_chars_to_insert() {
        let registry = CommandRegistry::new();
        let event = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);

        let events = registry.process_event(event, &on_arrival_rate()).unwrap();

        assert_eq!(events, vec![CommandEvent::CharInsertRequested { ch: '5' }]);
    }

    #[test]
    fn registry_should_route_ctrl_n_to_add_station() {
        let registry = CommandRegistry::new();
        let event = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);

        let events = registry.process_event(event, &on_arrival_rate()).unwrap();

        assert_eq!(events, vec![CommandEvent::AddStationRequested]);
    }

    struct RefreshCommand;

    impl Command for RefreshCommand {
        fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
            event.code == KeyCode::F(5)
        }

        fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
            Ok(vec![CommandEvent::SubmitRequested])
        }

        fn name(&self) -> &'static str {
            "Refresh"
        }
    }

    #[test]
    fn added_command_should_handle_keys_defaults_ignore() {
        let mut registry = CommandRegistry::new();
        let defaults = registry.command_count();

        registry.add_command(Box::new(RefreshCommand));

        assert_eq!(registry.command_count(), defaults + 1);
        let events = registry
            .process_event(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE), &on_arrival_rate())
            .unwrap();
        assert_eq!(events, vec![CommandEvent::SubmitRequested]);
    }

    #[test]
    fn registry_should_ignore_unbound_keys() {
        let registry = CommandRegistry::new();
        let event = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);

        let events = registry.process_event(event, &on_arrival_rate()).unwrap();

        assert!(events.is_empty());
    }

    #[test]
    fn registry_should_not_submit_while_loading() {
        let registry = CommandRegistry::new();
        let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);

        let events = registry
            .process_event(event, &context(FocusTarget::Submit, true))
            .unwrap();

        assert!(events.is_empty());
    }
}
