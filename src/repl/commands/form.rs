//! # Form Commands
//!
//! Navigation, text entry and station management on the simulation form.
//!
//! | Key                  | Action                               |
//! |----------------------|--------------------------------------|
//! | Tab / Down           | focus next control                   |
//! | Shift-Tab / Up       | focus previous control               |
//! | printable character  | append to focused input              |
//! | Backspace            | delete last character                |
//! | Enter                | press focused button, or submit      |
//! | Ctrl-N               | add station                          |
//! | Ctrl-D               | remove focused station               |

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::repl::events::FocusTarget;

fn is_ctrl(event: &KeyEvent, ch: char) -> bool {
    event.code == KeyCode::Char(ch) && event.modifiers.contains(KeyModifiers::CONTROL)
}

/// Move focus forward (Tab, Down)
pub struct FocusNextCommand;

impl Command for FocusNextCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Tab => !event.modifiers.contains(KeyModifiers::SHIFT),
            KeyCode::Down => true,
            _ => false,
        }
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::FocusNextRequested])
    }

    fn name(&self) -> &'static str {
        "FocusNext"
    }
}

/// Move focus backward (Shift-Tab, Up)
pub struct FocusPreviousCommand;

impl Command for FocusPreviousCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::BackTab | KeyCode::Up => true,
            KeyCode::Tab => event.modifiers.contains(KeyModifiers::SHIFT),
            _ => false,
        }
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::FocusPreviousRequested])
    }

    fn name(&self) -> &'static str {
        "FocusPrevious"
    }
}

/// Type into the focused input
pub struct InsertCharCommand;

impl Command for InsertCharCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char(ch) if !ch.is_control())
            && !event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            && context.is_editing()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        match event.code {
            KeyCode::Char(ch) => Ok(vec![CommandEvent::CharInsertRequested { ch }]),
            _ => Ok(vec![]),
        }
    }

    fn name(&self) -> &'static str {
        "InsertChar"
    }
}

/// Delete the last character of the focused input (Backspace)
pub struct DeleteCharCommand;

impl Command for DeleteCharCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        event.code == KeyCode::Backspace && context.is_editing()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::CharDeleteRequested])
    }

    fn name(&self) -> &'static str {
        "DeleteChar"
    }
}

/// Append a station (Ctrl-N)
pub struct AddStationCommand;

impl Command for AddStationCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        is_ctrl(event, 'n')
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::AddStationRequested])
    }

    fn name(&self) -> &'static str {
        "AddStation"
    }
}

/// Remove the station under focus (Ctrl-D)
pub struct RemoveStationCommand;

impl Command for RemoveStationCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        is_ctrl(event, 'd')
            && context.state.station_count > 1
            && context.state.focused.station_index().is_some()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::RemoveStationRequested { index: None }])
    }

    fn name(&self) -> &'static str {
        "RemoveStation"
    }
}

/// Enter: press the focused button, otherwise submit the form
pub struct ActivateFocusedCommand;

impl Command for ActivateFocusedCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        if event.code != KeyCode::Enter {
            return false;
        }
        match context.state.focused {
            FocusTarget::AddStation | FocusTarget::RemoveStation(_) => true,
            FocusTarget::Field(_) | FocusTarget::Submit => !context.state.is_loading,
        }
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let event = match context.state.focused {
            FocusTarget::AddStation => CommandEvent::AddStationRequested,
            FocusTarget::RemoveStation(index) => CommandEvent::RemoveStationRequested {
                index: Some(index),
            },
            FocusTarget::Field(_) | FocusTarget::Submit => CommandEvent::SubmitRequested,
        };
        Ok(vec![event])
    }

    fn name(&self) -> &'static str {
        "ActivateFocused"
    }
}
