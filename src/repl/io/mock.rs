//! # Mock I/O Implementations for Testing
//!
//! Scripted event input and a recording render stream, so the controller
//! and renderer can be exercised without a terminal.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::Event;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Pre-programmed event source
pub struct MockEventStream {
    events: VecDeque<Event>,
    poll_always_true: bool,
}

impl MockEventStream {
    /// Stream that reports readiness until its events run out
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
            poll_always_true: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Make `poll` report readiness even when no events are queued
    pub fn set_poll_behavior(&mut self, always_true: bool) {
        self.poll_always_true = always_true;
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(self.poll_always_true || !self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    MoveCursor(u16, u16),
    ClearLine,
    HideCursor,
    ShowCursor,
    GetSize,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Write(Vec<u8>),
    Flush,
}

#[derive(Debug, Default)]
struct MockScreen {
    commands: Vec<RenderCommand>,
    buffer: Vec<u8>,
    cursor_visible: bool,
    raw_mode: bool,
    alternate_screen: bool,
}

/// Render stream that records every operation
///
/// Clones share the same recording, so a test can keep a handle after
/// moving the stream into a renderer.
#[derive(Clone)]
pub struct MockRenderStream {
    screen: Arc<Mutex<MockScreen>>,
    terminal_size: TerminalSize,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            screen: Arc::new(Mutex::new(MockScreen {
                cursor_visible: true,
                ..MockScreen::default()
            })),
            terminal_size: size,
        }
    }

    fn screen(&self) -> MutexGuard<'_, MockScreen> {
        // A panic while holding the lock only happens inside a failing test
        self.screen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, command: RenderCommand) {
        self.screen().commands.push(command);
    }

    pub fn get_commands(&self) -> Vec<RenderCommand> {
        self.screen().commands.clone()
    }

    pub fn clear_commands(&mut self) {
        self.screen().commands.clear();
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.screen().commands.contains(command)
    }

    /// Everything written since the last clear, escape sequences included
    pub fn get_buffer_string(&self) -> String {
        String::from_utf8_lossy(&self.screen().buffer).to_string()
    }

    /// Everything written since the last clear, without escape sequences
    pub fn get_plain_text(&self) -> String {
        strip_ansi(&self.get_buffer_string())
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.screen().cursor_visible
    }

    pub fn is_raw_mode(&self) -> bool {
        self.screen().raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.screen().alternate_screen
    }
}

/// Remove CSI escape sequences such as colors and cursor moves
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Parameters run until the final byte in '@'..='~'
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
        } else {
            plain.push(ch);
        }
    }
    plain
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut screen = self.screen();
        screen.buffer.extend_from_slice(buf);
        screen.commands.push(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut screen = self.screen();
        screen.commands.push(RenderCommand::ClearScreen);
        screen.buffer.clear();
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        self.record(RenderCommand::ClearLine);
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::HideCursor);
        self.screen().cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::ShowCursor);
        self.screen().cursor_visible = true;
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        self.record(RenderCommand::GetSize);
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::EnterAlternateScreen);
        self.screen().alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::LeaveAlternateScreen);
        self.screen().alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::EnableRawMode);
        self.screen().raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::DisableRawMode);
        self.screen().raw_mode = false;
        Ok(())
    }
}

impl Default for MockEventStream {
    fn default() -> Self {
        Self::empty()
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}
