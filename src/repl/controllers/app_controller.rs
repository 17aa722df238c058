//! # Application Controller
//!
//! Runs the event loop: key events go through the command registry, the
//! resulting command events are applied to the ViewModel, simulation
//! responses are drained from the service, and pending view events are
//! handed to the renderer.

use crate::cmd_args::CommandLineArgs;
use crate::config::{self, SimulationProfile};
use crate::repl::{
    commands::{CommandContext, CommandEvent, CommandRegistry},
    events::{ModelEvent, ViewEvent},
    io::{EventStream, RenderStream},
    models::SimulationDraft,
    services::SimulationService,
    view_models::ViewModel,
    views::{TerminalRenderer, ViewRenderer},
};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The main application controller that orchestrates the MVVM pattern
pub struct AppController<ES: EventStream, RS: RenderStream> {
    view_model: ViewModel,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    simulation_service: SimulationService,
    event_stream: ES,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create a controller configured from the command line
    pub fn with_io_streams(
        cmd_args: CommandLineArgs,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let profile_name = cmd_args.profile();
        let mut profile = config::load_profile(profile_name, &config::get_profile_path())?;
        if let Some(server) = cmd_args.server() {
            tracing::debug!("Server overridden on command line: {}", server);
            profile.set_server(server);
        }

        Self::with_profile(
            profile_name,
            &profile,
            cmd_args.initial_draft()?,
            event_stream,
            render_stream,
        )
    }

    /// Create a controller for an already resolved profile
    pub fn with_profile(
        profile_name: &str,
        profile: &SimulationProfile,
        draft: SimulationDraft,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let mut view_model = ViewModel::with_draft(draft);
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;
        let simulation_service = SimulationService::new(profile)?;

        // Synchronize view model with actual terminal size
        let (width, height) = view_renderer.terminal_size();
        view_model.update_terminal_size(width, height);
        view_model.set_profile_info(profile_name.to_string(), profile.simulate_url());

        Ok(Self {
            view_model,
            view_renderer,
            command_registry: CommandRegistry::new(),
            simulation_service,
            event_stream,
            should_quit: false,
        })
    }

    pub fn view_model(&self) -> &ViewModel {
        &self.view_model
    }

    pub fn renderer(&self) -> &TerminalRenderer<RS> {
        &self.view_renderer
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the main application loop until quit
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;
        self.view_model.collect_pending_view_events();
        self.view_renderer.render_full(&self.view_model)?;

        let result = self.event_loop().await;

        // Restore the terminal even when the loop failed
        self.view_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            if self.event_stream.poll(POLL_INTERVAL)? {
                let event = self.event_stream.read()?;
                self.handle_event(event)?;
            }

            self.drain_responses()?;

            // Let spawned requests make progress on single-threaded runtimes
            tokio::task::yield_now().await;
        }
        Ok(())
    }

    /// Handle one terminal event and redraw what changed
    pub fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key_event(key_event)?;
            }
            Event::Resize(width, height) => {
                self.view_model.update_terminal_size(width, height);
                self.view_renderer.update_size(width, height);
            }
            _ => {}
        }

        if !self.should_quit {
            self.render_pending()?;
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        tracing::debug!("Received key event: {:?}", key_event);

        let context = CommandContext::from_view_model(&self.view_model);
        let events = self.command_registry.process_event(key_event, &context)?;
        if !events.is_empty() {
            tracing::debug!("Command events generated: {:?}", events);
        }
        for event in events {
            self.apply_command_event(event);
        }
        Ok(())
    }

    /// Apply a command event to the view model
    fn apply_command_event(&mut self, event: CommandEvent) {
        match event {
            CommandEvent::FocusNextRequested => self.view_model.focus_next(),
            CommandEvent::FocusPreviousRequested => self.view_model.focus_previous(),
            CommandEvent::CharInsertRequested { ch } => {
                self.view_model.insert_char(ch);
            }
            CommandEvent::CharDeleteRequested => {
                self.view_model.delete_char();
            }
            CommandEvent::AddStationRequested => {
                self.view_model.add_station();
            }
            CommandEvent::RemoveStationRequested { index } => {
                match index {
                    Some(index) => self.view_model.remove_station(index),
                    None => self.view_model.remove_focused_station(),
                };
            }
            CommandEvent::SubmitRequested => {
                if let Some((seq, request)) = self.view_model.submit_simulation() {
                    self.simulation_service.execute_async(seq, request);
                }
            }
            CommandEvent::QuitRequested => {
                tracing::debug!("Quit requested");
                self.should_quit = true;
            }
        }
    }

    /// Apply every response that has arrived; returns how many there were
    pub fn drain_responses(&mut self) -> Result<usize> {
        let mut applied = 0;
        while let Some(message) = self.simulation_service.poll_response() {
            self.view_model.apply_simulation_response(message);
            applied += 1;
        }
        if applied > 0 {
            self.render_pending()?;
        }
        Ok(applied)
    }

    /// Wait for the next simulation response and apply it
    pub async fn wait_for_response(&mut self) -> Result<Option<ModelEvent>> {
        let Some(message) = self.simulation_service.next_response().await else {
            return Ok(None);
        };
        let event = self.view_model.apply_simulation_response(message);
        self.render_pending()?;
        Ok(Some(event))
    }

    /// Hand pending view events to the renderer, drawing a full frame at most once
    fn render_pending(&mut self) -> Result<()> {
        let view_events = self.view_model.collect_pending_view_events();
        // Model events are only consumed for logging here
        self.view_model.collect_pending_model_events();

        if view_events.iter().any(ViewEvent::needs_full_frame) {
            self.view_renderer
                .handle_view_event(&ViewEvent::FullRedrawRequired, &self.view_model)?;
        } else if !view_events.is_empty() {
            self.view_renderer
                .handle_view_event(&ViewEvent::StatusBarUpdateRequired, &self.view_model)?;
        }
        Ok(())
    }
}
