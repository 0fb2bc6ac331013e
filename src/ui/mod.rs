// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the chord trainer.
//!
//! Provides a ratatui-based interface with the chord prompt, the piano
//! keyboard view, and a status bar. The UI only reads session state; all
//! mutation stays in the session.

mod keyboard;

pub use keyboard::KeyboardWidget;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::trainer::TrainerSession;

/// Key event result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action needed
    None,
    /// Quit the application
    Quit,
    /// Prompt a random chord
    NextChord,
    /// Prompt the chord on a specific scale degree (1-7)
    PromptDegree(u8),
    /// Toggle help
    ToggleHelp,
}

/// Terminal UI application
pub struct App {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    frame_rate: u32,
    running: bool,
    show_help: bool,
}

impl App {
    /// Create the app and take over the terminal
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            frame_rate: 60,
            running: true,
            show_help: false,
        })
    }

    /// Set frame rate
    pub fn set_frame_rate(&mut self, fps: u32) {
        self.frame_rate = fps.clamp(1, 120);
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the app
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Handle a key event, applying the app-level side effects
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        let action = key_action(code, modifiers);
        match action {
            KeyAction::Quit => self.quit(),
            KeyAction::ToggleHelp => self.show_help = !self.show_help,
            _ => {}
        }
        action
    }

    /// Poll for events with timeout
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        let timeout = Duration::from_millis(1000 / self.frame_rate as u64);
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the UI from the current session state
    pub fn draw(&mut self, session: &TrainerSession, device: Option<&str>) -> io::Result<()> {
        let show_help = self.show_help;

        self.terminal.draw(|frame| {
            let area = frame.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),                        // Prompt
                    Constraint::Length(keyboard::WHITE_KEY_HEIGHT + 2), // Keyboard
                    Constraint::Min(0),                           // Padding
                    Constraint::Length(1),                        // Status bar
                ])
                .split(area);

            render_prompt(frame, chunks[0], session, device);
            render_keyboard(frame, chunks[1], session);
            render_status_bar(frame, chunks[3]);

            if show_help {
                render_help_overlay(frame, area);
            }
        })?;

        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Map a key event to its action. Pure; [`App::handle_key`] applies the
/// quit/help side effects.
fn key_action(code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
    match (code, modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE)
        | (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

        // New prompt
        (KeyCode::Char(' '), KeyModifiers::NONE) | (KeyCode::Char('n'), KeyModifiers::NONE) => {
            KeyAction::NextChord
        }

        // Chord on an explicit scale degree (1-7)
        (KeyCode::Char(c @ '1'..='7'), KeyModifiers::NONE) => {
            KeyAction::PromptDegree((c as u8) - b'0')
        }

        // Help
        (KeyCode::Char('?'), _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
            KeyAction::ToggleHelp
        }

        _ => KeyAction::None,
    }
}

/// Render the chord prompt header
fn render_prompt(frame: &mut Frame, area: Rect, session: &TrainerSession, device: Option<&str>) {
    let block = Block::default().borders(Borders::ALL).title(" Play ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(16), // Chord label
            Constraint::Length(16), // Match count
            Constraint::Min(0),     // Device
        ])
        .split(inner);

    let chord_text = match session.prompt() {
        Some(prompt) => Span::styled(
            prompt.label(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("press n", Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(chord_text), chunks[0]);

    let matched = Paragraph::new(format!("matched: {}", session.matched()))
        .style(Style::default().fg(Color::Green));
    frame.render_widget(matched, chunks[1]);

    let device_text = match device {
        Some(name) => Span::styled(name, Style::default().fg(Color::Magenta)),
        None => Span::styled("no MIDI device", Style::default().fg(Color::Red)),
    };
    frame.render_widget(Paragraph::new(device_text), chunks[2]);
}

/// Render the keyboard section
fn render_keyboard(frame: &mut Frame, area: Rect, session: &TrainerSession) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(KeyboardWidget::new(session.keys()), inner);
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect) {
    let text = Span::styled(
        " n/Space: next chord | 1-7: chord on degree | h: Help | q: Quit",
        Style::default().fg(Color::DarkGray),
    );
    frame.render_widget(Paragraph::new(text), area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = 46.min(area.width.saturating_sub(4));
    let height = 12.min(area.height.saturating_sub(4));
    let x = (area.width - width) / 2;
    let y = (area.height - height) / 2;
    let help_area = Rect::new(x, y, width, height);

    frame.render_widget(
        Block::default().style(Style::default().bg(Color::Black)),
        help_area,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);

    let help_text = vec![
        Line::from(Span::styled(
            "Trainer",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  n/Space    Prompt a random chord"),
        Line::from("  1-7        Chord on that scale degree"),
        Line::from(""),
        Line::from(Span::styled(
            "Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  cyan       expected"),
        Line::from("  green      expected and held"),
        Line::from("  red        held, not in the chord"),
        Line::from(""),
        Line::from("  h/?        Toggle help"),
        Line::from("  q/Ctrl+c   Quit"),
    ];

    frame.render_widget(Paragraph::new(help_text), inner);
}
