//! Main application state for the demo host.
//!
//! The app mounts a single [`MultiSelector`], routes key events to it while
//! it has focus, and applies background selector messages drained from the
//! task channel by the event loop.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace};

use crate::config::Settings;
use crate::events::Event;
use crate::selector::{OptionSource, SelectorConfig, SelectorMessage, SelectorTasks};
use crate::ui::{ChangeEvent, MultiSelector, SelectorAction};

/// The demo application.
pub struct App {
    /// The mounted selector.
    selector: MultiSelector,
    /// Whether key events go to the selector.
    focused: bool,
    /// Whether the application should quit.
    should_quit: bool,
    /// Most recent accepted selection change.
    last_change: Option<ChangeEvent>,
}

impl App {
    /// Create the application with a selector over `source`.
    ///
    /// The selector starts focused programmatically, which does not trigger
    /// the focus fetch; pressing Tab to focus it does.
    pub fn new(settings: &Settings, source: Arc<dyn OptionSource>, tasks: SelectorTasks) -> Self {
        let config = SelectorConfig::from_settings(settings).with_class_name("Languages");
        Self::with_selector(MultiSelector::new(config, source, tasks))
    }

    /// Create the application around an existing selector.
    pub fn with_selector(mut selector: MultiSelector) -> Self {
        debug!("Creating application");
        selector.on_input_focus(false);
        Self {
            selector,
            focused: true,
            should_quit: false,
            last_change: None,
        }
    }

    pub fn selector(&self) -> &MultiSelector {
        &self.selector
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The most recent accepted selection change.
    pub fn last_change(&self) -> Option<&ChangeEvent> {
        self.last_change.as_ref()
    }

    /// Update the application state based on an event.
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {}
        }
    }

    /// Apply a message from a selector background task.
    pub fn handle_message(&mut self, message: SelectorMessage) {
        self.selector.handle_message(message);
    }

    /// Release the selector's resources before exiting.
    pub fn shutdown(&mut self) {
        self.selector.dispose();
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            info!("Ctrl+C pressed, quitting");
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::Tab {
            self.set_focus(!self.focused);
            return;
        }

        if !self.focused {
            if key.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        }

        match self.selector.handle_input(key) {
            Some(SelectorAction::Changed(change)) => {
                info!(
                    action = change.action.as_str(),
                    value = ?change.value,
                    "Selection changed"
                );
                self.last_change = Some(change);
            }
            Some(SelectorAction::Cancel) => self.set_focus(false),
            None => {}
        }
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.selector.on_input_focus(true);
        } else {
            self.selector.on_visible_change(false);
        }
    }

    /// Render the application.
    pub fn view(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(2),
            ])
            .split(frame.area());

        let header = Paragraph::new(Line::from(Span::styled(
            "tagselect",
            Style::default().fg(Color::Cyan),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        self.selector.render(frame, chunks[1], self.focused);

        frame.render_widget(Paragraph::new(self.footer_lines()), chunks[2]);
    }

    fn footer_lines(&self) -> Vec<Line<'static>> {
        let status = match &self.last_change {
            Some(change) => format!(
                "{}: [{}]",
                change.action.as_str(),
                change.value.join(", ")
            ),
            None => "No changes yet".to_string(),
        };
        let help = if self.focused {
            "type: search  ↓/↑: browse  Enter: pick  Ctrl+U: clear  Tab: unfocus  Ctrl+C: quit"
        } else {
            "Tab: focus  q: quit"
        };

        vec![
            Line::from(Span::styled(status, Style::default().fg(Color::Green))),
            Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
        ]
    }
}
