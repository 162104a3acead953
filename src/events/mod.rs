//! Event handling for the application.
//!
//! Terminal input is polled by [`EventHandler`]; selector background results
//! arrive separately on the selector task channel.

mod handler;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;

/// Events consumed by [`App::update`](crate::app::App::update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
