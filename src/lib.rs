//! tagselect - a terminal multi-value tag selector.
//!
//! The [`ui::MultiSelector`] widget fetches its dropdown options from an
//! injected [`selector::OptionSource`] as the user types, debounces input,
//! enforces selection-count bounds and renders loading, empty and error
//! states inline. The binary hosts one selector over a demo catalog.

pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod selector;
pub mod ui;
