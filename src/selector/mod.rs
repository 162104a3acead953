//! Selector model: options, the injected option source, debouncing and the
//! background task channel.
//!
//! The widget itself lives in [`crate::ui::MultiSelector`].

mod config;
mod debounce;
mod error;
mod option;
mod source;
mod tasks;

pub use config::{ItemRender, SelectionOwnership, SelectorConfig, DEFAULT_PLACEHOLDER, DEFAULT_WIDTH};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE_MS};
pub use error::{check_bounds, sanitize_message, FetchError, SelectionError};
pub use option::{
    ActionType, DisplayOption, FillField, QueryState, SelectOption, SelectorSize,
    EMPTY_PLACEHOLDER_LABEL, EMPTY_PLACEHOLDER_VALUE, LOADING_PLACEHOLDER_LABEL,
    LOADING_PLACEHOLDER_VALUE,
};
pub use source::{FetchFuture, OptionSource};
pub use tasks::{create_task_channel, SelectorMessage, SelectorTasks};
