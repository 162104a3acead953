//! Selector configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use ratatui::style::Style;

use super::debounce::DEFAULT_DEBOUNCE_MS;
use super::option::{FillField, SelectOption, SelectorSize};
use crate::config::Settings;

/// Formats a dropdown row for an option.
pub type ItemRender = Arc<dyn Fn(&SelectOption) -> String + Send + Sync>;

/// Default placeholder shown in an empty input.
pub const DEFAULT_PLACEHOLDER: &str = "Type to search";

/// Default selector width in terminal columns.
pub const DEFAULT_WIDTH: u16 = 48;

/// Who owns the authoritative selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOwnership {
    /// The host supplies the value and mirrors it back on every change.
    External,
    /// The selector keeps the value itself.
    Internal,
}

/// Configuration for a [`MultiSelector`](crate::ui::MultiSelector).
#[derive(Clone)]
pub struct SelectorConfig {
    /// Options shown before the first fetch.
    pub default_data_source: Vec<SelectOption>,
    /// Initial selection when the selector owns its value.
    pub default_value: Option<Vec<String>>,
    /// Controlling selection supplied by the host.
    pub value: Option<Vec<String>>,
    pub size: SelectorSize,
    /// Width in terminal columns.
    pub width: u16,
    pub placeholder: String,
    /// Shown as the block title.
    pub class_name: String,
    /// Base style for the selector block.
    pub style: Style,
    pub disabled: bool,
    /// Custom dropdown row formatter.
    pub item_render: Option<ItemRender>,
    /// Field used for tag text.
    pub fill_props: FillField,
    /// Inclusive minimum number of selected values.
    pub min: Option<usize>,
    /// Inclusive maximum number of selected values.
    pub max: Option<usize>,
    /// Fetch the empty query when the user focuses the input.
    pub focus_fetch: bool,
    /// Debounce quiet window.
    pub debounce: Duration,
}

impl SelectorConfig {
    /// Build a config from application settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            size: settings.size,
            width: settings.width,
            placeholder: settings.placeholder.clone(),
            fill_props: settings.fill_props,
            min: settings.min,
            max: settings.max,
            focus_fetch: settings.focus_fetch,
            debounce: Duration::from_millis(settings.debounce_ms),
            ..Self::default()
        }
    }

    /// Supply a controlling value (external ownership).
    pub fn with_value(mut self, value: Vec<String>) -> Self {
        self.value = Some(value);
        self
    }

    /// Supply an initial value (internal ownership).
    pub fn with_default_value(mut self, value: Vec<String>) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Options shown before the first fetch.
    pub fn with_default_data_source(mut self, options: Vec<SelectOption>) -> Self {
        self.default_data_source = options;
        self
    }

    /// Set inclusive selection-count bounds.
    pub fn with_bounds(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Set a custom dropdown row formatter.
    pub fn with_item_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&SelectOption) -> String + Send + Sync + 'static,
    {
        self.item_render = Some(Arc::new(render));
        self
    }

    pub fn with_focus_fetch(mut self, enabled: bool) -> Self {
        self.focus_fetch = enabled;
        self
    }

    pub fn with_fill_props(mut self, field: FillField) -> Self {
        self.fill_props = field;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Ownership implied by whether a controlling value was supplied.
    pub fn ownership(&self) -> SelectionOwnership {
        if self.value.is_some() {
            SelectionOwnership::External
        } else {
            SelectionOwnership::Internal
        }
    }

    /// The value the selector starts with.
    pub fn initial_value(&self) -> Vec<String> {
        self.value
            .clone()
            .or_else(|| self.default_value.clone())
            .unwrap_or_default()
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            default_data_source: Vec::new(),
            default_value: None,
            value: None,
            size: SelectorSize::default(),
            width: DEFAULT_WIDTH,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            class_name: String::new(),
            style: Style::default(),
            disabled: false,
            item_render: None,
            fill_props: FillField::default(),
            min: None,
            max: None,
            focus_fetch: false,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl fmt::Debug for SelectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorConfig")
            .field("default_data_source", &self.default_data_source.len())
            .field("default_value", &self.default_value)
            .field("value", &self.value)
            .field("size", &self.size)
            .field("width", &self.width)
            .field("placeholder", &self.placeholder)
            .field("class_name", &self.class_name)
            .field("disabled", &self.disabled)
            .field("item_render", &self.item_render.is_some())
            .field("fill_props", &self.fill_props)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("focus_fetch", &self.focus_fetch)
            .field("debounce", &self.debounce)
            .finish()
    }
}
