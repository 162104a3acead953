//! Option and query types shared by the selector and its data sources.

use serde::{Deserialize, Serialize};

/// Value carried by the "searching" placeholder row.
pub const LOADING_PLACEHOLDER_VALUE: &str = "-1";

/// Value carried by the "no matches" placeholder row.
pub const EMPTY_PLACEHOLDER_VALUE: &str = "-2";

/// Label shown while a fetch is in flight.
pub const LOADING_PLACEHOLDER_LABEL: &str = "Searching...";

/// Label shown when a fetch returned no options.
pub const EMPTY_PLACEHOLDER_LABEL: &str = "No matches";

/// A selectable option returned by an option source.
///
/// Options are unique by `value` within a result set and are displayed in
/// the order the source returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Text shown in the dropdown row.
    pub label: String,
    /// The value stored in the selection.
    pub value: String,
    /// Disabled options are shown but cannot be picked.
    #[serde(default)]
    pub disabled: bool,
}

impl SelectOption {
    /// Create a new enabled option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            disabled: false,
        }
    }

    /// Mark the option as disabled.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// The field used to fill tag text once this option is selected.
    pub fn fill_text(&self, field: FillField) -> &str {
        match field {
            FillField::Label => &self.label,
            FillField::Value => &self.value,
        }
    }
}

/// Argument handed to the option source on every fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    /// Text typed into the selector input.
    pub input_value: String,
}

impl QueryState {
    /// Create a query for the given input text.
    pub fn new(input_value: impl Into<String>) -> Self {
        Self {
            input_value: input_value.into(),
        }
    }

    /// Whether this is the empty query (input cleared).
    pub fn is_empty(&self) -> bool {
        self.input_value.is_empty()
    }
}

/// A row as the dropdown renders it, after placeholder and custom
/// label derivation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOption {
    pub label: String,
    pub value: String,
    pub disabled: bool,
}

impl DisplayOption {
    /// The single disabled row shown while loading.
    pub fn loading() -> Self {
        Self {
            label: LOADING_PLACEHOLDER_LABEL.to_string(),
            value: LOADING_PLACEHOLDER_VALUE.to_string(),
            disabled: true,
        }
    }

    /// The single disabled row shown for an empty result set.
    pub fn no_matches() -> Self {
        Self {
            label: EMPTY_PLACEHOLDER_LABEL.to_string(),
            value: EMPTY_PLACEHOLDER_VALUE.to_string(),
            disabled: true,
        }
    }

    /// Whether this row is one of the synthetic placeholder rows.
    pub fn is_placeholder(&self) -> bool {
        self.disabled
            && (self.value == LOADING_PLACEHOLDER_VALUE || self.value == EMPTY_PLACEHOLDER_VALUE)
    }
}

/// Why the selection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    /// An option was picked (or unpicked) from the dropdown.
    ItemClick,
    /// Free text was committed as a raw tag.
    Enter,
    /// A tag was removed from the input.
    Tag,
    /// All tags were cleared.
    Clear,
}

impl ActionType {
    /// Short name used in logs and the status line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::ItemClick => "itemClick",
            ActionType::Enter => "enter",
            ActionType::Tag => "tag",
            ActionType::Clear => "clear",
        }
    }
}

/// Which option field fills the tag text on selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillField {
    #[default]
    Label,
    Value,
}

/// Presentation size of the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl SelectorSize {
    /// Number of dropdown rows shown before scrolling.
    pub fn dropdown_rows(&self) -> u16 {
        match self {
            SelectorSize::Small => 4,
            SelectorSize::Medium => 6,
            SelectorSize::Large => 10,
        }
    }
}
