//! Error types absorbed by the selector.
//!
//! Neither kind propagates to the host: both end up as inline error text.

use thiserror::Error;

/// A failure reported by the option source.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    /// Create a fetch error with a human-readable message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message shown to the user.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A selection change rejected by the count bounds.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// Fewer values than the configured minimum.
    #[error("Select at least {min} items")]
    BelowMin { min: usize },

    /// More values than the configured maximum.
    #[error("Select at most {max} items")]
    AboveMax { max: usize },
}

/// Check a selection count against inclusive bounds.
pub fn check_bounds(
    count: usize,
    min: Option<usize>,
    max: Option<usize>,
) -> Result<(), SelectionError> {
    if let Some(min) = min {
        if count < min {
            return Err(SelectionError::BelowMin { min });
        }
    }
    if let Some(max) = max {
        if count > max {
            return Err(SelectionError::AboveMax { max });
        }
    }
    Ok(())
}

/// Make an error message safe to draw in the terminal.
///
/// Messages are never interpreted as markup. Newlines and tabs collapse to
/// spaces and every other control character (including ESC, which would
/// start a terminal escape sequence) is dropped.
pub fn sanitize_message(message: &str) -> String {
    message
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect()
}
