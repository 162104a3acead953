//! User interface components.

mod components;
pub mod theme;

pub use components::{ChangeEvent, MultiSelector, SelectorAction};
pub use theme::Theme;
