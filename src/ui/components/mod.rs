//! Reusable UI components.

mod multi_selector;

pub use multi_selector::{ChangeEvent, MultiSelector, SelectorAction};
