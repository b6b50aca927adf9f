//! Extension traits for customizing rendering behavior.

mod width_provider;

pub use width_provider::{UnicodeWidths, WidthProvider};
