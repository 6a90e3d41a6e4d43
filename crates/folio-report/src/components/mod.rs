//! Built-in components.

pub mod data_table;
pub mod html;
pub mod navigation;

pub use data_table::DataTable;
pub use html::{Html, Text};
pub use navigation::{GroupedNavigation, Navigation};
