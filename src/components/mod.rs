//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod data_table;
pub mod help_dialog;
pub mod layout;
pub mod page_size_dialog;
pub mod pagination;
pub mod quit_dialog;
pub mod toolbar;

pub use data_table::DataTableComponent;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use page_size_dialog::PageSizeDialog;
pub use quit_dialog::QuitDialog;
