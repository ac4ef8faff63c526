//! UI Components
//!
//! Reusable Leptos components shared by the pages.

mod delete_confirm_button;
mod field;
mod file_picker;
mod modal;
mod pagination_bar;
mod progress_bar;
mod record_picker;
mod search_box;
mod sidebar;
mod status_badge;
mod toast_host;

pub use delete_confirm_button::DeleteConfirmButton;
pub use field::{
    date_input_value, optional_text, parse_date_input, today, FieldError, FormError, FormErrors, TextArea, TextField,
};
pub use file_picker::FilePicker;
pub use modal::Modal;
pub use pagination_bar::PaginationBar;
pub use progress_bar::ProgressBar;
pub use record_picker::RecordPicker;
pub use search_box::SearchBox;
pub use sidebar::Sidebar;
pub use status_badge::{badge, StatusBadge};
pub use toast_host::ToastHost;
