//! User interface
//!
//! - What the component shows, as plain data (view_model.rs)
//! - The iced widget tree built from it (view.rs)

pub mod view;
pub mod view_model;

pub use view::view;
pub use view_model::ViewModel;
