//! State management module
//!
//! This module handles all component state:
//! - Image URL, loading flag and error message of one instance (fetch.rs)
//! - The component itself and the host slot that mounts it (component.rs)

pub mod component;
pub mod fetch;
