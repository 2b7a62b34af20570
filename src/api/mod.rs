//! Dog API access
//!
//! - Response payload of the random image endpoint (payload.rs)
//! - HTTP client for the endpoint and for image downloads (client.rs)

pub mod client;
pub mod payload;

pub use client::DogApi;
