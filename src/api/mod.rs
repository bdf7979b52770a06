//! Quiz backend API.

mod client;

pub use client::{ApiClient, DEFAULT_API_URL};
