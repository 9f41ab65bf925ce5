//! API client module.
//!
//! HTTP client with bearer header injection, durable token persistence,
//! and request/response types matching the EcoSystem backend API.

pub mod client;
pub mod types;
