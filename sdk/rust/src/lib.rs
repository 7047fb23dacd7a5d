//! Async client for the hubs API.

pub mod client;

pub use client::{HubsClient, SdkError};
