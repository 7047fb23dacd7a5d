//! Hubs API Library
//!
//! A small REST service over a single "hubs" resource.
//!
//! ```text
//!   GET    /            greeting
//!   GET    /now         current time (ISO 8601)
//!   GET    /hubs        list hubs
//!   POST   /hubs        create hub
//!   GET    /hubs/{id}   read hub
//!   PUT    /hubs/{id}   update hub
//!   DELETE /hubs/{id}   delete hub
//! ```

pub mod config;
pub mod http;
pub mod hubs;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{HubStore, MemoryStore, StoreError};
