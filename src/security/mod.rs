//! Security subsystem.
//!
//! # Components
//! - headers.rs: hardening headers on every response
//! - limits.rs: request body size cap and the in-flight request gate

pub mod headers;
pub mod limits;
