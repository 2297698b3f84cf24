//! Shared configuration for Hireboard.
//!
//! This crate holds `AppConfig`, the layered configuration loading used by
//! the binaries. Domain and store errors live with the crates that raise
//! them.

pub mod config;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
