//! Configuration Management
//!
//! This module handles loading and managing configuration including API credentials.

pub mod credentials;
pub mod http;

// Re-export
pub use credentials::{Credentials, SecretString};
pub use http::HttpConfig;
