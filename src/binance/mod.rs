//! Binance API Client
//!
//! Signed-request subsystem for the Binance spot REST API: query
//! canonicalization, HMAC-SHA256 signing, the three-mode transport and the
//! per-operation façade.

pub mod api;
pub mod client;
pub mod query;
pub mod sign;
pub mod types;

// Re-export commonly used types
pub use client::{BinanceClient, API_KEY_HEADER, DEFAULT_RECV_WINDOW_MS};
pub use query::QueryParams;
pub use types::{NewOrderRequest, ServerTime};
