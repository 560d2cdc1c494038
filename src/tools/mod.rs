//! MCP Tool Surface
//!
//! The catalog declares every tool once; dispatch routes calls to the
//! exchange client. Transports consume both and add nothing of their own.

pub mod catalog;
pub mod dispatch;
pub mod params;

pub use catalog::{catalog, find, RequestMode, ToolSpec};
pub use dispatch::dispatch;
