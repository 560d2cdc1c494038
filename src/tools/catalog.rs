//! Tool Catalog
//!
//! Single source of truth for the tools this server exposes. Both the MCP
//! stdio/SSE handler and the HTTP transport render their `tools/list`
//! responses from here, so a tool can never exist on one transport and be
//! missing from another.

use crate::binance::NewOrderRequest;
use crate::tools::params::{
    AggTradesParam, AllOrdersParam, KlinesParam, ListenKeyParam, MyTradesParam, NoParams,
    OptionalSymbolParam, OrderRefParam, OrderbookParam, SymbolParam, TradesParam,
};
use schemars::JsonSchema;
use serde_json::Value;

/// Authentication mode a tool's underlying exchange call runs in.
///
/// The mode is part of the tool descriptor, not inferred from the endpoint
/// path, so the credential precondition for a call is known before any
/// request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// No credentials involved.
    Public,
    /// API key header only, never signed (listen-key lifecycle).
    UserStream,
    /// API key header plus HMAC-SHA256 signature (trading and account).
    Signed,
}

impl RequestMode {
    /// True when the mode needs an API key configured.
    pub fn requires_api_key(self) -> bool {
        !matches!(self, RequestMode::Public)
    }

    /// True when the mode needs both credential halves.
    pub fn requires_signing(self) -> bool {
        matches!(self, RequestMode::Signed)
    }
}

/// Static descriptor for one tool.
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub mode: RequestMode,
    /// True for tools that never mutate exchange state.
    pub read_only: bool,
    /// JSON Schema for the tool's arguments.
    pub input_schema: Value,
}

fn schema_of<T: JsonSchema>() -> Value {
    schemars::schema_for!(T).to_value()
}

fn tool<T: JsonSchema>(
    name: &'static str,
    description: &'static str,
    mode: RequestMode,
    read_only: bool,
) -> ToolSpec {
    ToolSpec {
        name,
        description,
        mode,
        read_only,
        input_schema: schema_of::<T>(),
    }
}

/// Builds the full tool catalog in presentation order.
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        // Market data
        tool::<NoParams>(
            "binance.ping",
            "Test connectivity to the exchange REST API",
            RequestMode::Public,
            true,
        ),
        tool::<NoParams>(
            "binance.get_server_time",
            "Get the exchange server time in milliseconds since epoch",
            RequestMode::Public,
            true,
        ),
        tool::<OptionalSymbolParam>(
            "binance.get_exchange_info",
            "Get exchange trading rules and symbol metadata, optionally for one symbol",
            RequestMode::Public,
            true,
        ),
        tool::<OrderbookParam>(
            "binance.get_orderbook",
            "Get order book depth (bids and asks) for a trading pair",
            RequestMode::Public,
            true,
        ),
        tool::<TradesParam>(
            "binance.get_recent_trades",
            "Get recent public trades for a trading pair",
            RequestMode::Public,
            true,
        ),
        tool::<AggTradesParam>(
            "binance.get_agg_trades",
            "Get compressed aggregate trades for a trading pair",
            RequestMode::Public,
            true,
        ),
        tool::<KlinesParam>(
            "binance.get_klines",
            "Get candlestick (kline) data for a trading pair and interval",
            RequestMode::Public,
            true,
        ),
        tool::<SymbolParam>(
            "binance.get_avg_price",
            "Get the current average price for a trading pair",
            RequestMode::Public,
            true,
        ),
        tool::<SymbolParam>(
            "binance.get_ticker",
            "Get 24-hour rolling window price statistics for a trading pair",
            RequestMode::Public,
            true,
        ),
        tool::<SymbolParam>(
            "binance.get_price",
            "Get the latest price for a trading pair",
            RequestMode::Public,
            true,
        ),
        tool::<SymbolParam>(
            "binance.get_book_ticker",
            "Get the best bid and ask for a trading pair",
            RequestMode::Public,
            true,
        ),
        // Trading
        tool::<NewOrderRequest>(
            "binance.place_order",
            "Place a new spot order (requires API key and secret)",
            RequestMode::Signed,
            false,
        ),
        tool::<NewOrderRequest>(
            "binance.test_order",
            "Validate a new spot order without placing it (requires API key and secret)",
            RequestMode::Signed,
            false,
        ),
        tool::<OrderRefParam>(
            "binance.get_order",
            "Query an order's status by order id or client order id",
            RequestMode::Signed,
            true,
        ),
        tool::<OrderRefParam>(
            "binance.cancel_order",
            "Cancel an active order by order id or client order id",
            RequestMode::Signed,
            false,
        ),
        tool::<SymbolParam>(
            "binance.cancel_all_orders",
            "Cancel all open orders on a trading pair",
            RequestMode::Signed,
            false,
        ),
        tool::<OptionalSymbolParam>(
            "binance.get_open_orders",
            "List open orders, for one trading pair or across all",
            RequestMode::Signed,
            true,
        ),
        tool::<AllOrdersParam>(
            "binance.get_all_orders",
            "List all orders on a trading pair: active, canceled and filled",
            RequestMode::Signed,
            true,
        ),
        // Account
        tool::<NoParams>(
            "binance.get_account",
            "Get account balances, commissions and permissions",
            RequestMode::Signed,
            true,
        ),
        tool::<MyTradesParam>(
            "binance.get_my_trades",
            "List the account's trades on a trading pair",
            RequestMode::Signed,
            true,
        ),
        // User data stream
        tool::<NoParams>(
            "binance.create_listen_key",
            "Open a user data stream and return its listen key",
            RequestMode::UserStream,
            false,
        ),
        tool::<ListenKeyParam>(
            "binance.keepalive_listen_key",
            "Extend a user data stream listen key's validity",
            RequestMode::UserStream,
            false,
        ),
        tool::<ListenKeyParam>(
            "binance.close_listen_key",
            "Close a user data stream",
            RequestMode::UserStream,
            false,
        ),
    ]
}

/// Looks up a tool descriptor by name.
pub fn find(name: &str) -> Option<ToolSpec> {
    catalog().into_iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tool_names_are_unique_and_prefixed() {
        let specs = catalog();
        let names: HashSet<_> = specs.iter().map(|s| s.name).collect();
        assert_eq!(names.len(), specs.len());
        for spec in &specs {
            assert!(spec.name.starts_with("binance."), "{}", spec.name);
        }
    }

    #[test]
    fn every_schema_is_an_object() {
        for spec in catalog() {
            let ty = spec.input_schema.get("type").and_then(Value::as_str);
            assert_eq!(ty, Some("object"), "{}", spec.name);
        }
    }

    #[test]
    fn trading_tools_are_signed() {
        for name in [
            "binance.place_order",
            "binance.cancel_order",
            "binance.get_account",
        ] {
            let spec = find(name).unwrap();
            assert_eq!(spec.mode, RequestMode::Signed);
        }
    }

    #[test]
    fn listen_key_tools_use_api_key_without_signing() {
        for name in [
            "binance.create_listen_key",
            "binance.keepalive_listen_key",
            "binance.close_listen_key",
        ] {
            let spec = find(name).unwrap();
            assert_eq!(spec.mode, RequestMode::UserStream);
            assert!(spec.mode.requires_api_key());
            assert!(!spec.mode.requires_signing());
        }
    }

    #[test]
    fn unknown_tool_is_absent() {
        assert!(find("binance.transfer_funds").is_none());
    }
}
