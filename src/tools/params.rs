//! Tool Parameter Types
//!
//! Argument structs for MCP tools, with JsonSchema support. The same struct
//! is used to generate the tool's input schema and to deserialize its
//! arguments at dispatch time, so the two can never drift apart.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tools that take no arguments
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoParams {}

/// Common parameter for symbol-based tools
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolParam {
    /// Trading pair symbol in uppercase (e.g., BTCUSDT, ETHUSDT)
    #[schemars(description = "Trading pair symbol in uppercase (e.g., BTCUSDT, ETHUSDT)")]
    pub symbol: String,
}

/// Parameter for tools where the symbol narrows an otherwise global query
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OptionalSymbolParam {
    /// Trading pair symbol; omit to query across all symbols
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Trading pair symbol; omit to query across all symbols")]
    pub symbol: Option<String>,
}

/// Parameters for order book depth query
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderbookParam {
    /// Trading pair symbol
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    /// Depth limit (5, 10, 20, 50, 100, 500, 1000, 5000)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Order book depth limit (default: 100)")]
    pub limit: Option<u32>,
}

/// Parameters for recent-trades query
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TradesParam {
    /// Trading pair symbol
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    /// Number of trades to return (max 1000)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of trades to return (default: 500, max: 1000)")]
    pub limit: Option<u32>,
}

/// Parameters for aggregated-trades query
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AggTradesParam {
    /// Trading pair symbol
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    /// Aggregate trade id to fetch from
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Aggregate trade id to start from")]
    pub from_id: Option<u64>,

    /// Start of the window, ms since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Window start in milliseconds since epoch")]
    pub start_time: Option<i64>,

    /// End of the window, ms since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Window end in milliseconds since epoch")]
    pub end_time: Option<i64>,

    /// Number of trades to return (max 1000)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of trades to return (default: 500, max: 1000)")]
    pub limit: Option<u32>,
}

/// Parameters for candlestick query
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KlinesParam {
    /// Trading pair symbol
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    /// Kline interval (1s, 1m, 3m, 5m, 15m, 30m, 1h, 2h, 4h, 6h, 8h, 12h,
    /// 1d, 3d, 1w, 1M)
    #[schemars(description = "Kline interval (e.g., 1m, 5m, 1h, 1d)")]
    pub interval: String,

    /// Start of the window, ms since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Window start in milliseconds since epoch")]
    pub start_time: Option<i64>,

    /// End of the window, ms since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Window end in milliseconds since epoch")]
    pub end_time: Option<i64>,

    /// Number of klines to return (max 1000)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of klines to return (default: 500, max: 1000)")]
    pub limit: Option<u32>,
}

/// Parameters identifying a single order
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRefParam {
    /// Trading pair symbol
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    /// Exchange-assigned order id
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Exchange-assigned order id")]
    pub order_id: Option<u64>,

    /// Client-supplied order id used at placement
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Client-supplied order id used at placement")]
    pub orig_client_order_id: Option<String>,
}

/// Parameters for the all-orders history query
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllOrdersParam {
    /// Trading pair symbol
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    /// Order id to fetch from
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Order id to start from")]
    pub order_id: Option<u64>,

    /// Start of the window, ms since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Window start in milliseconds since epoch")]
    pub start_time: Option<i64>,

    /// End of the window, ms since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Window end in milliseconds since epoch")]
    pub end_time: Option<i64>,

    /// Number of orders to return (max 1000)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of orders to return (default: 500, max: 1000)")]
    pub limit: Option<u32>,
}

/// Parameters for the account trade-history query
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MyTradesParam {
    /// Trading pair symbol
    #[schemars(description = "Trading pair symbol (e.g., BTCUSDT)")]
    pub symbol: String,

    /// Restrict to trades of one order
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Restrict to trades belonging to this order id")]
    pub order_id: Option<u64>,

    /// Start of the window, ms since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Window start in milliseconds since epoch")]
    pub start_time: Option<i64>,

    /// End of the window, ms since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Window end in milliseconds since epoch")]
    pub end_time: Option<i64>,

    /// Trade id to fetch from
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Trade id to start from")]
    pub from_id: Option<u64>,

    /// Number of trades to return (max 1000)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Number of trades to return (default: 500, max: 1000)")]
    pub limit: Option<u32>,
}

/// Parameter carrying a user-data-stream listen key
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListenKeyParam {
    /// Listen key returned by the create operation
    #[schemars(description = "Listen key returned by binance.create_listen_key")]
    pub listen_key: String,
}
