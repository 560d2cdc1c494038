//! Binance API Type Definitions
//!
//! Response and request payload types. Price and quantity fields stay
//! decimal strings end to end: converting through floating point would
//! break tick/lot-size precision.

use crate::binance::query::QueryParams;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response from `GET /api/v3/time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    /// Server time in milliseconds since Unix epoch
    pub server_time: i64,
}

/// Response from `GET /api/v3/depth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBook {
    pub last_update_id: i64,
    /// Bid levels as (price, quantity) decimal strings
    pub bids: Vec<(String, String)>,
    /// Ask levels as (price, quantity) decimal strings
    pub asks: Vec<(String, String)>,
}

/// Response from `GET /api/v3/trades`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: i64,
    pub price: String,
    pub qty: String,
    pub quote_qty: String,
    pub time: i64,
    pub is_buyer_maker: bool,
    pub is_best_match: bool,
}

/// Response from `GET /api/v3/aggTrades`.
///
/// Field names on the wire are single letters; this struct gives them
/// readable names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggTrade {
    #[serde(rename = "a")]
    pub agg_trade_id: i64,
    #[serde(rename = "p")]
    pub price: String,
    #[serde(rename = "q")]
    pub qty: String,
    #[serde(rename = "f")]
    pub first_trade_id: i64,
    #[serde(rename = "l")]
    pub last_trade_id: i64,
    #[serde(rename = "T")]
    pub time: i64,
    #[serde(rename = "m")]
    pub is_buyer_maker: bool,
    #[serde(rename = "M")]
    pub is_best_match: bool,
}

/// Response from `GET /api/v3/avgPrice`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvgPrice {
    /// Averaging window in minutes
    pub mins: i64,
    pub price: String,
}

/// Response from `GET /api/v3/ticker/24hr`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24hr {
    pub symbol: String,
    pub price_change: String,
    pub price_change_percent: String,
    pub weighted_avg_price: String,
    pub prev_close_price: String,
    pub last_price: String,
    pub last_qty: String,
    pub bid_price: String,
    pub ask_price: String,
    pub open_price: String,
    pub high_price: String,
    pub low_price: String,
    pub volume: String,
    pub quote_volume: String,
    pub open_time: i64,
    pub close_time: i64,
    pub first_id: i64,
    pub last_id: i64,
    pub count: i64,
}

/// Response from `GET /api/v3/ticker/price`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

/// Response from `GET /api/v3/ticker/bookTicker`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTicker {
    pub symbol: String,
    pub bid_price: String,
    pub bid_qty: String,
    pub ask_price: String,
    pub ask_qty: String,
}

/// Kline rows from `GET /api/v3/klines`.
///
/// Array format: [open_time, open, high, low, close, volume, close_time,
/// quote_volume, trades, taker_buy_base, taker_buy_quote, ignore]
pub type KlineData = Vec<serde_json::Value>;

/// Parameters for `POST /api/v3/order` and `POST /api/v3/order/test`.
///
/// Pass-through shape: no local validation happens here. Required fields,
/// ranges and symbol existence are all enforced by the exchange. Quantity
/// and price are decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderRequest {
    /// Trading pair symbol (e.g., BTCUSDT)
    pub symbol: String,
    /// Order side: BUY or SELL
    pub side: String,
    /// Order type: LIMIT, MARKET, STOP_LOSS, STOP_LOSS_LIMIT, TAKE_PROFIT,
    /// TAKE_PROFIT_LIMIT, LIMIT_MAKER
    #[serde(rename = "type")]
    pub order_type: String,
    /// Time in force: GTC, IOC, or FOK (LIMIT orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<String>,
    /// Base asset quantity as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    /// Quote asset quantity as a decimal string (MARKET orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_order_qty: Option<String>,
    /// Limit price as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Client-supplied order id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_client_order_id: Option<String>,
    /// Stop price as a decimal string (stop orders)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_price: Option<String>,
    /// Iceberg quantity as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iceberg_qty: Option<String>,
    /// Response detail: ACK, RESULT, or FULL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_order_resp_type: Option<String>,
    /// Signed-request validity window in milliseconds (default 5000)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recv_window: Option<u64>,
}

impl NewOrderRequest {
    /// Serializes into the fixed field order the signature is computed over.
    pub fn query(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push("symbol", &self.symbol)
            .push("side", &self.side)
            .push("type", &self.order_type)
            .push_opt("timeInForce", self.time_in_force.as_ref())
            .push_opt("quantity", self.quantity.as_ref())
            .push_opt("quoteOrderQty", self.quote_order_qty.as_ref())
            .push_opt("price", self.price.as_ref())
            .push_opt("newClientOrderId", self.new_client_order_id.as_ref())
            .push_opt("stopPrice", self.stop_price.as_ref())
            .push_opt("icebergQty", self.iceberg_qty.as_ref())
            .push_opt("newOrderRespType", self.new_order_resp_type.as_ref())
            .push_opt("recvWindow", self.recv_window);
        params
    }
}

/// An order record, as returned by query/cancel/open/all-orders endpoints.
///
/// Fields beyond the identifying core are optional: the exchange varies the
/// shape between acknowledgements, cancellations and queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub symbol: String,
    pub order_id: i64,
    #[serde(default)]
    pub client_order_id: Option<String>,
    #[serde(default)]
    pub orig_client_order_id: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub orig_qty: Option<String>,
    #[serde(default)]
    pub executed_qty: Option<String>,
    #[serde(default)]
    pub cummulative_quote_qty: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub time_in_force: Option<String>,
    #[serde(rename = "type", default)]
    pub order_type: Option<String>,
    #[serde(default)]
    pub side: Option<String>,
    #[serde(default)]
    pub stop_price: Option<String>,
    #[serde(default)]
    pub iceberg_qty: Option<String>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub update_time: Option<i64>,
    #[serde(default)]
    pub is_working: Option<bool>,
}

/// A single asset balance inside [`AccountInfo`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub asset: String,
    pub free: String,
    pub locked: String,
}

/// Response from `GET /api/v3/account`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub maker_commission: i64,
    #[serde(default)]
    pub taker_commission: i64,
    #[serde(default)]
    pub can_trade: bool,
    #[serde(default)]
    pub can_withdraw: bool,
    #[serde(default)]
    pub can_deposit: bool,
    #[serde(default)]
    pub update_time: i64,
    #[serde(default)]
    pub account_type: Option<String>,
    pub balances: Vec<Balance>,
}

/// Response from `GET /api/v3/myTrades`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyTrade {
    pub symbol: String,
    pub id: i64,
    pub order_id: i64,
    pub price: String,
    pub qty: String,
    pub quote_qty: String,
    pub commission: String,
    pub commission_asset: String,
    pub time: i64,
    pub is_buyer: bool,
    pub is_maker: bool,
    pub is_best_match: bool,
}

/// Response from `POST /api/v3/userDataStream`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListenKey {
    /// Opaque token identifying the server-side user-data subscription
    pub listen_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_time_deserialization() {
        let json = r#"{"serverTime": 1699564800000}"#;
        let time: ServerTime = serde_json::from_str(json).unwrap();
        assert_eq!(time.server_time, 1699564800000);
    }

    #[test]
    fn order_book_levels_stay_strings() {
        let json = r#"{"lastUpdateId":1027024,"bids":[["4.00000000","431.00000000"]],"asks":[["4.00000200","12.00000000"]]}"#;
        let book: OrderBook = serde_json::from_str(json).unwrap();
        assert_eq!(book.bids[0].0, "4.00000000");
        assert_eq!(book.asks[0].1, "12.00000000");
    }

    #[test]
    fn agg_trade_short_field_names() {
        let json = r#"{"a":26129,"p":"0.01633102","q":"4.70443515","f":27781,"l":27781,"T":1498793709153,"m":true,"M":true}"#;
        let trade: AggTrade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.agg_trade_id, 26129);
        assert_eq!(trade.price, "0.01633102");
        assert!(trade.is_buyer_maker);
    }

    #[test]
    fn new_order_request_query_order_is_fixed() {
        let request = NewOrderRequest {
            symbol: "LTCBTC".to_string(),
            side: "BUY".to_string(),
            order_type: "LIMIT".to_string(),
            time_in_force: Some("GTC".to_string()),
            quantity: Some("1".to_string()),
            quote_order_qty: None,
            price: Some("0.1".to_string()),
            new_client_order_id: None,
            stop_price: None,
            iceberg_qty: None,
            new_order_resp_type: None,
            recv_window: None,
        };
        assert_eq!(
            request.query().encode().unwrap(),
            "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1"
        );
    }

    #[test]
    fn order_tolerates_partial_shapes() {
        // Cancel responses omit timestamps; acknowledgements omit fills.
        let json = r#"{"symbol":"BTCUSDT","orderId":28,"origClientOrderId":"myOrder1","clientOrderId":"cancelMyOrder1","price":"1.00000000","origQty":"10.00000000","executedQty":"0.00000000","cummulativeQuoteQty":"0.00000000","status":"CANCELED","timeInForce":"GTC","type":"LIMIT","side":"SELL"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_id, 28);
        assert_eq!(order.status.as_deref(), Some("CANCELED"));
        assert!(order.time.is_none());
    }

    #[test]
    fn account_info_balances() {
        let json = r#"{"makerCommission":15,"takerCommission":15,"canTrade":true,"canWithdraw":true,"canDeposit":true,"updateTime":123456789,"accountType":"SPOT","balances":[{"asset":"BTC","free":"4723846.89208129","locked":"0.00000000"}]}"#;
        let account: AccountInfo = serde_json::from_str(json).unwrap();
        assert!(account.can_trade);
        assert_eq!(account.balances[0].asset, "BTC");
        assert_eq!(account.balances[0].free, "4723846.89208129");
    }
}
