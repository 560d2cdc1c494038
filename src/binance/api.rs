//! Binance Operation Façade
//!
//! One method per exchange operation: each is a fixed (path, HTTP method,
//! request mode) triple plus parameter shaping into [`QueryParams`]. No
//! business validation happens here; required fields, numeric ranges and
//! symbol existence are delegated to the exchange's own response.

use crate::binance::client::BinanceClient;
use crate::binance::query::QueryParams;
use crate::binance::types::{
    AccountInfo, AggTrade, AvgPrice, BookTicker, KlineData, ListenKey, MyTrade, NewOrderRequest,
    Order, OrderBook, Ticker24hr, TickerPrice, Trade,
};
use crate::error::BinanceError;
use reqwest::Method;
use serde_json::Value;

impl BinanceClient {
    // ---------- Market data (public) ----------

    /// Connectivity check. `GET /api/v3/ping`, returns an empty object.
    pub async fn ping(&self) -> Result<Value, BinanceError> {
        self.public_get("/api/v3/ping", &QueryParams::new()).await
    }

    /// Exchange trading rules and symbol metadata. `GET /api/v3/exchangeInfo`.
    pub async fn exchange_info(&self, symbol: Option<&str>) -> Result<Value, BinanceError> {
        let mut params = QueryParams::new();
        params.push_opt("symbol", symbol);
        self.public_get("/api/v3/exchangeInfo", &params).await
    }

    /// Order book depth. `GET /api/v3/depth`.
    pub async fn order_book(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<OrderBook, BinanceError> {
        let mut params = QueryParams::new();
        params.push("symbol", symbol).push_opt("limit", limit);
        self.public_get("/api/v3/depth", &params).await
    }

    /// Recent public trades. `GET /api/v3/trades`.
    pub async fn recent_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<Trade>, BinanceError> {
        let mut params = QueryParams::new();
        params.push("symbol", symbol).push_opt("limit", limit);
        self.public_get("/api/v3/trades", &params).await
    }

    /// Compressed/aggregate trades. `GET /api/v3/aggTrades`.
    pub async fn agg_trades(
        &self,
        symbol: &str,
        from_id: Option<u64>,
        start_time: Option<i64>,
        end_time: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<AggTrade>, BinanceError> {
        let mut params = QueryParams::new();
        params
            .push("symbol", symbol)
            .push_opt("fromId", from_id)
            .push_opt("startTime", start_time)
            .push_opt("endTime", end_time)
            .push_opt("limit", limit);
        self.public_get("/api/v3/aggTrades", &params).await
    }

    /// Candlestick data. `GET /api/v3/klines`.
    pub async fn klines(
        &self,
        symbol: &str,
        interval: &str,
        start_time: Option<i64>,
        end_time: Option<i64>,
        limit: Option<u32>,
    ) -> Result<KlineData, BinanceError> {
        let mut params = QueryParams::new();
        params
            .push("symbol", symbol)
            .push("interval", interval)
            .push_opt("startTime", start_time)
            .push_opt("endTime", end_time)
            .push_opt("limit", limit);
        self.public_get("/api/v3/klines", &params).await
    }

    /// Current average price. `GET /api/v3/avgPrice`.
    pub async fn avg_price(&self, symbol: &str) -> Result<AvgPrice, BinanceError> {
        let mut params = QueryParams::new();
        params.push("symbol", symbol);
        self.public_get("/api/v3/avgPrice", &params).await
    }

    /// 24-hour rolling window statistics. `GET /api/v3/ticker/24hr`.
    pub async fn ticker_24hr(&self, symbol: &str) -> Result<Ticker24hr, BinanceError> {
        let mut params = QueryParams::new();
        params.push("symbol", symbol);
        self.public_get("/api/v3/ticker/24hr", &params).await
    }

    /// Latest price for a symbol. `GET /api/v3/ticker/price`.
    pub async fn ticker_price(&self, symbol: &str) -> Result<TickerPrice, BinanceError> {
        let mut params = QueryParams::new();
        params.push("symbol", symbol);
        self.public_get("/api/v3/ticker/price", &params).await
    }

    /// Best bid/ask for a symbol. `GET /api/v3/ticker/bookTicker`.
    pub async fn book_ticker(&self, symbol: &str) -> Result<BookTicker, BinanceError> {
        let mut params = QueryParams::new();
        params.push("symbol", symbol);
        self.public_get("/api/v3/ticker/bookTicker", &params).await
    }

    // ---------- Trading (signed) ----------

    /// Places a new order. `POST /api/v3/order`.
    ///
    /// The response shape depends on the requested `newOrderRespType`, so it
    /// is passed through undecoded.
    pub async fn place_order(&self, request: &NewOrderRequest) -> Result<Value, BinanceError> {
        self.signed_request(Method::POST, "/api/v3/order", request.query())
            .await
    }

    /// Validates an order without placing it. `POST /api/v3/order/test`.
    ///
    /// Identical request shape to [`Self::place_order`] against the
    /// validate-only path; the exchange answers acceptable parameters with
    /// an empty body, which decodes to an empty object.
    pub async fn test_order(&self, request: &NewOrderRequest) -> Result<Value, BinanceError> {
        self.signed_request(Method::POST, "/api/v3/order/test", request.query())
            .await
    }

    /// Queries an order's status. `GET /api/v3/order`.
    pub async fn get_order(
        &self,
        symbol: &str,
        order_id: Option<u64>,
        orig_client_order_id: Option<&str>,
    ) -> Result<Order, BinanceError> {
        let mut params = QueryParams::new();
        params
            .push("symbol", symbol)
            .push_opt("orderId", order_id)
            .push_opt("origClientOrderId", orig_client_order_id);
        self.signed_request(Method::GET, "/api/v3/order", params)
            .await
    }

    /// Cancels an active order. `DELETE /api/v3/order`.
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: Option<u64>,
        orig_client_order_id: Option<&str>,
    ) -> Result<Order, BinanceError> {
        let mut params = QueryParams::new();
        params
            .push("symbol", symbol)
            .push_opt("orderId", order_id)
            .push_opt("origClientOrderId", orig_client_order_id);
        self.signed_request(Method::DELETE, "/api/v3/order", params)
            .await
    }

    /// Cancels all open orders on a symbol. `DELETE /api/v3/openOrders`.
    pub async fn cancel_all_orders(&self, symbol: &str) -> Result<Vec<Order>, BinanceError> {
        let mut params = QueryParams::new();
        params.push("symbol", symbol);
        self.signed_request(Method::DELETE, "/api/v3/openOrders", params)
            .await
    }

    /// Open orders, for one symbol or across all. `GET /api/v3/openOrders`.
    pub async fn open_orders(&self, symbol: Option<&str>) -> Result<Vec<Order>, BinanceError> {
        let mut params = QueryParams::new();
        params.push_opt("symbol", symbol);
        self.signed_request(Method::GET, "/api/v3/openOrders", params)
            .await
    }

    /// All orders on a symbol: active, canceled, filled.
    /// `GET /api/v3/allOrders`.
    pub async fn all_orders(
        &self,
        symbol: &str,
        order_id: Option<u64>,
        start_time: Option<i64>,
        end_time: Option<i64>,
        limit: Option<u32>,
    ) -> Result<Vec<Order>, BinanceError> {
        let mut params = QueryParams::new();
        params
            .push("symbol", symbol)
            .push_opt("orderId", order_id)
            .push_opt("startTime", start_time)
            .push_opt("endTime", end_time)
            .push_opt("limit", limit);
        self.signed_request(Method::GET, "/api/v3/allOrders", params)
            .await
    }

    // ---------- Account (signed) ----------

    /// Account balances and permissions. `GET /api/v3/account`.
    pub async fn account(&self) -> Result<AccountInfo, BinanceError> {
        self.signed_request(Method::GET, "/api/v3/account", QueryParams::new())
            .await
    }

    /// Trades for the account on a symbol. `GET /api/v3/myTrades`.
    pub async fn my_trades(
        &self,
        symbol: &str,
        order_id: Option<u64>,
        start_time: Option<i64>,
        end_time: Option<i64>,
        from_id: Option<u64>,
        limit: Option<u32>,
    ) -> Result<Vec<MyTrade>, BinanceError> {
        let mut params = QueryParams::new();
        params
            .push("symbol", symbol)
            .push_opt("orderId", order_id)
            .push_opt("startTime", start_time)
            .push_opt("endTime", end_time)
            .push_opt("fromId", from_id)
            .push_opt("limit", limit);
        self.signed_request(Method::GET, "/api/v3/myTrades", params)
            .await
    }

    // ---------- Listen-key lifecycle (user stream) ----------

    /// Opens a user-data-stream subscription. `POST /api/v3/userDataStream`.
    pub async fn create_listen_key(&self) -> Result<ListenKey, BinanceError> {
        self.user_stream_request(Method::POST, "/api/v3/userDataStream", &QueryParams::new())
            .await
    }

    /// Extends a listen key's validity. `PUT /api/v3/userDataStream`.
    ///
    /// Renewal is the caller's responsibility to invoke periodically; the
    /// client schedules nothing.
    pub async fn keepalive_listen_key(&self, listen_key: &str) -> Result<Value, BinanceError> {
        let mut params = QueryParams::new();
        params.push("listenKey", listen_key);
        self.user_stream_request(Method::PUT, "/api/v3/userDataStream", &params)
            .await
    }

    /// Closes a user-data-stream subscription. `DELETE /api/v3/userDataStream`.
    pub async fn close_listen_key(&self, listen_key: &str) -> Result<Value, BinanceError> {
        let mut params = QueryParams::new();
        params.push("listenKey", listen_key);
        self.user_stream_request(Method::DELETE, "/api/v3/userDataStream", &params)
            .await
    }
}
