//! Tool Dispatch
//!
//! Routes a tool call by name to the matching client façade method. The
//! credential precondition for the tool's request mode is checked here,
//! before argument parsing and before any network traffic, so a
//! misconfigured deployment fails with a clear auth error instead of an
//! exchange rejection.

use crate::binance::BinanceClient;
use crate::error::{ProviderError, Result};
use crate::tools::catalog::{self, RequestMode, ToolSpec};
use crate::tools::params::{
    AggTradesParam, AllOrdersParam, KlinesParam, ListenKeyParam, MyTradesParam,
    OptionalSymbolParam, OrderRefParam, OrderbookParam, SymbolParam, TradesParam,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Reserved argument carrying a response-shaping hint.
///
/// It is consumed here and never forwarded to the exchange.
const FIELDS_HINT: &str = "fields";

/// Executes a tool call and returns its JSON result.
pub async fn dispatch(client: &BinanceClient, name: &str, args: Value) -> Result<Value> {
    let spec = catalog::find(name).ok_or_else(|| ProviderError::ToolNotFound(name.to_string()))?;
    check_credentials(client, &spec)?;

    let (args, fields) = take_fields_hint(args)?;
    let result = invoke(client, spec.name, args).await?;
    Ok(apply_fields_hint(result, fields))
}

fn check_credentials(client: &BinanceClient, spec: &ToolSpec) -> Result<()> {
    match spec.mode {
        RequestMode::Public => Ok(()),
        RequestMode::UserStream if client.has_api_key() => Ok(()),
        RequestMode::UserStream => Err(ProviderError::AuthRequired(format!(
            "{} requires BINANCE_API_KEY",
            spec.name
        ))),
        RequestMode::Signed if client.can_sign() => Ok(()),
        RequestMode::Signed => Err(ProviderError::AuthRequired(format!(
            "{} requires BINANCE_API_KEY and BINANCE_SECRET_KEY",
            spec.name
        ))),
    }
}

/// Splits the `fields` hint off the argument object.
///
/// Missing or null arguments normalize to an empty object so no-argument
/// tools accept both shapes.
fn take_fields_hint(args: Value) -> Result<(Value, Option<Vec<String>>)> {
    let mut map = match args {
        Value::Null => serde_json::Map::new(),
        Value::Object(map) => map,
        other => {
            return Err(ProviderError::Validation(format!(
                "tool arguments must be an object, got {}",
                type_name(&other)
            )))
        }
    };

    let fields = match map.remove(FIELDS_HINT) {
        None => None,
        Some(value) => Some(serde_json::from_value::<Vec<String>>(value).map_err(|_| {
            ProviderError::Validation("fields must be an array of strings".to_string())
        })?),
    };

    Ok((Value::Object(map), fields))
}

/// Projects the result onto the requested fields.
///
/// Applies to a top-level object or to each object in a top-level array;
/// anything else passes through untouched. Unknown field names select
/// nothing, which is visible to the caller and cheaper than validating
/// against every response shape.
fn apply_fields_hint(result: Value, fields: Option<Vec<String>>) -> Value {
    let Some(fields) = fields else {
        return result;
    };

    let project = |map: serde_json::Map<String, Value>| {
        let map: serde_json::Map<String, Value> = map
            .into_iter()
            .filter(|(key, _)| fields.iter().any(|f| f == key))
            .collect();
        Value::Object(map)
    };

    match result {
        Value::Object(map) => project(map),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(map) => project(map),
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

fn parse<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|e| ProviderError::Validation(format!("invalid tool arguments: {}", e)))
}

async fn invoke(client: &BinanceClient, name: &str, args: Value) -> Result<Value> {
    let result = match name {
        "binance.ping" => to_value(client.ping().await?)?,
        "binance.get_server_time" => json!({ "serverTime": client.server_time().await? }),
        "binance.get_exchange_info" => {
            let p: OptionalSymbolParam = parse(args)?;
            to_value(client.exchange_info(p.symbol.as_deref()).await?)?
        }
        "binance.get_orderbook" => {
            let p: OrderbookParam = parse(args)?;
            to_value(client.order_book(&p.symbol, p.limit).await?)?
        }
        "binance.get_recent_trades" => {
            let p: TradesParam = parse(args)?;
            to_value(client.recent_trades(&p.symbol, p.limit).await?)?
        }
        "binance.get_agg_trades" => {
            let p: AggTradesParam = parse(args)?;
            to_value(
                client
                    .agg_trades(&p.symbol, p.from_id, p.start_time, p.end_time, p.limit)
                    .await?,
            )?
        }
        "binance.get_klines" => {
            let p: KlinesParam = parse(args)?;
            to_value(
                client
                    .klines(&p.symbol, &p.interval, p.start_time, p.end_time, p.limit)
                    .await?,
            )?
        }
        "binance.get_avg_price" => {
            let p: SymbolParam = parse(args)?;
            to_value(client.avg_price(&p.symbol).await?)?
        }
        "binance.get_ticker" => {
            let p: SymbolParam = parse(args)?;
            to_value(client.ticker_24hr(&p.symbol).await?)?
        }
        "binance.get_price" => {
            let p: SymbolParam = parse(args)?;
            to_value(client.ticker_price(&p.symbol).await?)?
        }
        "binance.get_book_ticker" => {
            let p: SymbolParam = parse(args)?;
            to_value(client.book_ticker(&p.symbol).await?)?
        }
        "binance.place_order" => {
            let request = parse(args)?;
            client.place_order(&request).await?
        }
        "binance.test_order" => {
            let request = parse(args)?;
            client.test_order(&request).await?
        }
        "binance.get_order" => {
            let p: OrderRefParam = parse(args)?;
            to_value(
                client
                    .get_order(&p.symbol, p.order_id, p.orig_client_order_id.as_deref())
                    .await?,
            )?
        }
        "binance.cancel_order" => {
            let p: OrderRefParam = parse(args)?;
            to_value(
                client
                    .cancel_order(&p.symbol, p.order_id, p.orig_client_order_id.as_deref())
                    .await?,
            )?
        }
        "binance.cancel_all_orders" => {
            let p: SymbolParam = parse(args)?;
            to_value(client.cancel_all_orders(&p.symbol).await?)?
        }
        "binance.get_open_orders" => {
            let p: OptionalSymbolParam = parse(args)?;
            to_value(client.open_orders(p.symbol.as_deref()).await?)?
        }
        "binance.get_all_orders" => {
            let p: AllOrdersParam = parse(args)?;
            to_value(
                client
                    .all_orders(&p.symbol, p.order_id, p.start_time, p.end_time, p.limit)
                    .await?,
            )?
        }
        "binance.get_account" => to_value(client.account().await?)?,
        "binance.get_my_trades" => {
            let p: MyTradesParam = parse(args)?;
            to_value(
                client
                    .my_trades(
                        &p.symbol,
                        p.order_id,
                        p.start_time,
                        p.end_time,
                        p.from_id,
                        p.limit,
                    )
                    .await?,
            )?
        }
        "binance.create_listen_key" => to_value(client.create_listen_key().await?)?,
        "binance.keepalive_listen_key" => {
            let p: ListenKeyParam = parse(args)?;
            to_value(client.keepalive_listen_key(&p.listen_key).await?)?
        }
        "binance.close_listen_key" => {
            let p: ListenKeyParam = parse(args)?;
            to_value(client.close_listen_key(&p.listen_key).await?)?
        }
        // catalog::find already filtered unknown names
        other => return Err(ProviderError::ToolNotFound(other.to_string())),
    };
    Ok(result)
}

fn to_value<T: serde::Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_tool_is_rejected() {
        let client = BinanceClient::new();
        let err = dispatch(&client, "binance.withdraw", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn signed_tool_without_credentials_fails_before_parsing() {
        let client = BinanceClient::new();
        // Arguments are invalid for the tool; the auth check must win.
        let err = dispatch(&client, "binance.get_account", json!({"bogus": true}))
            .await
            .unwrap_err();
        match err {
            ProviderError::AuthRequired(msg) => {
                assert!(msg.contains("BINANCE_SECRET_KEY"), "{}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn user_stream_tool_without_api_key_fails() {
        let client = BinanceClient::new();
        let err = dispatch(&client, "binance.create_listen_key", Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::AuthRequired(_)));
    }

    #[tokio::test]
    async fn non_object_arguments_are_rejected() {
        let client = BinanceClient::new();
        let err = dispatch(&client, "binance.ping", json!([1, 2]))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }

    #[test]
    fn fields_hint_is_stripped_from_arguments() {
        let (args, fields) =
            take_fields_hint(json!({"symbol": "BTCUSDT", "fields": ["lastPrice"]})).unwrap();
        assert_eq!(args, json!({"symbol": "BTCUSDT"}));
        assert_eq!(fields, Some(vec!["lastPrice".to_string()]));
    }

    #[test]
    fn malformed_fields_hint_is_a_validation_error() {
        let err = take_fields_hint(json!({"fields": "lastPrice"})).unwrap_err();
        assert!(matches!(err, ProviderError::Validation(_)));
    }

    #[test]
    fn fields_hint_projects_objects_and_arrays() {
        let object = json!({"symbol": "BTCUSDT", "lastPrice": "1", "volume": "2"});
        let projected = apply_fields_hint(object, Some(vec!["lastPrice".to_string()]));
        assert_eq!(projected, json!({"lastPrice": "1"}));

        let array = json!([
            {"id": 1, "price": "1.0"},
            {"id": 2, "price": "2.0"}
        ]);
        let projected = apply_fields_hint(array, Some(vec!["id".to_string()]));
        assert_eq!(projected, json!([{"id": 1}, {"id": 2}]));
    }

    #[test]
    fn absent_fields_hint_passes_result_through() {
        let result = json!({"a": 1});
        assert_eq!(apply_fields_hint(result.clone(), None), result);
    }
}
