//! End-to-end signed-request flow against a simulated exchange.

use mcp_binance_server::binance::sign::sign;
use mcp_binance_server::binance::{BinanceClient, NewOrderRequest, API_KEY_HEADER};
use mcp_binance_server::config::Credentials;
use mcp_binance_server::error::BinanceError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";
const SECRET_KEY: &str = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
const SERVER_TIME: i64 = 1499827319559;

fn signing_client(server: &MockServer) -> BinanceClient {
    BinanceClient::with_credentials(Credentials::new(API_KEY, SECRET_KEY))
        .with_base_url(server.uri())
}

async fn mount_server_time(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v3/time"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "serverTime": SERVER_TIME
            })),
        )
        .mount(server)
        .await;
}

fn limit_order() -> NewOrderRequest {
    NewOrderRequest {
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
    }
}

#[tokio::test]
async fn signed_post_carries_form_body_with_trailing_signature() {
    let server = MockServer::start().await;
    mount_server_time(&server).await;

    // Test-order endpoint answers valid parameters with an empty body.
    Mock::given(method("POST"))
        .and(path("/api/v3/order/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = signing_client(&server);
    let result = client.test_order(&limit_order()).await.unwrap();
    assert_eq!(result, serde_json::json!({}));

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.url.path() == "/api/v3/order/test")
        .unwrap();

    // The signed payload travels in the body; the URL carries no query.
    assert!(post.url.query().is_none());
    assert_eq!(
        post.headers.get(API_KEY_HEADER).unwrap().to_str().unwrap(),
        API_KEY
    );
    assert_eq!(
        post.headers.get("content-type").unwrap().to_str().unwrap(),
        "application/x-www-form-urlencoded"
    );

    let body = String::from_utf8(post.body.clone()).unwrap();

    // Signature is the last parameter and recomputes from everything
    // before it.
    let (payload, signature) = body.rsplit_once("&signature=").unwrap();
    assert_eq!(signature, sign(SECRET_KEY, payload).unwrap());
    assert_eq!(signature.len(), 64);

    // Server time, not local time, and the default validity window.
    assert!(payload.contains(&format!("timestamp={}", SERVER_TIME)));
    assert!(payload.contains("recvWindow=5000"));

    // Caller parameters keep their insertion order.
    assert!(payload.starts_with("symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC"));
}

#[tokio::test]
async fn signed_get_carries_query_string() {
    let server = MockServer::start().await;
    mount_server_time(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/v3/order"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "symbol": "BTCUSDT",
            "orderId": 42,
            "status": "FILLED"
        })))
        .mount(&server)
        .await;

    let client = signing_client(&server);
    let order = client.get_order("BTCUSDT", Some(42), None).await.unwrap();
    assert_eq!(order.order_id, 42);

    let requests = server.received_requests().await.unwrap();
    let get = requests
        .iter()
        .find(|r| r.url.path() == "/api/v3/order")
        .unwrap();

    let query = get.url.query().unwrap().to_string();
    let (payload, signature) = query.rsplit_once("&signature=").unwrap();
    assert_eq!(signature, sign(SECRET_KEY, payload).unwrap());
    assert!(payload.starts_with("symbol=BTCUSDT&orderId=42"));
}

#[tokio::test]
async fn caller_supplied_recv_window_is_not_overridden() {
    let server = MockServer::start().await;
    mount_server_time(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v3/order/test"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut request = limit_order();
    request.recv_window = Some(10000);

    let client = signing_client(&server);
    client.test_order(&request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.url.path() == "/api/v3/order/test")
        .unwrap();
    let body = String::from_utf8(post.body.clone()).unwrap();

    assert!(body.contains("recvWindow=10000"));
    assert_eq!(body.matches("recvWindow=").count(), 1);
}

#[tokio::test]
async fn exchange_rejection_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/avgPrice"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "code": -1121,
            "msg": "Invalid symbol."
        })))
        .mount(&server)
        .await;

    let client = BinanceClient::new().with_base_url(server.uri());
    let err = client.avg_price("NOPEUSDT").await.unwrap_err();

    match err {
        BinanceError::Api {
            status,
            code,
            message,
        } => {
            assert_eq!(status, 400);
            assert_eq!(code, Some(-1121));
            assert_eq!(message, "Invalid symbol.");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn missing_secret_fails_before_any_network_traffic() {
    let server = MockServer::start().await;
    mount_server_time(&server).await;

    let client = BinanceClient::with_api_key(API_KEY).with_base_url(server.uri());
    let err = client.account().await.unwrap_err();

    assert!(matches!(err, BinanceError::MissingCredentials(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn user_stream_request_sends_key_without_signature() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v3/userDataStream"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "listenKey": "stream-key-123"
        })))
        .mount(&server)
        .await;

    // API key alone is enough; no secret configured.
    let client = BinanceClient::with_api_key(API_KEY).with_base_url(server.uri());
    let listen_key = client.create_listen_key().await.unwrap();
    assert_eq!(listen_key.listen_key, "stream-key-123");

    let requests = server.received_requests().await.unwrap();
    let post = &requests[0];
    assert_eq!(
        post.headers.get(API_KEY_HEADER).unwrap().to_str().unwrap(),
        API_KEY
    );
    assert!(post.url.query().unwrap_or("").find("signature").is_none());
    assert!(String::from_utf8(post.body.clone()).unwrap().is_empty());
}

#[tokio::test]
async fn malformed_success_body_is_reported_as_such() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/avgPrice"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = BinanceClient::new().with_base_url(server.uri());
    let err = client.avg_price("BTCUSDT").await.unwrap_err();

    assert!(matches!(err, BinanceError::MalformedResponse(_)));
}
