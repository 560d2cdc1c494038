//! Binance HTTP Client
//!
//! Transport layer for the Binance REST API. Three request modes:
//!
//! - public: no credentials, plain GET
//! - user stream: API key header, never signed (listen-key lifecycle only)
//! - signed: server-time prefetch, canonical query, HMAC-SHA256 signature
//!
//! The client never retries and never backs off; every failure propagates
//! as a typed [`BinanceError`].

use crate::binance::query::QueryParams;
use crate::binance::sign::sign;
use crate::binance::types::ServerTime;
use crate::config::{Credentials, SecretString};
use crate::error::BinanceError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Header carrying the API key on every non-public request.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Default `recvWindow` (ms) appended to signed requests when the caller
/// does not supply one.
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5000;

const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Binance REST API client
///
/// Wraps `reqwest::Client` with the base endpoint and optional credentials.
/// Cheap to clone; credentials are immutable for the lifetime of an
/// instance. Without an API key only public operations are possible; the
/// secret key additionally enables signed (trading/account) operations.
#[derive(Clone)]
pub struct BinanceClient {
    http: Client,
    base_url: String,
    api_key: Option<SecretString>,
    secret_key: Option<SecretString>,
}

impl std::fmt::Debug for BinanceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinanceClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key)
            .field("secret_key", &self.secret_key)
            .finish()
    }
}

/// Error payload shape returned by the exchange on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: Option<i64>,
    msg: Option<String>,
}

impl BinanceClient {
    /// Creates a public-only client (no credentials).
    ///
    /// Base URL comes from `BINANCE_BASE_URL` when set, otherwise
    /// `https://api.binance.com`. Requests carry a 10 second client-side
    /// timeout; `recvWindow` is a server-side validity window, not a
    /// timeout.
    pub fn new() -> Self {
        Self {
            http: Self::build_http(Duration::from_secs(10)),
            base_url: Self::base_url_from_env(),
            api_key: None,
            secret_key: None,
        }
    }

    /// Creates a client with credentials from the environment.
    ///
    /// Reads `BINANCE_API_KEY` and `BINANCE_SECRET_KEY` independently: the
    /// API key alone enables user-data-stream calls, both halves enable
    /// signed calls, neither restricts the client to public endpoints.
    pub fn from_env() -> Self {
        let read = |var: &str| {
            std::env::var(var)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(SecretString::new)
        };

        Self {
            api_key: read("BINANCE_API_KEY"),
            secret_key: read("BINANCE_SECRET_KEY"),
            ..Self::new()
        }
    }

    /// Creates a client with an explicit credential pair.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            api_key: Some(credentials.api_key),
            secret_key: Some(credentials.secret_key),
            ..Self::new()
        }
    }

    /// Creates a client with an API key only (user-stream operations, no
    /// signing).
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(SecretString::new(api_key.into())),
            ..Self::new()
        }
    }

    /// Replaces the base endpoint. Used for testnet endpoints and tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_http(timeout: Duration) -> Client {
        Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mcp-binance-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client")
    }

    fn base_url_from_env() -> String {
        std::env::var("BINANCE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True when an API key is configured (user-stream calls possible).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// True when both credential halves are configured (signed calls
    /// possible).
    pub fn can_sign(&self) -> bool {
        self.api_key.is_some() && self.secret_key.is_some()
    }

    fn require_api_key(&self) -> Result<&str, BinanceError> {
        self.api_key
            .as_ref()
            .map(SecretString::expose_secret)
            .ok_or(BinanceError::MissingCredentials("API key not configured"))
    }

    fn require_secret_key(&self) -> Result<&str, BinanceError> {
        self.secret_key
            .as_ref()
            .map(SecretString::expose_secret)
            .ok_or(BinanceError::MissingCredentials("secret key not configured"))
    }

    /// Fetches the exchange's current server time (ms since Unix epoch).
    ///
    /// Signed requests use this instead of the local clock: skew beyond the
    /// server's tolerance window gets every signed call rejected.
    pub async fn server_time(&self) -> Result<i64, BinanceError> {
        let time: ServerTime = self.public_get("/api/v3/time", &QueryParams::new()).await?;
        Ok(time.server_time)
    }

    /// Performs an unauthenticated GET against `path`.
    pub async fn public_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, BinanceError> {
        let url = self.build_url(path, &params.encode()?);
        tracing::debug!(%url, "public request");
        self.execute(self.http.get(url)).await
    }

    /// Performs a user-data-stream request: API key header, never signed.
    pub async fn user_stream_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
    ) -> Result<T, BinanceError> {
        let api_key = self.require_api_key()?;
        let url = self.build_url(path, &params.encode()?);
        tracing::debug!(%method, %url, "user stream request");
        self.execute(self.http.request(method, url).header(API_KEY_HEADER, api_key))
            .await
    }

    /// Performs a signed request.
    ///
    /// Two-phase: fetch server time, then send the real call with
    /// `timestamp`, `recvWindow` and a trailing `signature` computed over
    /// the canonical query string of everything except the signature
    /// itself. GET/DELETE carry the signed string as the URL query; POST
    /// carries it as a form-urlencoded body with no URL query.
    pub async fn signed_request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: QueryParams,
    ) -> Result<T, BinanceError> {
        // Credential check happens before any network traffic.
        let api_key = self.require_api_key()?.to_string();
        self.require_secret_key()?;

        let server_time = self.server_time().await?;

        let mut envelope = params;
        envelope.push("timestamp", server_time);
        if !envelope.contains("recvWindow") {
            envelope.push("recvWindow", DEFAULT_RECV_WINDOW_MS);
        }

        let canonical = envelope.encode()?;
        let signature = sign(self.require_secret_key()?, &canonical)?;
        let signed_query = format!("{}&signature={}", canonical, signature);

        tracing::debug!(%method, path, "signed request");

        let request = if method == Method::POST {
            self.http
                .request(method, format!("{}{}", self.base_url, path))
                .header(API_KEY_HEADER, api_key)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(signed_query)
        } else {
            self.http
                .request(method, format!("{}{}?{}", self.base_url, path, signed_query))
                .header(API_KEY_HEADER, api_key)
        };

        self.execute(request).await
    }

    fn build_url(&self, path: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}{}?{}", self.base_url, path, query)
        }
    }

    /// Sends the request and decodes the response.
    ///
    /// Non-success statuses map to [`BinanceError::Api`]. A success response
    /// with a literally empty body decodes as an empty object (some mutating
    /// endpoints return nothing); a non-empty body that is not JSON is a
    /// [`BinanceError::MalformedResponse`].
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, BinanceError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        if body.is_empty() {
            return serde_json::from_value(serde_json::Value::Object(serde_json::Map::new()))
                .map_err(|e| {
                    BinanceError::MalformedResponse(format!(
                        "empty body for a response type that requires one: {}",
                        e
                    ))
                });
        }

        serde_json::from_slice(&body).map_err(|e| {
            BinanceError::MalformedResponse(format!("invalid JSON in response body: {}", e))
        })
    }

    fn api_error(status: StatusCode, body: &[u8]) -> BinanceError {
        match serde_json::from_slice::<ApiErrorBody>(body) {
            Ok(parsed) => BinanceError::Api {
                status: status.as_u16(),
                code: parsed.code,
                message: parsed.msg.unwrap_or_else(|| {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                }),
            },
            Err(_) => BinanceError::Api {
                status: status.as_u16(),
                code: None,
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            },
        }
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_masks_credentials() {
        let client = BinanceClient::with_credentials(Credentials::new(
            "visible-api-key-material",
            "visible-secret-key-material",
        ));
        let dbg = format!("{:?}", client);
        assert!(!dbg.contains("visible-api-key-material"));
        assert!(!dbg.contains("visible-secret-key-material"));
    }

    #[test]
    fn credential_capabilities() {
        assert!(!BinanceClient::new().has_api_key());
        assert!(!BinanceClient::new().can_sign());

        let key_only = BinanceClient::with_api_key("k");
        assert!(key_only.has_api_key());
        assert!(!key_only.can_sign());

        let full = BinanceClient::with_credentials(Credentials::new("k", "s"));
        assert!(full.can_sign());
    }

    #[test]
    fn api_error_parses_exchange_payload() {
        let err = BinanceClient::api_error(
            StatusCode::BAD_REQUEST,
            br#"{"code":-1121,"msg":"Invalid symbol."}"#,
        );
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

    #[test]
    fn api_error_falls_back_to_status_text() {
        let err = BinanceClient::api_error(StatusCode::BAD_GATEWAY, b"<html>nope</html>");
        match err {
            BinanceError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 502);
                assert_eq!(code, None);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
