//! HTTP transport error handling
//!
//! Maps internal errors to JSON-RPC error objects and HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::jsonrpc::{JsonRpcError, JsonRpcResponse};
use super::session::SessionError;
use crate::error::ProviderError;

/// HTTP transport errors
#[derive(Debug, thiserror::Error)]
pub enum HttpTransportError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}

impl HttpTransportError {
    /// Converts to a JSON-RPC error object.
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        match self {
            HttpTransportError::Session(SessionError::SessionNotFound(_))
            | HttpTransportError::Session(SessionError::InvalidSessionId) => {
                JsonRpcError::session_missing()
            }
            HttpTransportError::Session(SessionError::SessionExpired(_)) => {
                JsonRpcError::session_invalid()
            }
            HttpTransportError::Session(SessionError::SessionLimitExceeded(max)) => {
                JsonRpcError::session_limit_exceeded(*max)
            }
            HttpTransportError::JsonParse(_) => JsonRpcError::parse_error(),
            HttpTransportError::MethodNotFound(method) => {
                JsonRpcError::new(-32601, format!("Method not found: {}", method))
            }
            HttpTransportError::InvalidParams(msg) => {
                JsonRpcError::new(-32602, format!("Invalid params: {}", msg))
            }
            HttpTransportError::Provider(err) => match err {
                ProviderError::ToolNotFound(_) | ProviderError::Validation(_) => {
                    JsonRpcError::new(-32602, err.to_string())
                }
                ProviderError::AuthRequired(_) => JsonRpcError::new(-32600, err.to_string()),
                _ => JsonRpcError::new(-32603, err.to_string()),
            },
        }
    }

    /// HTTP status code paired with the JSON-RPC error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpTransportError::Session(SessionError::SessionLimitExceeded(_)) => {
                StatusCode::TOO_MANY_REQUESTS
            }
            HttpTransportError::Session(_) => StatusCode::UNAUTHORIZED,
            HttpTransportError::JsonParse(_) => StatusCode::BAD_REQUEST,
            HttpTransportError::MethodNotFound(_) => StatusCode::NOT_FOUND,
            HttpTransportError::InvalidParams(_) => StatusCode::BAD_REQUEST,
            HttpTransportError::Provider(err) => match err {
                ProviderError::ToolNotFound(_) | ProviderError::Validation(_) => {
                    StatusCode::BAD_REQUEST
                }
                ProviderError::AuthRequired(_) => StatusCode::UNAUTHORIZED,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for HttpTransportError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let jsonrpc_error = self.to_jsonrpc_error();

        // No request context here, so the response id is null.
        let response = JsonRpcResponse::error(jsonrpc_error, serde_json::json!(null));

        (status, Json(response)).into_response()
    }
}

/// Result type for HTTP transport operations
pub type Result<T> = std::result::Result<T, HttpTransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_not_found_maps_to_unauthorized() {
        let err = HttpTransportError::Session(SessionError::SessionNotFound(uuid::Uuid::new_v4()));

        assert_eq!(err.to_jsonrpc_error().code, -32002);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn method_not_found_maps_to_404() {
        let err = HttpTransportError::MethodNotFound("unknown/method".to_string());

        assert_eq!(err.to_jsonrpc_error().code, -32601);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn session_limit_maps_to_429() {
        let err = HttpTransportError::Session(SessionError::SessionLimitExceeded(50));

        let jsonrpc_err = err.to_jsonrpc_error();
        assert_eq!(jsonrpc_err.code, -32000);
        assert!(jsonrpc_err.data.is_some());
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn missing_credentials_map_to_unauthorized() {
        let err = HttpTransportError::Provider(ProviderError::AuthRequired(
            "binance.get_account requires credentials".to_string(),
        ));

        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_jsonrpc_error().code, -32600);
    }

    #[test]
    fn unknown_tool_maps_to_bad_request() {
        let err =
            HttpTransportError::Provider(ProviderError::ToolNotFound("binance.nope".to_string()));

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_jsonrpc_error().code, -32602);
    }
}
