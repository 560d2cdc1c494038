//! HTTP request handlers for the MCP JSON-RPC endpoint
//!
//! POST /mcp routes:
//! - initialize: create a session, return its id in the Mcp-Session-Id header
//! - ping: liveness check
//! - tools/list: render the tool catalog
//! - tools/call: execute a tool through the shared dispatcher

use axum::{
    extract::State,
    http::{header::HeaderValue, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;
use uuid::Uuid;

use super::error::{HttpTransportError, Result};
use super::jsonrpc::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    ToolsCapability,
};
use super::session::{SessionError, SessionStore};
use crate::binance::BinanceClient;
use crate::error::ProviderError;
use crate::tools;

/// Header carrying the session id on every request after initialize.
pub const SESSION_HEADER: &str = "mcp-session-id";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Session store
    pub sessions: SessionStore,

    /// Exchange client shared by all tool calls
    pub client: BinanceClient,
}

/// Main JSON-RPC endpoint handler
pub async fn handle_jsonrpc(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<JsonRpcRequest>,
) -> Result<Response> {
    tracing::debug!(method = %request.method, "received JSON-RPC request");

    // Notifications get acknowledged without a body.
    if request.is_notification() {
        return Ok(StatusCode::ACCEPTED.into_response());
    }

    let session_id = extract_session_id(&headers)?;

    let response = match request.method.as_str() {
        "initialize" => {
            let (response, session_id) = handle_initialize(&state, request)?;
            return Ok(with_session_header(response, session_id));
        }
        "ping" => {
            require_session(&state, session_id)?;
            JsonRpcResponse::success(serde_json::json!({}), request_id(request))
        }
        "tools/list" => {
            require_session(&state, session_id)?;
            handle_tools_list(request)
        }
        "tools/call" => {
            require_session(&state, session_id)?;
            handle_tools_call(&state, request).await?
        }
        _ => {
            return Err(HttpTransportError::MethodNotFound(request.method));
        }
    };

    Ok((StatusCode::OK, Json(response)).into_response())
}

fn request_id(request: JsonRpcRequest) -> serde_json::Value {
    request.id.unwrap_or(serde_json::Value::Null)
}

fn require_session(state: &AppState, session_id: Option<Uuid>) -> Result<()> {
    match session_id {
        Some(sid) => Ok(state.sessions.validate_session(sid)?),
        None => Err(HttpTransportError::Session(SessionError::InvalidSessionId)),
    }
}

/// Creates a session and builds the initialize response.
fn handle_initialize(
    state: &AppState,
    request: JsonRpcRequest,
) -> Result<(JsonRpcResponse, Uuid)> {
    let client_metadata = HashMap::new();
    let session_id = state.sessions.create_session(client_metadata)?;

    tracing::info!(session_id = %session_id, "created HTTP session");

    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {
                list_changed: Some(false),
            }),
        },
        server_info: ServerInfo {
            name: "mcp-binance-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    let response = JsonRpcResponse::success(serde_json::to_value(result)?, request_id(request));

    Ok((response, session_id))
}

/// Attaches the session id header to the initialize response.
fn with_session_header(response: JsonRpcResponse, session_id: Uuid) -> Response {
    let mut http_response = (StatusCode::OK, Json(response)).into_response();

    if let Ok(value) = HeaderValue::from_str(&session_id.to_string()) {
        http_response.headers_mut().insert(SESSION_HEADER, value);
    }

    http_response
}

/// Renders the tool catalog.
fn handle_tools_list(request: JsonRpcRequest) -> JsonRpcResponse {
    let tools_array: Vec<serde_json::Value> = tools::catalog()
        .into_iter()
        .map(|spec| {
            serde_json::json!({
                "name": spec.name,
                "description": spec.description,
                "inputSchema": spec.input_schema,
                "annotations": { "readOnlyHint": spec.read_only },
            })
        })
        .collect();

    JsonRpcResponse::success(
        serde_json::json!({ "tools": tools_array }),
        request_id(request),
    )
}

/// Executes a tool call.
///
/// Exchange rejections surface as tool results with `isError: true`, the
/// MCP convention for execution failures. Protocol-level problems (unknown
/// tool, bad arguments, missing credentials) become JSON-RPC errors.
async fn handle_tools_call(state: &AppState, request: JsonRpcRequest) -> Result<JsonRpcResponse> {
    let params = request
        .params
        .clone()
        .ok_or_else(|| HttpTransportError::InvalidParams("Missing params".to_string()))?;

    let tool_name = params["name"]
        .as_str()
        .ok_or_else(|| HttpTransportError::InvalidParams("Missing tool name".to_string()))?
        .to_string();

    let tool_args = params
        .get("arguments")
        .cloned()
        .unwrap_or(serde_json::Value::Null);

    tracing::debug!(tool_name = %tool_name, "calling tool");

    let (text, is_error) = match tools::dispatch(&state.client, &tool_name, tool_args).await {
        Ok(result) => (result.to_string(), false),
        Err(ProviderError::BinanceApi(err)) => (
            serde_json::json!({ "error": err.to_string() }).to_string(),
            true,
        ),
        Err(err) => return Err(err.into()),
    };

    Ok(JsonRpcResponse::success(
        serde_json::json!({
            "content": [{
                "type": "text",
                "text": text
            }],
            "isError": is_error
        }),
        request_id(request),
    ))
}

/// Parses the session id header, when present.
fn extract_session_id(headers: &HeaderMap) -> Result<Option<Uuid>> {
    match headers.get(SESSION_HEADER) {
        Some(header_value) => {
            let session_str = header_value
                .to_str()
                .map_err(|_| HttpTransportError::Session(SessionError::InvalidSessionId))?;

            let session_id = Uuid::parse_str(session_str)
                .map_err(|_| HttpTransportError::Session(SessionError::InvalidSessionId))?;

            Ok(Some(session_id))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_header_is_parsed() {
        let mut headers = HeaderMap::new();
        let uuid = Uuid::new_v4();

        headers.insert(SESSION_HEADER, uuid.to_string().parse().unwrap());

        let result = extract_session_id(&headers).unwrap();
        assert_eq!(result, Some(uuid));
    }

    #[test]
    fn absent_session_header_is_none() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_id(&headers).unwrap(), None);
    }

    #[test]
    fn malformed_session_header_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_HEADER, "not-a-uuid".parse().unwrap());

        assert!(extract_session_id(&headers).is_err());
    }

    #[test]
    fn tools_list_renders_catalog() {
        let request = JsonRpcRequest::new("tools/list", None, Some(serde_json::json!(7)));
        let response = handle_tools_list(request);

        let result = response.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert!(!tools.is_empty());

        for tool in tools {
            assert!(tool["name"].as_str().unwrap().starts_with("binance."));
            assert!(tool["inputSchema"].is_object());
        }
    }
}
