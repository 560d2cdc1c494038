//! MCP ServerHandler Implementation
//!
//! Implements the rmcp ServerHandler trait by rendering `tools/list` from
//! the shared catalog and forwarding `tools/call` to the shared dispatcher.
//! No tool logic lives here.

use crate::error::ProviderError;
use crate::mcp::server::BinanceServer;
use crate::tools;
use rmcp::handler::server::ServerHandler;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, Implementation, InitializeResult,
    ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, Tool,
    ToolsCapability,
};
use rmcp::service::{RequestContext, RoleServer};
use serde_json::Value;
use std::sync::Arc;

impl ServerHandler for BinanceServer {
    fn get_info(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "mcp-binance-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Binance Spot MCP Server".to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Binance spot exchange tools: market data, order placement and \
                management, account queries and user-data-stream listen keys. \
                Trading and account tools require BINANCE_API_KEY and \
                BINANCE_SECRET_KEY."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _params: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = tools::catalog()
            .into_iter()
            .map(|spec| {
                let schema = match spec.input_schema {
                    Value::Object(map) => map,
                    _ => serde_json::Map::new(),
                };
                Tool::new(spec.name, spec.description, Arc::new(schema))
            })
            .collect();

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = request
            .arguments
            .map(Value::Object)
            .unwrap_or(Value::Null);

        let result = tools::dispatch(&self.client, &request.name, args)
            .await
            .map_err(to_error_data)?;

        Ok(CallToolResult::success(vec![Content::text(
            result.to_string(),
        )]))
    }
}

fn to_error_data(err: ProviderError) -> ErrorData {
    match &err {
        ProviderError::ToolNotFound(_) | ProviderError::Validation(_) => {
            ErrorData::invalid_params(err.to_string(), None)
        }
        ProviderError::AuthRequired(_) => ErrorData::invalid_request(err.to_string(), None),
        _ => ErrorData::internal_error(err.to_string(), None),
    }
}
