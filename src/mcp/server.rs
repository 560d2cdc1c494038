//! MCP Server State
//!
//! The BinanceServer struct holds the shared exchange client. There is no
//! global client; every transport constructs (or is handed) an explicit
//! instance and the credential state travels with it.

use crate::binance::BinanceClient;

/// Binance MCP server
#[derive(Clone, Debug, Default)]
pub struct BinanceServer {
    /// Exchange client shared by all tool calls
    pub client: BinanceClient,
}

impl BinanceServer {
    /// Creates a server with credentials read from the environment.
    ///
    /// Missing credentials are not an error here; signed and user-stream
    /// tools fail at call time with an auth error instead.
    pub fn new() -> Self {
        Self {
            client: BinanceClient::from_env(),
        }
    }

    /// Creates a server around an existing client.
    pub fn with_client(client: BinanceClient) -> Self {
        Self { client }
    }
}
