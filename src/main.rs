use mcp_binance_server::binance::BinanceClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments first to determine mode
    let args: Vec<String> = std::env::args().collect();
    let (mode, port) = parse_args(&args);

    // Logging always goes to stderr: in stdio mode stdout carries the MCP
    // protocol stream.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("starting mcp-binance-server in {} mode", mode);

    let client = BinanceClient::from_env();
    report_credentials(&client);

    match mode.as_str() {
        "stdio" => run_stdio(client).await?,
        "sse" => run_sse(client, port).await?,
        "http" => run_http(client, port).await?,
        _ => {
            eprintln!("Invalid mode: {}", mode);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Logs which credential-gated capabilities are available. Key material is
/// never logged.
fn report_credentials(client: &BinanceClient) {
    if client.can_sign() {
        tracing::info!("API credentials found, trading and account tools enabled");
    } else if client.has_api_key() {
        tracing::warn!("API key without secret, only public and listen-key tools will work");
    } else {
        tracing::warn!("no API credentials, only public market data tools will work");
        tracing::warn!("set BINANCE_API_KEY and BINANCE_SECRET_KEY for full functionality");
    }
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> (String, u16) {
    let mut mode = "stdio".to_string();
    let mut port = 0u16; // 0 means use the mode's default
    let mut port_set_explicitly = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                if i + 1 < args.len() {
                    mode = args[i + 1].clone();
                    i += 1;
                }
            }
            "--stdio" => mode = "stdio".to_string(),
            "--sse" => mode = "sse".to_string(),
            "--http" => mode = "http".to_string(),
            "--port" => {
                if i + 1 < args.len() {
                    port = args[i + 1].parse().unwrap_or(0);
                    port_set_explicitly = true;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !port_set_explicitly || port == 0 {
        port = match mode.as_str() {
            "http" => 3000,
            "sse" => 8000,
            _ => 0,
        };
    }

    (mode, port)
}

/// Print usage information
fn print_usage() {
    println!("mcp-binance-server - MCP server for the Binance spot exchange");
    println!();
    println!("USAGE:");
    println!("    mcp-binance-server [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --mode <MODE>       Transport mode: stdio, sse, or http (default: stdio)");
    println!("    --stdio             Run in stdio MCP mode (shortcut for --mode stdio)");
    println!("    --sse               Run in SSE mode (shortcut for --mode sse)");
    println!("    --http              Run in HTTP JSON-RPC mode (shortcut for --mode http)");
    println!("    --port <PORT>       Port to listen on (default: 8000 for SSE, 3000 for HTTP)");
    println!("    --help, -h          Print this help message");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    BINANCE_API_KEY       Binance API key (enables listen-key tools)");
    println!("    BINANCE_SECRET_KEY    Binance secret key (enables trading/account tools)");
    println!("    BINANCE_BASE_URL      Binance API base URL (default: https://api.binance.com)");
    println!("    HTTP_HOST             HTTP/SSE bind address (default: 127.0.0.1)");
    println!("    HTTP_PORT             HTTP port when --port is not given (default: 3000)");
    println!("    HTTP_MAX_SESSIONS     Concurrent HTTP session cap (default: 50)");
    println!("    HTTP_SESSION_TIMEOUT_MINUTES  HTTP session idle timeout (default: 30)");
    println!("    RUST_LOG              Logging level (default: info)");
    println!();
    println!("EXAMPLES:");
    println!("    # Serve a local MCP client over stdio");
    println!("    mcp-binance-server --stdio");
    println!();
    println!("    # Start the HTTP JSON-RPC server on a custom port");
    println!("    mcp-binance-server --mode http --port 8080");
}

#[cfg(feature = "mcp_server")]
async fn run_stdio(client: BinanceClient) -> anyhow::Result<()> {
    use mcp_binance_server::mcp::BinanceServer;
    use mcp_binance_server::transport::stdio::run_stdio_server;

    run_stdio_server(BinanceServer::with_client(client)).await
}

#[cfg(not(feature = "mcp_server"))]
async fn run_stdio(_client: BinanceClient) -> anyhow::Result<()> {
    anyhow::bail!("stdio mode requires the mcp_server feature")
}

#[cfg(feature = "mcp_server")]
async fn run_sse(client: BinanceClient, port: u16) -> anyhow::Result<()> {
    use mcp_binance_server::mcp::BinanceServer;
    use mcp_binance_server::transport::sse::run_sse_server;

    let addr = mcp_binance_server::config::HttpConfig::from_env().with_port(port).addr;
    run_sse_server(BinanceServer::with_client(client), addr).await
}

#[cfg(not(feature = "mcp_server"))]
async fn run_sse(_client: BinanceClient, _port: u16) -> anyhow::Result<()> {
    anyhow::bail!("sse mode requires the mcp_server feature")
}

#[cfg(feature = "http_transport")]
async fn run_http(client: BinanceClient, port: u16) -> anyhow::Result<()> {
    use mcp_binance_server::transport::http::start_http_server;

    let config = mcp_binance_server::config::HttpConfig::from_env().with_port(port);
    start_http_server(config, client).await
}

#[cfg(not(feature = "http_transport"))]
async fn run_http(_client: BinanceClient, _port: u16) -> anyhow::Result<()> {
    anyhow::bail!("http mode requires the http_transport feature")
}
