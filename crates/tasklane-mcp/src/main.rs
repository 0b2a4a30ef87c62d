mod tools;
mod version;

use std::path::PathBuf;

use clap::Parser;
use rust_mcp_sdk::error::SdkResult;
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ProtocolVersion, ServerCapabilities, ServerCapabilitiesTools,
};
use rust_mcp_sdk::{
    mcp_server::{server_runtime, McpServerOptions},
    McpServer, StdioTransport, ToMcpServerHandler, TransportOptions,
};
use tracing::info;

use tasklane_core::bootstrap::bootstrap_workspace;

use crate::tools::{McpContext, TasklaneServerHandler};

#[derive(Parser)]
#[command(name = "tasklane-mcp", version = version::FULL)]
struct Args {
    /// Default project root for MCP tool calls; bootstrapped at startup.
    #[arg(long)]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> SdkResult<()> {
    // Logs go to stderr; stdout belongs to the MCP transport.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Some(root) = &args.root {
        match bootstrap_workspace(root) {
            Ok(report) => info!(
                dir = %report.dir.display(),
                tasks = report.task_count,
                "workspace ready"
            ),
            Err(err) => {
                eprintln!("Failed to prepare workspace: {err}");
                std::process::exit(1);
            }
        }
    }

    let server_details = InitializeResult {
        server_info: Implementation {
            name: "tasklane".into(),
            version: version::FULL.into(),
            title: Some("Tasklane MCP Server".into()),
            description: Some("MCP server for pointer-based tracking of a flat task file".into()),
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        meta: None,
        instructions: Some("Tasklane MCP server".into()),
        protocol_version: ProtocolVersion::V2025_11_25.into(),
    };

    let transport = StdioTransport::new(TransportOptions::default())?;
    let handler = TasklaneServerHandler {
        context: McpContext {
            default_root: args.root,
        },
    };

    let server = server_runtime::create_server(McpServerOptions {
        server_details,
        transport,
        handler: handler.to_mcp_server_handler(),
        task_store: None,
        client_task_store: None,
    });

    server.start().await
}
