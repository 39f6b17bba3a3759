//! Coralogix MCP Server
//!
//! Exposes Coralogix log analysis to AI agents via the MCP protocol.
//!
//! ## Tools
//!
//! - `get_2xx_logs` - Endpoint statistics for successful requests
//! - `get_4xx_logs` - Client error statistics plus recent error messages
//! - `get_5xx_logs` - Server error statistics plus recent error messages
//! - `get_logs_by_string` - Free-text search with context around each hit
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "coralogix": {
//!       "command": "coralogix-mcp",
//!       "env": {
//!         "OPENAI_API_KEY": "...",
//!         "CORALOGIX_API_KEY": "...",
//!         "APPLICATION_NAME": "my-app"
//!       }
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use coralogix_client::{
    ClientConfig, CoralogixClient, DEFAULT_API_URL, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_TIMEOUT,
    DEFAULT_MODEL, DEFAULT_TIME_RANGE_MINUTES,
};
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use std::sync::Arc;
use std::time::Duration;

mod tools;

use tools::CoralogixService;

#[derive(Parser)]
#[command(name = "coralogix-mcp")]
#[command(about = "Coralogix log analysis tools over MCP", long_about = None)]
#[command(version)]
struct Cli {
    /// Completion model (provider prefix such as `openai/` is accepted)
    #[arg(long, env = "MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// OpenAI API key used for service-name matching
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// Coralogix API key
    #[arg(long, env = "CORALOGIX_API_KEY", hide_env_values = true)]
    coralogix_api_key: String,

    /// Coralogix application whose logs are queried
    #[arg(long, env = "APPLICATION_NAME")]
    application_name: String,

    /// Length of the query window in minutes, ending at startup
    #[arg(long, env = "CORALOGIX_TIME_RANGE_MINUTES", default_value_t = DEFAULT_TIME_RANGE_MINUTES)]
    time_range_minutes: u32,

    /// DataPrime query endpoint
    #[arg(long, env = "CORALOGIX_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_LLM_BASE_URL)]
    llm_base_url: String,

    /// Timeout for a single completion request
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = DEFAULT_LLM_TIMEOUT.as_secs())]
    llm_timeout_secs: u64,
}

impl Cli {
    fn into_config(self) -> ClientConfig {
        let mut config = ClientConfig::new(
            self.model,
            self.openai_api_key,
            self.coralogix_api_key,
            self.application_name,
        );
        config.time_range_minutes = self.time_range_minutes;
        config.api_url = self.api_url;
        config.llm_base_url = self.llm_base_url;
        config.llm_timeout = Duration::from_secs(self.llm_timeout_secs);
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the MCP protocol
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = Cli::parse().into_config();
    log::debug!("Configuration: {config:?}");

    let client = Arc::new(CoralogixClient::new(config).context("invalid configuration")?);

    let warmup = Arc::clone(&client);
    tokio::spawn(async move {
        if warmup.initialize().await == 0 {
            log::warn!("No service names found during warm-up");
        }
    });

    log::info!("Starting Coralogix MCP server");

    let service = CoralogixService::new(client);
    let server = service.serve(stdio()).await?;

    server.waiting().await?;

    log::info!("Coralogix MCP server stopped");
    Ok(())
}
