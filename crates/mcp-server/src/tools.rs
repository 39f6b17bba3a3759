//! MCP tools for Coralogix log analysis.
//!
//! Every tool answers with the pretty-printed JSON envelope produced by the
//! client; failures carry `"status": "error"` and set `is_error`.

use coralogix_client::CoralogixClient;
use coralogix_protocol::{ToolResult, ToolStatus, DEFAULT_CONTEXT_LINES};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const INSTRUCTIONS: &str = "Coralogix log analysis for a single application. Service names may be approximate; they are matched against the services that are actually logging. Use 'get_2xx_logs', 'get_4xx_logs' and 'get_5xx_logs' for per-endpoint traffic breakdowns, and 'get_logs_by_string' to find log lines with surrounding context.";

/// Coralogix MCP Service
#[derive(Clone)]
pub struct CoralogixService {
    client: Arc<CoralogixClient>,
    tool_router: ToolRouter<Self>,
}

impl CoralogixService {
    pub fn new(client: Arc<CoralogixClient>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_handler]
impl ServerHandler for CoralogixService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

// ============================================================================
// Tool Input Schemas
// ============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ServiceLogsRequest {
    /// Service (subsystem) name; approximate names are resolved
    #[schemars(description = "Service name to analyze; approximate names are matched")]
    pub service_name: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchLogsRequest {
    /// Text to search for; terms separated by `and` must all match
    #[schemars(description = "Text to search for. Terms joined with 'and' must all appear; three-digit terms also match status codes")]
    pub search_string: String,

    /// Service (subsystem) name; approximate names are resolved
    #[schemars(description = "Service name to search; approximate names are matched")]
    pub service_name: Option<String>,

    /// Lines of context on each side of a match (default: 100)
    #[schemars(description = "Lines of context before and after each match")]
    pub context_lines: Option<usize>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl CoralogixService {
    /// Successful traffic breakdown
    #[tool(
        description = "Analyze 2XX/3XX request logs for a service: request counts per endpoint (path, method, status), top 10 by volume."
    )]
    pub async fn get_2xx_logs(
        &self,
        Parameters(request): Parameters<ServiceLogsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .get_2xx_logs(request.service_name.as_deref())
            .await;
        Ok(render(&result))
    }

    /// Client error breakdown
    #[tool(
        description = "Analyze 4XX error logs for a service with both API endpoint statistics and recent detailed error messages."
    )]
    pub async fn get_4xx_logs(
        &self,
        Parameters(request): Parameters<ServiceLogsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .get_4xx_logs(request.service_name.as_deref())
            .await;
        Ok(render(&result))
    }

    /// Server error breakdown
    #[tool(
        description = "Analyze 5XX error logs for a service with both API endpoint statistics and recent detailed error messages."
    )]
    pub async fn get_5xx_logs(
        &self,
        Parameters(request): Parameters<ServiceLogsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let result = self
            .client
            .get_5xx_logs(request.service_name.as_deref())
            .await;
        Ok(render(&result))
    }

    /// Free-text search
    #[tool(
        description = "Search a service's logs for a string and return the surrounding lines of every match (match lines are prefixed with '>>> ')."
    )]
    pub async fn get_logs_by_string(
        &self,
        Parameters(request): Parameters<SearchLogsRequest>,
    ) -> Result<CallToolResult, McpError> {
        let context_lines = request.context_lines.unwrap_or(DEFAULT_CONTEXT_LINES);
        let result = self
            .client
            .get_logs_by_string(
                &request.search_string,
                request.service_name.as_deref(),
                context_lines,
            )
            .await;
        Ok(render(&result))
    }
}

fn render<T: Serialize>(result: &ToolResult<T>) -> CallToolResult {
    let text = serde_json::to_string_pretty(result).unwrap_or_default();
    match result.status() {
        ToolStatus::Success => CallToolResult::success(vec![Content::text(text)]),
        ToolStatus::Error => CallToolResult::error(vec![Content::text(text)]),
    }
}
