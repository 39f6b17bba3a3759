//! The four tool operations.
//!
//! Each one catches every internal failure and reports it as
//! `{status: "error", message}`; nothing propagates past this layer.

use crate::client::CoralogixClient;
use crate::error::Result;
use coralogix_analysis::{analyze, extract_context, summarize};
use coralogix_dataprime::HttpClass;
use coralogix_protocol::{
    ApiAnalysis, ErrorLogsReport, SearchReport, ToolResult, TrafficReport,
};

const FETCH_FAILED: &str = "Error fetching logs";

impl CoralogixClient {
    pub async fn get_2xx_logs(&self, service_name: Option<&str>) -> ToolResult<TrafficReport> {
        self.try_traffic(service_name)
            .await
            .unwrap_or_else(|e| tool_failure("get_2xx_logs", e))
    }

    pub async fn get_4xx_logs(&self, service_name: Option<&str>) -> ToolResult<ErrorLogsReport> {
        self.try_error_logs(service_name, HttpClass::ClientError)
            .await
            .unwrap_or_else(|e| tool_failure("get_4xx_logs", e))
    }

    pub async fn get_5xx_logs(&self, service_name: Option<&str>) -> ToolResult<ErrorLogsReport> {
        self.try_error_logs(service_name, HttpClass::ServerError)
            .await
            .unwrap_or_else(|e| tool_failure("get_5xx_logs", e))
    }

    pub async fn get_logs_by_string(
        &self,
        search_string: &str,
        service_name: Option<&str>,
        context_lines: usize,
    ) -> ToolResult<SearchReport> {
        self.try_search(search_string, service_name, context_lines)
            .await
            .unwrap_or_else(|e| tool_failure("get_logs_by_string", e))
    }

    async fn try_traffic(&self, service_name: Option<&str>) -> Result<ToolResult<TrafficReport>> {
        let query = self.http_generate_query(service_name, HttpClass::Success).await?;
        let records = match self.search_logs(&query).await {
            Ok(records) => records,
            Err(e) => {
                log::error!("Error searching logs: {e}");
                return Ok(ToolResult::error(FETCH_FAILED));
            }
        };
        Ok(ToolResult::Success(TrafficReport::new(summarize(&records))))
    }

    async fn try_error_logs(
        &self,
        service_name: Option<&str>,
        class: HttpClass,
    ) -> Result<ToolResult<ErrorLogsReport>> {
        let query = self.http_generate_query(service_name, class).await?;
        let logs = self.search_logs(&query).await;

        let error_details = self
            .search_recent_error_logs(service_name)
            .await
            .unwrap_or_else(|e| {
                log::error!("Error searching recent error logs: {e}");
                Vec::new()
            });

        let label = class.label();
        let api_analysis = match logs {
            Err(e) => {
                log::error!("Error searching logs: {e}");
                ApiAnalysis::note(format!("Error fetching {label} error logs"))
            }
            Ok(records) if records.is_empty() => {
                ApiAnalysis::note(format!("No {label} errors found in the specified time period"))
            }
            Ok(records) => ApiAnalysis::Report(analyze(&records)),
        };

        Ok(ToolResult::Success(ErrorLogsReport::new(api_analysis, error_details)))
    }

    async fn try_search(
        &self,
        search_string: &str,
        service_name: Option<&str>,
        context_lines: usize,
    ) -> Result<ToolResult<SearchReport>> {
        let query = self.search_generate_query(search_string, service_name).await?;
        let records = match self.search_logs(&query).await {
            Ok(records) => records,
            Err(e) => {
                log::error!("Error searching logs: {e}");
                return Ok(ToolResult::error(FETCH_FAILED));
            }
        };
        if records.is_empty() {
            return Ok(ToolResult::Success(SearchReport::no_logs(search_string)));
        }

        let results = extract_context(&records, search_string, context_lines);
        Ok(ToolResult::Success(SearchReport::matches(search_string, results)))
    }
}

fn tool_failure<T>(tool: &str, err: crate::error::ClientError) -> ToolResult<T> {
    log::error!("Error in {tool}: {err}");
    ToolResult::error(err.to_string())
}
