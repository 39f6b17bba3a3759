use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const TOP_API_LIMIT: usize = 10;
pub const DEFAULT_CONTEXT_LINES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ApiStat {
    pub path: String,
    pub method: String,
    pub status_code: String,
    pub count: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default, JsonSchema)]
pub struct AnalysisResult {
    pub total_requests: u64,
    pub top_apis: Vec<ApiStat>,
}

/// What a tool reports under `api_analysis`.
///
/// Serialized untagged so agents see either the statistics object, a
/// `{"summary": ...}` object, or a bare explanatory string.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum ApiAnalysis {
    Report(AnalysisResult),
    Summary { summary: String },
    Note(String),
}

impl ApiAnalysis {
    pub fn note(message: impl Into<String>) -> Self {
        Self::Note(message.into())
    }

    pub fn report(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Report(report) => Some(report),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ContextEntry {
    pub timestamp: String,
    pub service: String,
    pub context: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ErrorDetail {
    pub timestamp: String,
    pub service: String,
    pub severity: String,
    pub log_message: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ToolError {
    pub status: ToolStatus,
    pub message: String,
}

impl ToolError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: ToolStatus::Error,
            message: message.into(),
        }
    }
}

/// Result of one tool call: either the tool's own report or the normalized
/// `{status: "error", message}` envelope.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum ToolResult<T> {
    Success(T),
    Error(ToolError),
}

impl<T> ToolResult<T> {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ToolError::new(message))
    }

    pub fn status(&self) -> ToolStatus {
        match self {
            Self::Success(_) => ToolStatus::Success,
            Self::Error(err) => err.status,
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error(err) => Some(&err.message),
        }
    }
}

/// `get_2xx_logs` output.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct TrafficReport {
    pub status: ToolStatus,
    pub api_analysis: ApiAnalysis,
}

impl TrafficReport {
    pub fn new(api_analysis: ApiAnalysis) -> Self {
        Self {
            status: ToolStatus::Success,
            api_analysis,
        }
    }
}

/// `get_4xx_logs` / `get_5xx_logs` output.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct ErrorLogsReport {
    pub status: ToolStatus,
    pub api_analysis: ApiAnalysis,
    pub error_details: Vec<ErrorDetail>,
    pub total_errors: usize,
}

impl ErrorLogsReport {
    pub fn new(api_analysis: ApiAnalysis, error_details: Vec<ErrorDetail>) -> Self {
        Self {
            status: ToolStatus::Success,
            api_analysis,
            total_errors: error_details.len(),
            error_details,
        }
    }
}

/// `get_logs_by_string` output.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, JsonSchema)]
pub struct SearchReport {
    pub status: ToolStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_matches: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub results: Vec<ContextEntry>,
}

impl SearchReport {
    pub fn matches(search_string: impl Into<String>, results: Vec<ContextEntry>) -> Self {
        Self {
            status: ToolStatus::Success,
            search_string: Some(search_string.into()),
            total_matches: Some(results.len()),
            message: None,
            results,
        }
    }

    pub fn no_logs(search_string: &str) -> Self {
        Self {
            status: ToolStatus::Success,
            search_string: None,
            total_matches: None,
            message: Some(format!("No logs found containing '{search_string}'")),
            results: Vec::new(),
        }
    }
}
