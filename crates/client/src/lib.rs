//! # Coralogix Client
//!
//! Log-query assistant core: resolves fuzzy service names, builds DataPrime
//! queries, runs them and post-processes the results.
//!
//! ## Architecture
//!
//! ```text
//! tool call (service_name?)
//!     │
//!     ├──> ServiceNameResolver
//!     │      ├─ MatchCache (requested -> resolved, never expires)
//!     │      ├─ ServiceNameCache (fetched names, 300 s TTL)
//!     │      ├─ exact match
//!     │      ├─ CompletionService (LLM suggestion, validated)
//!     │      └─ best_match_basic (substring heuristic)
//!     │
//!     ├──> QueryTemplates ──> QueryService ──> flatten_records
//!     │
//!     └──> analyze / extract_context / error_details ──> ToolResult
//! ```
//!
//! Remote collaborators sit behind [`QueryService`] and [`CompletionService`];
//! failures are never retried.

mod client;
mod completion;
mod config;
mod error;
mod operations;
mod query_service;
mod resolver;
mod service_cache;

pub use client::CoralogixClient;
pub use completion::{CompletionRequest, CompletionService, OpenAiCompletion};
pub use config::{
    ClientConfig, DEFAULT_API_URL, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_TIMEOUT, DEFAULT_MODEL,
    DEFAULT_TIME_RANGE_MINUTES, QUERY_TIMEOUT,
};
pub use error::{ClientError, Result};
pub use query_service::{HttpQueryService, QueryMetadata, QueryRequest, QueryService, QueryWindow};
pub use resolver::{best_match_basic, ServiceNameResolver};
pub use service_cache::{MatchCache, ServiceNameCache, SERVICE_NAME_TTL};

pub use coralogix_dataprime::{HttpClass, LogRecord};
