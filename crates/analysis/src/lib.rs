//! # Coralogix Analysis
//!
//! Post-processing of flattened [`LogRecord`](coralogix_dataprime::LogRecord)s:
//!
//! - [`analyze`] / [`summarize`] rank HTTP aggregate rows into endpoint statistics
//! - [`extract_context`] cuts line windows around search hits
//! - [`error_details`] formats recent error entries
//! - [`format_timestamp`] renders ISO-8601 timestamps for humans

mod analyzer;
mod context;
mod errors;
mod timestamp;

pub use analyzer::{analyze, summarize, NO_LOGS_SUMMARY};
pub use context::{extract_context, CONTEXT_PREFIX, MATCH_PREFIX};
pub use errors::error_details;
pub use timestamp::format_timestamp;
