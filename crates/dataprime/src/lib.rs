//! # Coralogix DataPrime
//!
//! Pure, I/O-free pieces of the DataPrime query pipeline.
//!
//! ```text
//! QueryTemplates ──> query string ──> (remote query service)
//!                                          │
//!                                          v
//!                      raw NDJSON body ──> flatten ──> LogRecord[]
//! ```
//!
//! - [`QueryTemplates`] builds HTTP breakdown, free-text search, recent-error
//!   and service-name queries for one application.
//! - [`parse_results`] / [`flatten_records`] turn the two-document response
//!   into a uniform sequence of [`LogRecord`]s.

mod error;
mod flatten;
mod query;
mod record;

pub use error::{DataprimeError, Result};
pub use flatten::{flatten_records, parse_results, service_names, user_data};
pub use query::{HttpClass, QueryTemplates, SEARCH_RESULT_LIMIT};
pub use record::{HttpAggregate, LogEntry, LogRecord};
