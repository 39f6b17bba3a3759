use serde_json::{Map, Value};

/// One flattened result entry.
///
/// The platform payload has no fixed schema; records are classified once by
/// the keys they carry so consumers can match on shape instead of probing.
#[derive(Debug, Clone, PartialEq)]
pub enum LogRecord {
    /// Row produced by a `groupby ... aggregate count()` query.
    HttpAggregate(HttpAggregate),
    /// Structured log entry with optional metadata and body text.
    Entry(LogEntry),
    /// Body text that did not decode as a JSON object.
    Unstructured(String),
    /// Decoded object matching none of the known shapes.
    Unrecognized(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpAggregate {
    pub path: Option<String>,
    pub method: String,
    pub status_code: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogEntry {
    pub timestamp: Option<String>,
    pub service: Option<String>,
    pub severity: Option<String>,
    pub body: Option<String>,
}

const AGGREGATE_KEYS: &[&str] = &["new_path", "log_count"];
const ENTRY_KEYS: &[&str] = &["logRecord", "timestamp", "subsystemname", "severity"];

impl LogRecord {
    pub fn from_object(object: Map<String, Value>) -> Self {
        if AGGREGATE_KEYS.iter().any(|key| object.contains_key(*key)) {
            return Self::HttpAggregate(HttpAggregate {
                path: non_empty_string(object.get("new_path")),
                method: scalar_text(object.get("http_method")),
                status_code: scalar_text(object.get("status_code")),
                count: lenient_count(object.get("log_count")),
            });
        }

        if ENTRY_KEYS.iter().any(|key| object.contains_key(*key)) {
            return Self::Entry(LogEntry {
                timestamp: non_empty_string(object.get("timestamp")),
                service: non_empty_string(object.get("subsystemname")),
                severity: non_empty_string(object.get("severity")),
                body: body_text(object.get("logRecord")),
            });
        }

        Self::Unrecognized(object)
    }

    /// Classify decoded body text; anything but an object stays unstructured.
    pub fn from_body_text(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(object)) => Self::from_object(object),
            _ => Self::Unstructured(text.to_string()),
        }
    }
}

/// `logRecord.body` is either the text itself or an object with a `log` field.
fn body_text(log_record: Option<&Value>) -> Option<String> {
    let body = log_record?.as_object()?.get("body")?;
    match body {
        Value::String(text) => Some(text.clone()),
        Value::Object(fields) => non_empty_string(fields.get("log")),
        _ => None,
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn lenient_count(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn aggregate_rows_accept_numeric_or_string_counts() {
        let numeric = LogRecord::from_object(object(json!({
            "new_path": "/api/v1/users",
            "http_method": "GET",
            "status_code": "200",
            "log_count": 100
        })));
        let textual = LogRecord::from_object(object(json!({
            "new_path": "/api/v1/users",
            "http_method": "GET",
            "status_code": 200,
            "log_count": "100"
        })));
        assert_eq!(numeric, textual);
        match numeric {
            LogRecord::HttpAggregate(row) => {
                assert_eq!(row.path.as_deref(), Some("/api/v1/users"));
                assert_eq!(row.count, 100);
            }
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn entry_body_from_nested_log_or_plain_body() {
        let nested = LogRecord::from_object(object(json!({
            "timestamp": "2024-03-20T10:00:00Z",
            "subsystemname": "checkout",
            "logRecord": {"body": {"log": "line one\nline two"}}
        })));
        let plain = LogRecord::from_object(object(json!({
            "subsystemname": "checkout",
            "logRecord": {"body": "line one\nline two"}
        })));
        for record in [nested, plain] {
            match record {
                LogRecord::Entry(entry) => {
                    assert_eq!(entry.service.as_deref(), Some("checkout"));
                    assert_eq!(entry.body.as_deref(), Some("line one\nline two"));
                }
                other => panic!("unexpected record {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_objects_and_text_are_kept_apart() {
        assert!(matches!(
            LogRecord::from_object(object(json!({"foo": 1}))),
            LogRecord::Unrecognized(_)
        ));
        assert_eq!(
            LogRecord::from_body_text("GET /health 200"),
            LogRecord::Unstructured("GET /health 200".to_string())
        );
        assert_eq!(
            LogRecord::from_body_text("[1, 2]"),
            LogRecord::Unstructured("[1, 2]".to_string())
        );
    }
}
