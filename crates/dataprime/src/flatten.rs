use crate::error::Result;
use crate::record::LogRecord;
use serde_json::{Map, Value};

/// Extract the raw result entries from a query response body.
///
/// The body is newline-delimited JSON: the first document is a query ack and
/// is ignored, the second carries `result.results`. A missing second document
/// or an absent/empty list is a successful zero-result response; only a
/// second document that is not JSON is an error.
pub fn parse_results(body: &str) -> Result<Vec<Value>> {
    let mut documents = body.lines().map(str::trim).filter(|line| !line.is_empty());
    let Some(_ack) = documents.next() else {
        return Ok(Vec::new());
    };
    let Some(results_doc) = documents.next() else {
        log::info!("Query response carried no result document");
        return Ok(Vec::new());
    };

    let mut parsed: Value = serde_json::from_str(results_doc)?;
    let results = match parsed.pointer_mut("/result/results") {
        Some(Value::Array(entries)) => std::mem::take(entries),
        _ => Vec::new(),
    };
    if results.is_empty() {
        log::info!("No logs found for the given time period");
    }
    Ok(results)
}

/// Decode the `userData` payload of one entry.
///
/// Entries whose `userData` is missing or not a JSON object are skipped with
/// a warning.
pub fn user_data(entry: &Value) -> Option<Map<String, Value>> {
    let raw = match entry.get("userData")? {
        Value::String(raw) => raw,
        other => {
            log::warn!("Skipping entry with non-string userData: {other}");
            return None;
        }
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) | Err(_) => {
            log::warn!("Failed to parse userData JSON: {raw}");
            None
        }
    }
}

/// Subsystem names carried in `userData`, in response order.
///
/// Duplicates are preserved.
pub fn service_names(entries: &[Value]) -> Vec<String> {
    entries
        .iter()
        .filter_map(user_data)
        .filter_map(|data| match data.get("subsystemname") {
            Some(Value::String(name)) if !name.is_empty() => Some(name.clone()),
            _ => None,
        })
        .collect()
}

/// Flatten raw entries into records.
///
/// `logRecord.body.log` wins when present: it is decoded as JSON if possible
/// and kept as plain text otherwise. Entries without it fall back to
/// `userData`, where undecodable payloads are skipped.
pub fn flatten_records(entries: &[Value]) -> Vec<LogRecord> {
    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(text) = body_log(entry) {
            records.push(LogRecord::from_body_text(text));
            continue;
        }

        match entry.get("userData") {
            Some(_) => {
                if let Some(object) = user_data(entry) {
                    records.push(LogRecord::from_object(object));
                }
            }
            None => records.push(LogRecord::Unrecognized(Map::new())),
        }
    }
    log::info!("Found {} log entries", records.len());
    records
}

fn body_log(entry: &Value) -> Option<&str> {
    entry
        .pointer("/logRecord/body/log")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
}
