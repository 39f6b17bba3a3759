use crate::timestamp::format_timestamp;
use coralogix_dataprime::LogRecord;
use coralogix_protocol::ErrorDetail;

/// Format recent-error records; records without body text are dropped.
pub fn error_details(records: &[LogRecord]) -> Vec<ErrorDetail> {
    records
        .iter()
        .filter_map(|record| match record {
            LogRecord::Entry(entry) => {
                let body = entry.body.as_deref().filter(|b| !b.is_empty())?;
                Some(ErrorDetail {
                    timestamp: entry.timestamp.as_deref().map(format_timestamp).unwrap_or_default(),
                    service: entry.service.clone().unwrap_or_default(),
                    severity: entry.severity.clone().unwrap_or_default(),
                    log_message: body.to_string(),
                })
            }
            LogRecord::Unstructured(text) if !text.is_empty() => Some(ErrorDetail {
                timestamp: String::new(),
                service: String::new(),
                severity: String::new(),
                log_message: text.clone(),
            }),
            _ => None,
        })
        .collect()
}
