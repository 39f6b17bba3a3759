use crate::timestamp::format_timestamp;
use coralogix_dataprime::LogRecord;
use coralogix_protocol::ContextEntry;

pub const MATCH_PREFIX: &str = ">>> ";
pub const CONTEXT_PREFIX: &str = "    ";

/// Cut a window of `window` lines on each side of every line containing
/// `search_term` (case-insensitive).
///
/// Each hit yields its own entry; overlapping windows are not merged.
pub fn extract_context(records: &[LogRecord], search_term: &str, window: usize) -> Vec<ContextEntry> {
    let needle = search_term.to_lowercase();
    let mut results = Vec::new();

    for record in records {
        let (timestamp, service, body) = match record {
            LogRecord::Entry(entry) => match entry.body.as_deref() {
                Some(body) => (
                    entry.timestamp.as_deref().map(format_timestamp).unwrap_or_default(),
                    entry.service.clone().unwrap_or_default(),
                    body,
                ),
                None => continue,
            },
            LogRecord::Unstructured(text) => (String::new(), String::new(), text.as_str()),
            LogRecord::HttpAggregate(_) | LogRecord::Unrecognized(_) => {
                log::debug!("Skipping record without body text");
                continue;
            }
        };

        let lines: Vec<&str> = body.split('\n').collect();
        for hit in lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
        {
            let start = hit.saturating_sub(window);
            let end = hit.saturating_add(window).saturating_add(1).min(lines.len());
            let context = (start..end)
                .map(|i| {
                    let prefix = if i == hit { MATCH_PREFIX } else { CONTEXT_PREFIX };
                    format!("{prefix}{}", lines[i])
                })
                .collect::<Vec<_>>()
                .join("\n");

            results.push(ContextEntry {
                timestamp: timestamp.clone(),
                service: service.clone(),
                context,
            });
        }
    }

    results
}
