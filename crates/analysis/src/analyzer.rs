use coralogix_dataprime::LogRecord;
use coralogix_protocol::{AnalysisResult, ApiAnalysis, ApiStat, TOP_API_LIMIT};
use std::collections::HashMap;

pub const NO_LOGS_SUMMARY: &str = "No logs found for analysis";

const UNKNOWN_PATH: &str = "unknown";

/// Rank aggregate rows by count.
///
/// Rows are keyed by (path, method, status). A repeated key overwrites the
/// earlier count in place (the remote aggregation already groups by that key),
/// and `total_requests` sums the retained counts. Ties keep encounter order.
pub fn analyze(records: &[LogRecord]) -> AnalysisResult {
    let mut stats: Vec<ApiStat> = Vec::new();
    let mut index: HashMap<(String, String, String), usize> = HashMap::new();

    for record in records {
        let LogRecord::HttpAggregate(row) = record else {
            continue;
        };
        let Some(path) = row.path.as_deref().filter(|p| *p != UNKNOWN_PATH) else {
            continue;
        };

        let key = (path.to_string(), row.method.clone(), row.status_code.clone());
        match index.get(&key) {
            Some(&slot) => stats[slot].count = row.count,
            None => {
                index.insert(key, stats.len());
                stats.push(ApiStat {
                    path: path.to_string(),
                    method: row.method.clone(),
                    status_code: row.status_code.clone(),
                    count: row.count,
                });
            }
        }
    }

    let total_requests = stats.iter().map(|stat| stat.count).sum();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats.truncate(TOP_API_LIMIT);

    AnalysisResult {
        total_requests,
        top_apis: stats,
    }
}

/// [`analyze`], or a summary note when there is nothing to analyze.
pub fn summarize(records: &[LogRecord]) -> ApiAnalysis {
    if records.is_empty() {
        return ApiAnalysis::Summary {
            summary: NO_LOGS_SUMMARY.to_string(),
        };
    }
    ApiAnalysis::Report(analyze(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coralogix_dataprime::{HttpAggregate, LogEntry};
    use pretty_assertions::assert_eq;

    fn row(path: Option<&str>, method: &str, status: &str, count: u64) -> LogRecord {
        LogRecord::HttpAggregate(HttpAggregate {
            path: path.map(str::to_string),
            method: method.to_string(),
            status_code: status.to_string(),
            count,
        })
    }

    #[test]
    fn ranks_endpoints_by_count() {
        let records = vec![
            row(Some("/api/v1/users"), "GET", "200", 100),
            row(Some("/api/v1/orders"), "POST", "400", 50),
        ];

        let result = analyze(&records);
        assert_eq!(result.total_requests, 150);
        assert_eq!(result.top_apis.len(), 2);
        assert_eq!(result.top_apis[0].path, "/api/v1/users");
        assert_eq!(result.top_apis[0].count, 100);
        assert_eq!(result.top_apis[1].path, "/api/v1/orders");
    }

    #[test]
    fn skips_missing_and_unknown_paths_and_other_shapes() {
        let records = vec![
            row(None, "GET", "200", 7),
            row(Some("unknown"), "GET", "200", 9),
            LogRecord::Entry(LogEntry::default()),
            LogRecord::Unstructured("GET /x 200".to_string()),
            row(Some("/ok"), "GET", "200", 1),
        ];

        let result = analyze(&records);
        assert_eq!(result.total_requests, 1);
        assert_eq!(result.top_apis.len(), 1);
        assert_eq!(result.top_apis[0].path, "/ok");
    }

    #[test]
    fn duplicate_keys_overwrite_instead_of_summing() {
        let records = vec![
            row(Some("/a"), "GET", "200", 5),
            row(Some("/b"), "GET", "200", 3),
            row(Some("/a"), "GET", "200", 2),
        ];

        let result = analyze(&records);
        assert_eq!(result.total_requests, 5);
        assert_eq!(result.top_apis[0].path, "/b");
        assert_eq!(result.top_apis[1].path, "/a");
        assert_eq!(result.top_apis[1].count, 2);
    }

    #[test]
    fn keeps_top_ten_with_stable_ties() {
        let records: Vec<LogRecord> = (0..12)
            .map(|i| row(Some(&format!("/p{i}")), "GET", "200", if i < 2 { 1 } else { 10 }))
            .collect();

        let result = analyze(&records);
        assert_eq!(result.top_apis.len(), TOP_API_LIMIT);
        assert_eq!(result.total_requests, 102);
        let paths: Vec<&str> = result.top_apis.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths[0], "/p2");
        assert_eq!(paths[9], "/p11");
    }

    #[test]
    fn empty_input_summarizes() {
        assert_eq!(
            summarize(&[]),
            ApiAnalysis::Summary {
                summary: NO_LOGS_SUMMARY.to_string()
            }
        );
        assert!(summarize(&[row(Some("/a"), "GET", "200", 1)]).report().is_some());
    }
}
