//! DataPrime query templates.
//!
//! Status codes are stored as strings on the platform, so every range filter
//! compares quoted three-digit bounds (`'400' <= code <= '499'`).

pub const SEARCH_RESULT_LIMIT: usize = 100;

const PATH_EXTRACTION: &str = r"| extract $d.path into $d using regexp(e=/(?<new_path>^.+)\?.+/) | groupby $d.new_path, $d.http_method, $d.status_code aggregate count() as log_count";

const ERROR_VOCABULARY: &[&str] = &[
    "error",
    "exception",
    "failed",
    "failure",
    "stacktrace",
    "traceback",
];

const BODY_FIELD: &str = "$d.logRecord.body.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpClass {
    Success,
    ClientError,
    ServerError,
    Critical,
}

impl HttpClass {
    /// Inclusive string bounds of the status-code filter.
    pub fn status_bounds(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Success => Some(("200", "399")),
            Self::ClientError => Some(("400", "499")),
            Self::ServerError => Some(("500", "599")),
            Self::Critical => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Success => "2XX",
            Self::ClientError => "4XX",
            Self::ServerError => "5XX",
            Self::Critical => "CRITICAL",
        }
    }
}

#[derive(Debug, Clone)]
pub struct QueryTemplates {
    application_name: String,
}

impl QueryTemplates {
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
        }
    }

    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    fn source(&self) -> String {
        format!(
            "source logs | filter $l.applicationname == '{}'",
            self.application_name
        )
    }

    /// Distinct non-null subsystem names of the application.
    pub fn service_names(&self) -> String {
        format!(
            "{} | filter $l.subsystemname != null | groupby $l.subsystemname",
            self.source()
        )
    }

    /// Request breakdown grouped by normalized path, method and status.
    pub fn http(&self, service_name: &str, class: HttpClass) -> String {
        let mut query = format!(
            "{} | filter $l.subsystemname == '{service_name}' ",
            self.source()
        );
        match class.status_bounds() {
            Some((low, high)) => {
                query.push_str(&format!(
                    " | filter ($d.status_code >= '{low}' && $d.status_code <= '{high}') | filter $d.http_method != null"
                ));
            }
            None => query.push_str(" | filter $m.severity == CRITICAL"),
        }
        query.push_str(PATH_EXTRACTION);
        query
    }

    /// Free-text search: conditions split on the literal `and`, ANDed together.
    pub fn search(&self, service_name: &str, search: &str) -> String {
        let mut query = format!("{} | filter $l.subsystemname == '{service_name}'", self.source());

        let conditions: Vec<String> = search
            .split("and")
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(search_condition)
            .collect();
        if !conditions.is_empty() {
            query.push_str(&format!(" | filter ({})", conditions.join(" && ")));
        }

        query.push_str(&format!(" | limit {SEARCH_RESULT_LIMIT}"));
        query
    }

    /// CRITICAL/ERROR entries that mention a failure or carry a 4xx/5xx code.
    pub fn recent_errors(&self, service_name: &str) -> String {
        let vocabulary = ERROR_VOCABULARY
            .iter()
            .map(|word| format!("{BODY_FIELD}.contains('{word}')"))
            .collect::<Vec<_>>()
            .join(" || ");
        format!(
            "{} | filter $l.subsystemname == '{service_name}' \
             | filter ($m.severity == CRITICAL || $m.severity == ERROR) \
             | filter ({vocabulary} || ($d.status_code >= '400' && $d.status_code <= '599'))",
            self.source()
        )
    }
}

fn search_condition(term: &str) -> String {
    if is_status_code(term) {
        format!(
            "({BODY_FIELD}.contains(' {term} ') || \
             {BODY_FIELD}.contains('\"status\":\"{term}\"') || \
             {BODY_FIELD}.contains('\"status\": {term}'))"
        )
    } else {
        format!("{BODY_FIELD}.contains('{}')", term.replace('\'', "\\'"))
    }
}

fn is_status_code(term: &str) -> bool {
    term.len() == 3 && term.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn templates() -> QueryTemplates {
        QueryTemplates::new("test-app")
    }

    #[test]
    fn client_error_query_is_byte_stable() {
        let query = templates().http("test-service", HttpClass::ClientError);
        assert_eq!(
            query,
            "source logs | filter $l.applicationname == 'test-app' \
             | filter $l.subsystemname == 'test-service'  \
             | filter ($d.status_code >= '400' && $d.status_code <= '499') \
             | filter $d.http_method != null\
             | extract $d.path into $d using regexp(e=/(?<new_path>^.+)\\?.+/) \
             | groupby $d.new_path, $d.http_method, $d.status_code aggregate count() as log_count"
        );
        assert!(query.contains("filter $l.subsystemname == 'test-service'"));
        assert!(query.contains("filter ($d.status_code >= '400' && $d.status_code <= '499')"));
    }

    #[test]
    fn status_ranges_per_class() {
        let t = templates();
        assert!(t
            .http("svc", HttpClass::ServerError)
            .contains("($d.status_code >= '500' && $d.status_code <= '599')"));
        assert!(t
            .http("svc", HttpClass::Success)
            .contains("($d.status_code >= '200' && $d.status_code <= '399')"));

        let critical = t.http("svc", HttpClass::Critical);
        assert!(critical.contains("| filter $m.severity == CRITICAL"));
        assert!(!critical.contains("http_method != null"));
        assert!(critical.contains("aggregate count() as log_count"));
    }

    #[test]
    fn search_splits_on_and_and_expands_status_codes() {
        let query = templates().search("svc", "timeout and 504");
        assert_eq!(
            query,
            "source logs | filter $l.applicationname == 'test-app' \
             | filter $l.subsystemname == 'svc' \
             | filter ($d.logRecord.body.log.contains('timeout') && \
             ($d.logRecord.body.log.contains(' 504 ') || \
             $d.logRecord.body.log.contains('\"status\":\"504\"') || \
             $d.logRecord.body.log.contains('\"status\": 504'))) \
             | limit 100"
        );
    }

    #[test]
    fn search_escapes_single_quotes() {
        let query = templates().search("svc", "can't connect");
        assert!(query.contains("contains('can\\'t connect')"));
    }

    #[test]
    fn non_three_digit_numbers_are_plain_terms() {
        let query = templates().search("svc", "1234");
        assert!(query.contains("$d.logRecord.body.log.contains('1234')"));
        assert!(!query.contains("\"status\""));
    }

    #[test]
    fn recent_errors_filters_severity_and_vocabulary() {
        let query = templates().recent_errors("svc");
        assert!(query.contains("filter ($m.severity == CRITICAL || $m.severity == ERROR)"));
        for word in ERROR_VOCABULARY {
            assert!(query.contains(&format!("contains('{word}')")), "{word}");
        }
        assert!(query.contains("($d.status_code >= '400' && $d.status_code <= '599')"));
    }

    #[test]
    fn service_names_query_groups_subsystems() {
        assert_eq!(
            templates().service_names(),
            "source logs | filter $l.applicationname == 'test-app' \
             | filter $l.subsystemname != null | groupby $l.subsystemname"
        );
    }
}
