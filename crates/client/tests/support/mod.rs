#![allow(dead_code)]

use async_trait::async_trait;
use coralogix_client::{
    ClientError, CompletionRequest, CompletionService, CoralogixClient, QueryRequest,
    QueryService, QueryWindow, Result, ServiceNameCache,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Responder = Box<dyn Fn(&str) -> Result<String> + Send + Sync>;

/// Query service answering from a closure and recording every query.
pub struct FakeQueryService {
    responder: Responder,
    queries: Mutex<Vec<String>>,
}

impl FakeQueryService {
    pub fn new(responder: impl Fn(&str) -> Result<String> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(responder),
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    pub fn calls_containing(&self, needle: &str) -> usize {
        self.queries().iter().filter(|q| q.contains(needle)).count()
    }
}

#[async_trait]
impl QueryService for FakeQueryService {
    async fn execute(&self, request: &QueryRequest) -> Result<String> {
        self.queries.lock().unwrap().push(request.query.clone());
        (self.responder)(&request.query)
    }
}

/// Completion service with a canned reply.
pub struct FakeCompletion {
    reply: Option<String>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request);
        self.reply
            .clone()
            .ok_or_else(|| ClientError::Completion("completion service unavailable".to_string()))
    }
}

pub const SERVICE_NAMES_MARKER: &str = "groupby $l.subsystemname";
pub const HTTP_MARKER: &str = "aggregate count() as log_count";
pub const RECENT_ERRORS_MARKER: &str = "$m.severity == ERROR";
pub const SEARCH_MARKER: &str = "| limit 100";

pub fn ndjson(results: Value) -> String {
    format!(
        "{}\n{}\n",
        json!({"queryId": {"queryId": "test"}}),
        json!({"result": {"results": results}})
    )
}

pub fn service_names_body(names: &[&str]) -> String {
    let entries: Vec<Value> = names
        .iter()
        .map(|name| {
            json!({
                "metadata": [],
                "labels": [],
                "userData": json!({"subsystemname": name}).to_string()
            })
        })
        .collect();
    ndjson(Value::Array(entries))
}

pub fn body_log_body(logs: &[Value]) -> String {
    let entries: Vec<Value> = logs
        .iter()
        .map(|log| json!({"logRecord": {"body": {"log": log.to_string()}}}))
        .collect();
    ndjson(Value::Array(entries))
}

pub fn not_found() -> ClientError {
    ClientError::Status {
        status: 404,
        body: "Not found".to_string(),
    }
}

pub fn client(query: Arc<FakeQueryService>, completion: Arc<FakeCompletion>) -> CoralogixClient {
    CoralogixClient::with_services("test-app", QueryWindow::ending_now(15), query, completion)
}

pub fn client_with_ttl(
    query: Arc<FakeQueryService>,
    completion: Arc<FakeCompletion>,
    ttl: std::time::Duration,
) -> CoralogixClient {
    CoralogixClient::with_name_cache(
        "test-app",
        QueryWindow::ending_now(15),
        query,
        completion,
        ServiceNameCache::with_ttl(ttl),
    )
}
