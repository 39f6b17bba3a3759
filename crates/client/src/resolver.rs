//! Service-name resolution.
//!
//! Tiers run in order and stop at the first hit:
//!
//! 1. match cache (keyed by the name exactly as requested)
//! 2. exact, case-sensitive membership in the fetched service names
//! 3. LLM suggestion, accepted only if it is one of the fetched names
//! 4. [`best_match_basic`]: case-insensitive equality, then shortest substring match
//!
//! Every hit is written through to the match cache; a miss is not cached.

use crate::completion::{CompletionRequest, CompletionService};
use crate::error::Result;
use crate::query_service::{QueryMetadata, QueryRequest, QueryService};
use crate::service_cache::{MatchCache, ServiceNameCache};
use coralogix_dataprime::{parse_results, service_names, QueryTemplates};
use serde::Deserialize;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that finds the best matching Coralogix service name. Always respond with valid JSON.";
const MAX_COMPLETION_TOKENS: u32 = 500;
const COMPLETION_TEMPERATURE: f32 = 0.1;

#[derive(Deserialize)]
struct LlmMatch {
    service_name: Option<String>,
}

pub struct ServiceNameResolver {
    templates: QueryTemplates,
    metadata: QueryMetadata,
    query_service: Arc<dyn QueryService>,
    completion: Arc<dyn CompletionService>,
    names: ServiceNameCache,
    matches: MatchCache,
}

impl ServiceNameResolver {
    pub fn new(
        templates: QueryTemplates,
        metadata: QueryMetadata,
        query_service: Arc<dyn QueryService>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self::with_name_cache(
            templates,
            metadata,
            query_service,
            completion,
            ServiceNameCache::new(),
        )
    }

    pub fn with_name_cache(
        templates: QueryTemplates,
        metadata: QueryMetadata,
        query_service: Arc<dyn QueryService>,
        completion: Arc<dyn CompletionService>,
        names: ServiceNameCache,
    ) -> Self {
        Self {
            templates,
            metadata,
            query_service,
            completion,
            names,
            matches: MatchCache::new(),
        }
    }

    /// Previously resolved name for `requested`, if any.
    pub fn cached_match(&self, requested: &str) -> Option<String> {
        self.matches.get(requested)
    }

    /// Service names known to the platform for this application.
    ///
    /// Served from cache within the TTL. Failures are logged and yield an
    /// empty list without touching the cache.
    pub async fn fetch_service_names(&self) -> Vec<String> {
        if let Some(names) = self.names.get() {
            log::info!("Returning cached service names");
            return names;
        }

        match self.try_fetch_service_names().await {
            Ok(names) => names,
            Err(e) => {
                log::error!("Error fetching service names: {e}");
                Vec::new()
            }
        }
    }

    async fn try_fetch_service_names(&self) -> Result<Vec<String>> {
        let request = QueryRequest {
            query: self.templates.service_names(),
            metadata: self.metadata.clone(),
        };
        let body = self.query_service.execute(&request).await?;
        let entries = parse_results(&body)?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        let names = service_names(&entries);
        log::info!("Found {} service names", names.len());
        self.names.store(names.clone());
        Ok(names)
    }

    /// Resolve a possibly inexact service name to a registered one.
    pub async fn resolve(&self, requested: &str) -> Option<String> {
        if requested.is_empty() {
            log::error!("No service name provided");
            return None;
        }

        if let Some(hit) = self.matches.get(requested) {
            log::info!("Returning cached match for service name: {requested}");
            return Some(hit);
        }

        let candidates = self.fetch_service_names().await;
        if candidates.is_empty() {
            log::error!("No service names available");
            return None;
        }

        if candidates.iter().any(|candidate| candidate == requested) {
            log::info!("Found exact match for service name: {requested}");
            return Some(self.remember(requested, requested));
        }

        match self.llm_match(requested, &candidates).await {
            Ok(Some(suggested)) => {
                log::info!("LLM found match for service name: {requested} -> {suggested}");
                return Some(self.remember(requested, &suggested));
            }
            Ok(None) => log::info!("LLM offered no usable match for {requested}"),
            Err(e) => log::warn!("Error in LLM matching: {e}"),
        }

        log::info!("Falling back to basic matching");
        match best_match_basic(requested, &candidates) {
            Some(found) => {
                log::info!("Basic matching found match for service name: {requested} -> {found}");
                Some(self.remember(requested, &found))
            }
            None => {
                log::warn!("No match found for service name: {requested}");
                None
            }
        }
    }

    fn remember(&self, requested: &str, resolved: &str) -> String {
        self.matches.insert(requested, resolved);
        resolved.to_string()
    }

    /// Ask the completion service; `Ok(None)` when the answer is unusable.
    async fn llm_match(&self, requested: &str, candidates: &[String]) -> Result<Option<String>> {
        let request = CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: match_prompt(requested, candidates),
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: COMPLETION_TEMPERATURE,
        };
        let raw = self.completion.complete(request).await?;

        let parsed: LlmMatch = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                log::warn!("Failed to parse LLM response as JSON: {e}");
                return Ok(None);
            }
        };
        Ok(parsed
            .service_name
            .filter(|name| candidates.iter().any(|candidate| candidate == name)))
    }
}

fn match_prompt(requested: &str, candidates: &[String]) -> String {
    let listed = serde_json::to_string(candidates).unwrap_or_default();
    format!(
        "Find the best match for the service name \"{requested}\" from the list of available service names.\n\
         The Coralogix service names available are: {listed}.\n\
         \n\
         Format the response as a JSON object with:\n\
         {{\"service_name\": \"best matching Coralogix service name\"}}"
    )
}

/// Deterministic fallback matcher.
///
/// Case-insensitive equality wins; otherwise the shortest candidate that
/// contains, or is contained in, the target (first one on equal length).
pub fn best_match_basic(target: &str, candidates: &[String]) -> Option<String> {
    if target.is_empty() || candidates.is_empty() {
        return None;
    }
    let target = target.to_lowercase();

    if let Some(exact) = candidates.iter().find(|c| c.to_lowercase() == target) {
        return Some(exact.clone());
    }

    candidates
        .iter()
        .filter(|c| {
            let lowered = c.to_lowercase();
            lowered.contains(&target) || target.contains(&lowered)
        })
        .min_by_key(|c| c.chars().count())
        .cloned()
}
