use crate::completion::{CompletionService, OpenAiCompletion};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::query_service::{HttpQueryService, QueryMetadata, QueryRequest, QueryService, QueryWindow};
use crate::resolver::ServiceNameResolver;
use crate::service_cache::ServiceNameCache;
use coralogix_analysis::error_details;
use coralogix_dataprime::{flatten_records, parse_results, HttpClass, LogRecord, QueryTemplates};
use coralogix_protocol::ErrorDetail;
use std::sync::Arc;

pub struct CoralogixClient {
    templates: QueryTemplates,
    window: QueryWindow,
    metadata: QueryMetadata,
    query_service: Arc<dyn QueryService>,
    resolver: ServiceNameResolver,
}

impl CoralogixClient {
    /// Build a client talking to the configured HTTP endpoints.
    ///
    /// The query window is fixed here as `[now - time_range, now]`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let query_service = Arc::new(HttpQueryService::new(
            config.api_url.clone(),
            config.coralogix_api_key.clone(),
            config.query_timeout,
        )?);
        let completion = Arc::new(OpenAiCompletion::new(
            config.llm_base_url.clone(),
            config.openai_api_key.clone(),
            config.completion_model(),
            config.llm_timeout,
        )?);
        log::info!(
            "Coralogix client for application '{}' using model {}",
            config.application_name,
            config.model
        );

        Ok(Self::with_services(
            config.application_name,
            QueryWindow::ending_now(config.time_range_minutes),
            query_service,
            completion,
        ))
    }

    pub fn with_services(
        application_name: impl Into<String>,
        window: QueryWindow,
        query_service: Arc<dyn QueryService>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        Self::with_name_cache(
            application_name,
            window,
            query_service,
            completion,
            ServiceNameCache::new(),
        )
    }

    pub fn with_name_cache(
        application_name: impl Into<String>,
        window: QueryWindow,
        query_service: Arc<dyn QueryService>,
        completion: Arc<dyn CompletionService>,
        names: ServiceNameCache,
    ) -> Self {
        let templates = QueryTemplates::new(application_name);
        let metadata = QueryMetadata::for_window(window);
        let resolver = ServiceNameResolver::with_name_cache(
            templates.clone(),
            metadata.clone(),
            Arc::clone(&query_service),
            completion,
            names,
        );
        Self {
            templates,
            window,
            metadata,
            query_service,
            resolver,
        }
    }

    pub fn application_name(&self) -> &str {
        self.templates.application_name()
    }

    pub fn window(&self) -> QueryWindow {
        self.window
    }

    pub fn resolver(&self) -> &ServiceNameResolver {
        &self.resolver
    }

    /// Prime the service-name cache; returns how many names were seen.
    pub async fn initialize(&self) -> usize {
        let names = self.resolver.fetch_service_names().await;
        log::info!(
            "Initialized Coralogix client with {} service names",
            names.len()
        );
        names.len()
    }

    pub async fn fetch_service_names(&self) -> Vec<String> {
        self.resolver.fetch_service_names().await
    }

    pub async fn resolve_service_name(&self, requested: Option<&str>) -> Option<String> {
        self.resolver.resolve(requested.unwrap_or_default()).await
    }

    /// Resolution failure is a hard error here: no query without a target.
    async fn require_service(&self, requested: Option<&str>) -> Result<String> {
        let requested = requested.unwrap_or_default();
        if requested.is_empty() {
            return Err(ClientError::NoServiceName);
        }
        self.resolver
            .resolve(requested)
            .await
            .ok_or_else(|| ClientError::UnresolvedService(requested.to_string()))
    }

    pub async fn http_generate_query(&self, service_name: Option<&str>, class: HttpClass) -> Result<String> {
        let service = self.require_service(service_name).await?;
        Ok(self.templates.http(&service, class))
    }

    pub async fn search_generate_query(&self, search: &str, service_name: Option<&str>) -> Result<String> {
        let service = self.require_service(service_name).await?;
        Ok(self.templates.search(&service, search))
    }

    pub async fn recent_errors_generate_query(&self, service_name: Option<&str>) -> Result<String> {
        let service = self.require_service(service_name).await?;
        Ok(self.templates.recent_errors(&service))
    }

    /// Run a query and flatten the response.
    ///
    /// `Ok(vec![])` means the query matched nothing; `Err` means the fetch
    /// itself failed.
    pub async fn search_logs(&self, query: &str) -> Result<Vec<LogRecord>> {
        let request = QueryRequest {
            query: query.to_string(),
            metadata: self.metadata.clone(),
        };
        let body = self.query_service.execute(&request).await?;
        let entries = parse_results(&body)?;
        Ok(flatten_records(&entries))
    }

    /// Recent CRITICAL/ERROR entries for a service, formatted for display.
    pub async fn search_recent_error_logs(&self, service_name: Option<&str>) -> Result<Vec<ErrorDetail>> {
        let query = self.recent_errors_generate_query(service_name).await?;
        let records = self.search_logs(&query).await?;
        Ok(error_details(&records))
    }
}
