use crate::error::{ClientError, Result};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://ng-api-http.coralogixsg.com/api/v1/dataprime/query";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_TIME_RANGE_MINUTES: u32 = 15;
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct ClientConfig {
    pub model: String,
    pub openai_api_key: String,
    pub coralogix_api_key: String,
    pub application_name: String,
    pub time_range_minutes: u32,
    pub api_url: String,
    pub llm_base_url: String,
    pub query_timeout: Duration,
    pub llm_timeout: Duration,
}

// Keys stay out of debug output.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("model", &self.model)
            .field("application_name", &self.application_name)
            .field("time_range_minutes", &self.time_range_minutes)
            .field("api_url", &self.api_url)
            .field("llm_base_url", &self.llm_base_url)
            .field("query_timeout", &self.query_timeout)
            .field("llm_timeout", &self.llm_timeout)
            .finish_non_exhaustive()
    }
}

impl ClientConfig {
    pub fn new(
        model: impl Into<String>,
        openai_api_key: impl Into<String>,
        coralogix_api_key: impl Into<String>,
        application_name: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            openai_api_key: openai_api_key.into(),
            coralogix_api_key: coralogix_api_key.into(),
            application_name: application_name.into(),
            time_range_minutes: DEFAULT_TIME_RANGE_MINUTES,
            api_url: DEFAULT_API_URL.to_string(),
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            query_timeout: QUERY_TIMEOUT,
            llm_timeout: DEFAULT_LLM_TIMEOUT,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let required = [
            ("OpenAI API key", &self.openai_api_key),
            ("Coralogix API key", &self.coralogix_api_key),
            ("application name", &self.application_name),
            ("model", &self.model),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ClientError::Config(format!("{name} is required")));
            }
        }
        if self.time_range_minutes == 0 {
            return Err(ClientError::Config(
                "time range must be at least one minute".to_string(),
            ));
        }
        Ok(())
    }

    /// Model id as sent to an OpenAI-compatible endpoint (`openai/gpt-4o-mini` -> `gpt-4o-mini`).
    pub fn completion_model(&self) -> &str {
        self.model
            .split_once('/')
            .map(|(_, model)| model)
            .unwrap_or(&self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_validation() {
        let config = ClientConfig::new(DEFAULT_MODEL, "sk", "cx", "test-app");
        assert!(config.validate().is_ok());
        assert_eq!(config.time_range_minutes, 15);
        assert_eq!(config.completion_model(), "gpt-4o-mini");

        let missing = ClientConfig::new(DEFAULT_MODEL, "sk", " ", "test-app");
        let err = missing.validate().unwrap_err();
        assert_eq!(err.to_string(), "Invalid configuration: Coralogix API key is required");
    }

    #[test]
    fn bare_model_ids_pass_through() {
        let config = ClientConfig::new("gpt-4o", "sk", "cx", "app");
        assert_eq!(config.completion_model(), "gpt-4o");
    }

    #[test]
    fn debug_output_hides_keys() {
        let config = ClientConfig::new(DEFAULT_MODEL, "sk-secret", "cx-secret", "app");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
    }
}
