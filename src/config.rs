use std::env;

#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        OpenAIConfig {
            api_key: None,
            base_url: None,
            timeout_secs: None,
        }
    }
}

impl OpenAIConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("IMAGELAB_OPENAI_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY"))
            .ok();
        let base_url = env::var("IMAGELAB_OPENAI_BASE_URL").ok();
        let timeout_secs = env::var("IMAGELAB_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok());

        OpenAIConfig {
            api_key,
            base_url,
            timeout_secs,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }
}
