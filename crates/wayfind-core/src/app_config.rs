use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Ola Maps credential. Only commands that call the provider need it.
    pub places_api_key: Option<String>,
    pub places_base_url: String,
    pub places_request_timeout_secs: u64,
    pub places_user_agent: String,
    pub places_max_retries: u32,
    pub places_retry_backoff_base_ms: u64,
    pub dense_radius_km: f64,
    pub sparse_radius_km: f64,
    pub similarity_threshold: f64,
    pub detail_concurrency: usize,
}

impl AppConfig {
    /// Returns the provider API key or the error a provider-backed command
    /// should fail with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `OLA_MAPS_API_KEY` was not set.
    pub fn require_places_api_key(&self) -> Result<&str, ConfigError> {
        self.places_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OLA_MAPS_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "places_api_key",
                &self.places_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field(
                "places_request_timeout_secs",
                &self.places_request_timeout_secs,
            )
            .field("places_user_agent", &self.places_user_agent)
            .field("places_max_retries", &self.places_max_retries)
            .field(
                "places_retry_backoff_base_ms",
                &self.places_retry_backoff_base_ms,
            )
            .field("dense_radius_km", &self.dense_radius_km)
            .field("sparse_radius_km", &self.sparse_radius_km)
            .field("similarity_threshold", &self.similarity_threshold)
            .field("detail_concurrency", &self.detail_concurrency)
            .finish()
    }
}
