use std::env;

/// API connection configuration.
///
/// Reads from the `TRAINER_API_URL` and `TRAINER_ACCESS_TOKEN` environment
/// variables, falling back to the deployed backend URL when unset.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend, without the `/api` prefix.
    pub base_url: String,
    /// Bearer token for authenticated endpoints. `None` until login.
    pub access_token: Option<String>,
}

impl ApiConfig {
    /// The default backend URL used when no environment variable is set.
    pub const DEFAULT_URL: &str = "https://smart-trainer-backend-cs9r.onrender.com";

    /// Build a config from the environment.
    ///
    /// Priority: `TRAINER_API_URL` env var, then the compile-time default.
    /// The token comes from `TRAINER_ACCESS_TOKEN` when present.
    pub fn from_env() -> Self {
        let base_url =
            env::var("TRAINER_API_URL").unwrap_or_else(|_| Self::DEFAULT_URL.to_owned());
        let access_token = env::var("TRAINER_ACCESS_TOKEN").ok();
        Self {
            base_url,
            access_token,
        }
    }

    /// Build a config from an explicit URL (useful for tests and CLI flags).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
        }
    }

    /// Set the bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Full URL for an API path. `path` must start with `/`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
