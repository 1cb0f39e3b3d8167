use std::path::PathBuf;

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

use crate::ConfigError;

pub(crate) const BASE_URL_VAR: &str = "PANTRYMAP_BASE_URL";

#[derive(Clone)]
pub struct AppConfig {
    /// Backend origin without a trailing slash. Unset is fine for commands
    /// that never reach the backend; see [`AppConfig::require_base_url`].
    pub base_url: Option<String>,
    /// Informational; logged at startup and not used to switch behaviour.
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub geolocation_timeout_ms: u64,
    pub views_path: PathBuf,
    pub view: String,
}

impl AppConfig {
    /// The backend origin, for commands that talk to it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `PANTRYMAP_BASE_URL` was unset or blank.
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        self.base_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar(BASE_URL_VAR.to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Backend origins sometimes carry basic-auth credentials.
        f.debug_struct("AppConfig")
            .field("base_url", &self.base_url.as_ref().map(|_| "[redacted]"))
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("geolocation_timeout_ms", &self.geolocation_timeout_ms)
            .field("views_path", &self.views_path)
            .field("view", &self.view)
            .finish()
    }
}
