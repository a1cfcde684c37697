use std::path::PathBuf;

const DEFAULT_API_URL: &str = "https://api.linkedin.com";
const DEFAULT_LOGIN_URL: &str = "https://www.linkedin.com";
const DEFAULT_SCOPE: &str = "openid r_liteprofile r_emailaddress";
const DEFAULT_PRIVATE_KEY_PATH: &str = "jwtRS256.key";
const DEFAULT_PUBLIC_KEY_PATH: &str = "jwtRS256.key.pub";

/// Service configuration, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Client id registered with LinkedIn. Also the `aud` of issued ID tokens.
    pub client_id: String,
    pub client_secret: String,
    /// Redirect URI of the relying party (the Cognito user pool callback).
    pub redirect_uri: String,
    /// Base URL of the LinkedIn REST and token API.
    pub api_url: String,
    /// Base URL of the LinkedIn login pages. Defaults to a configured
    /// [`Config::api_url`], otherwise to the public login host.
    pub login_url: String,
    /// Scope reported in token responses, LinkedIn does not echo it.
    pub scope: String,
    pub port: u16,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    /// Collector endpoint. Logs stay on the console when unset.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    /// - a required variable is missing or empty
    /// - `PORT` is not a valid port number
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration from an arbitrary key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::Missing(key));

        let port = required("PORT")?;
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port))?;

        let login_url = optional("LINKEDIN_LOGIN_URL")
            .or_else(|| optional("LINKEDIN_API_URL"))
            .unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string());
        let api_url = optional("LINKEDIN_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            client_id: required("LINKEDIN_CLIENT_ID")?,
            client_secret: required("LINKEDIN_CLIENT_SECRET")?,
            redirect_uri: required("COGNITO_REDIRECT_URI")?,
            api_url: trim_trailing_slash(api_url),
            login_url: trim_trailing_slash(login_url),
            scope: optional("LINKEDIN_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            port,
            private_key_path: optional("PRIVATE_KEY_PATH")
                .unwrap_or_else(|| DEFAULT_PRIVATE_KEY_PATH.to_string())
                .into(),
            public_key_path: optional("PUBLIC_KEY_PATH")
                .unwrap_or_else(|| DEFAULT_PUBLIC_KEY_PATH.to_string())
                .into(),
            otlp_endpoint: optional("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }
}

fn trim_trailing_slash(url: String) -> String {
    match url.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => url,
    }
}

/// Configuration errors. All of them are fatal at startup.
#[derive(Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("environment variable {0} must be set and be a string")]
    Missing(&'static str),

    #[error("environment variable PORT must be set and be a number, got {0:?}")]
    InvalidPort(String),
}
