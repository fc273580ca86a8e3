use crate::domain::errors::{ConfigError, DomainResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Read-only access to the configuration loaded at start-up
pub trait ConfigurationPort: Send + Sync {
    fn get_keycloak_config(&self) -> &KeycloakConfig;

    fn get_http_config(&self) -> &HttpConfig;

    fn get_logging_config(&self) -> &LoggingConfig;

    fn get_server_config(&self) -> &ServerConfig;

    fn validate(&self) -> DomainResult<()>;

    fn is_development(&self) -> bool;
}

/// Backend location and the service credential used for admin calls.
///
/// `client_id` is also the client under which `CreateRole` namespaces new
/// roles.
#[derive(Clone, Serialize, Deserialize)]
pub struct KeycloakConfig {
    pub url: String,
    pub realm: String,
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for KeycloakConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycloakConfig")
            .field("url", &self.url)
            .field("realm", &self.realm)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

impl KeycloakConfig {
    pub fn new(
        url: impl Into<String>,
        realm: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            realm: realm.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.url.is_empty() {
            return Err(missing("KEYCLOAK_URL"));
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "KEYCLOAK_URL".to_string(),
                message: "Must start with http:// or https://".to_string(),
            }
            .into());
        }

        if self.realm.is_empty() {
            return Err(missing("KEYCLOAK_REALM"));
        }

        if self.client_id.is_empty() {
            return Err(missing("KEYCLOAK_CLIENT_ID"));
        }

        if self.client_secret.is_empty() {
            return Err(missing("KEYCLOAK_CLIENT_SECRET"));
        }

        Ok(())
    }

    /// `{url}/realms/{realm}/protocol/openid-connect/token`
    pub fn get_token_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.url.trim_end_matches('/'),
            self.realm
        )
    }
}

fn missing(key: &str) -> crate::domain::errors::DomainError {
    ConfigError::MissingRequired {
        key: key.to_string(),
    }
    .into()
}

/// Settings for the one HTTP client shared by every adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            user_agent: concat!("keycloak-rpc-gateway/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_CONNECT_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn get_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// The process-wide HTTP client. Safe to clone and share across tasks.
    pub fn build_client(&self) -> DomainResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.get_timeout())
            .connect_timeout(self.get_connect_timeout())
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| {
                ConfigError::InvalidValue {
                    key: "HTTP".to_string(),
                    message: format!("could not build HTTP client: {e}"),
                }
                .into()
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

/// Listener settings for the RPC surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 50051 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub keycloak: KeycloakConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Defaults for everything but the backend settings
    pub fn new(keycloak: KeycloakConfig) -> Self {
        Self {
            environment: Environment::default(),
            keycloak,
            http: HttpConfig::default(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.keycloak.validate()?;
        self.http.validate()?;
        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| missing(key));

        let environment = lookup("ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "ENVIRONMENT".to_string(),
                message: "Must be one of: development, test, staging, production".to_string(),
            })?;

        let keycloak = KeycloakConfig {
            url: required("KEYCLOAK_URL")?,
            realm: required("KEYCLOAK_REALM")?,
            client_id: required("KEYCLOAK_CLIENT_ID")?,
            client_secret: required("KEYCLOAK_CLIENT_SECRET")?,
        };

        let defaults = HttpConfig::default();
        let http = HttpConfig {
            timeout_seconds: parse_or(&lookup, "HTTP_TIMEOUT_SECONDS", defaults.timeout_seconds)?,
            connect_timeout_seconds: parse_or(
                &lookup,
                "HTTP_CONNECT_TIMEOUT_SECONDS",
                defaults.connect_timeout_seconds,
            )?,
            user_agent: lookup("HTTP_USER_AGENT").unwrap_or(defaults.user_agent),
        };

        let logging = LoggingConfig {
            level: parse_or(&lookup, "LOG_LEVEL", LogLevel::Info)?,
            format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Compact)?,
        };

        let server = ServerConfig {
            port: parse_or(&lookup, "PORT", ServerConfig::default().port)?,
        };

        let config = AppConfig {
            environment,
            keycloak,
            http,
            logging,
            server,
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> DomainResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| {
            ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            }
            .into()
        }),
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {s}")),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}
