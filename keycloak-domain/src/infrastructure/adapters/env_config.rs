use crate::application::ports::{
    AppConfig, ConfigurationPort, HttpConfig, KeycloakConfig, LoggingConfig, ServerConfig,
};
use crate::domain::errors::DomainResult;

/// Configuration read once from the process environment (and an optional
/// `.env` file) at start-up
pub struct EnvConfigurationAdapter {
    config: AppConfig,
}

impl EnvConfigurationAdapter {
    pub fn new() -> DomainResult<Self> {
        let _ = dotenvy::dotenv();
        let config = AppConfig::from_env()?;
        Ok(Self { config })
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.config
    }
}

impl ConfigurationPort for EnvConfigurationAdapter {
    fn get_keycloak_config(&self) -> &KeycloakConfig {
        &self.config.keycloak
    }

    fn get_http_config(&self) -> &HttpConfig {
        &self.config.http
    }

    fn get_logging_config(&self) -> &LoggingConfig {
        &self.config.logging
    }

    fn get_server_config(&self) -> &ServerConfig {
        &self.config.server
    }

    fn validate(&self) -> DomainResult<()> {
        self.config.validate()
    }

    fn is_development(&self) -> bool {
        self.config.is_development()
    }
}
