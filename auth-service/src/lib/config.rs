use std::env;
use std::fmt;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for auth-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub user_directory: UserDirectoryConfig,
    pub mail: MailConfig,
}

/// Listener ports.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub grpc_port: u16,
}

/// Token signing configuration. `secret` is required and has no default.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

/// User-service gRPC client configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct UserDirectoryConfig {
    pub grpc_url: String,
    pub timeout_ms: u64,
}

/// Outbound SMTP configuration for verification emails.
#[derive(Deserialize, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    /// Base URL the verification link points at; the user id is appended.
    pub verification_url: String,
    pub starttls: bool,
    pub timeout_ms: u64,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__GRPC_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = run_mode();

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}

/// Deployment mode from `RUN_MODE`, `development` when unset.
pub fn run_mode() -> String {
    env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string())
}

impl JwtConfig {
    /// # Errors
    /// `ConfigError::Message` if the value does not fit a duration
    pub fn access_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        ttl("jwt.access_ttl_seconds", self.access_ttl_seconds)
    }

    pub fn refresh_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        ttl("jwt.refresh_ttl_seconds", self.refresh_ttl_seconds)
    }
}

fn ttl(key: &str, seconds: i64) -> Result<chrono::Duration, ConfigError> {
    chrono::Duration::try_seconds(seconds)
        .ok_or_else(|| ConfigError::Message(format!("{} is out of range: {}", key, seconds)))
}

impl UserDirectoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl MailConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from_address", &self.from_address)
            .field("verification_url", &self.verification_url)
            .field("starttls", &self.starttls)
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}
