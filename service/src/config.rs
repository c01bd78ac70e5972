use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. config.yaml file (if exists)
/// 3. Environment variables with VL_ prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub swagger: SwaggerConfig,
}

/// Location of the vote-log data files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    /// Directory holding the YAML data files.
    #[serde(default = "default_data_dir")]
    pub dir: String,

    /// Vote events, relative to `dir`.
    #[serde(default = "default_votelog_file")]
    pub votelog_file: String,

    /// People, relative to `dir`.
    #[serde(default = "default_people_file")]
    pub people_file: String,

    /// Per-person vote choices, relative to `dir`.
    #[serde(default = "default_people_vote_file")]
    pub people_vote_file: String,
}

impl DataConfig {
    #[must_use]
    pub fn votelog_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.votelog_file)
    }

    #[must_use]
    pub fn people_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.people_file)
    }

    #[must_use]
    pub fn people_vote_path(&self) -> PathBuf {
        PathBuf::from(&self.dir).join(&self.people_vote_file)
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            votelog_file: default_votelog_file(),
            people_file: default_people_file(),
            people_vote_file: default_people_vote_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP server bind address.
    #[serde(default = "default_host")]
    pub host: String,
}

impl ServerConfig {
    /// Resolve `host` and `port` into a bindable address.
    ///
    /// # Errors
    /// Returns an error if `host` is not an IP address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log filter directive (e.g. `info`, `votelog_api=debug,info`).
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests.
    /// Use `"*"` to allow any origin.
    /// Accepts either an array or comma-separated string.
    /// Example: `["http://localhost:8000"]` or `"http://localhost:8000,https://votelog.example.org"`
    #[serde(
        default = "default_allowed_origins",
        deserialize_with = "deserialize_origins"
    )]
    pub allowed_origins: Vec<String>,
}

/// Deserialize origins from comma-separated string or array, filtering empty values.
fn deserialize_origins<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let origins: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(origins.into_iter().filter(|s| !s.is_empty()).collect())
}

/// Presentation settings that end up in the page models.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Label for a linked document that has no title.
    #[serde(default = "default_document_fallback_title")]
    pub document_fallback_title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document_fallback_title: default_document_fallback_title(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SwaggerConfig {
    /// Serve Swagger UI at /swagger-ui.
    /// Enable in development via `VL_SWAGGER__ENABLED=true`
    #[serde(default)]
    pub enabled: bool,
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_port() -> u16 {
    8080
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_votelog_file() -> String {
    "votelog.yaml".to_string()
}

fn default_people_file() -> String {
    "people.yaml".to_string()
}

fn default_people_vote_file() -> String {
    "people_vote.yaml".to_string()
}

fn default_document_fallback_title() -> String {
    "เอกสาร".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_allowed_origins() -> Vec<String> {
    vec![]
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            server: ServerConfig {
                port: default_port(),
                host: default_host(),
            },
            logging: LoggingConfig {
                level: default_log_level(),
            },
            cors: CorsConfig::default(),
            site: SiteConfig::default(),
            swagger: SwaggerConfig::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. config.yaml file (if exists)
    /// 3. Environment variables with VL_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(yaml_path).extract()?;

        config.validate()?;
        Ok(config)
    }

    /// The layered provider stack, exposed for inspection in tests.
    #[must_use]
    pub fn figment(yaml_path: &str) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("VL_").split("__"))
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "data.dir cannot be empty. Set VL_DATA__DIR or configure in config.yaml.".into(),
            ));
        }

        for (key, file) in [
            ("data.votelog_file", &self.data.votelog_file),
            ("data.people_file", &self.data.people_file),
            ("data.people_vote_file", &self.data.people_vote_file),
        ] {
            if file.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} cannot be empty")));
            }
        }

        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port cannot be 0".into()));
        }

        if let Err(e) = self.server.socket_addr() {
            return Err(ConfigError::Validation(format!(
                "server.host '{}' is not a valid IP address: {e}",
                self.server.host
            )));
        }

        // CORS origins must be valid URLs or "*"
        for origin in &self.cors.allowed_origins {
            if origin != "*" && !origin.starts_with("http://") && !origin.starts_with("https://") {
                return Err(ConfigError::Validation(format!(
                    "cors.allowed_origins contains invalid origin '{origin}'. Must be '*' or start with http:// or https://"
                )));
            }
        }

        if self.site.document_fallback_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.document_fallback_title cannot be empty".into(),
            ));
        }

        Ok(())
    }
}
