//! # bg-config
//!
//! Layered settings for both services: built-in defaults, then an optional
//! `config/brandguard.{toml,yaml,json}` file, then `BRANDGUARD__*` environment
//! variables (e.g. `BRANDGUARD__SENTIMENT__TABLE_NAME`). A `.env` file is
//! loaded into the environment first when present.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "BRANDGUARD";
pub const DEFAULT_CONFIG_FILE: &str = "config/brandguard";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub sentiment: SentimentSettings,
    pub ingestion: IngestionSettings,
    pub log: LogSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Deserialize)]
pub struct SentimentSettings {
    pub bind: String,
    /// Default destination table for analysis records
    pub table_name: String,
    pub store: StoreBackend,
    pub persist_timeout_ms: u64,
    #[serde(default)]
    pub aws: AwsSettings,
}

impl SentimentSettings {
    pub fn persist_timeout(&self) -> Duration {
        Duration::from_millis(self.persist_timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Dynamodb,
    Memory,
    /// No durable store; every record degrades with "no credentials"
    None,
}

/// Optional overrides for the AWS SDK environment chain.
#[derive(Debug, Default, Deserialize)]
pub struct AwsSettings {
    pub region: Option<String>,
    pub endpoint_url: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<SecretString>,
}

#[derive(Debug, Deserialize)]
pub struct IngestionSettings {
    pub bind: String,
    /// Full URL of the analysis endpoint
    pub analysis_url: String,
    pub forward_timeout_ms: u64,
}

impl IngestionSettings {
    pub fn forward_timeout(&self) -> Duration {
        Duration::from_millis(self.forward_timeout_ms)
    }
}

#[derive(Debug, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive; `RUST_LOG` wins when set
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize)]
pub struct HttpSettings {
    /// `*` allows any origin
    pub cors_allowed_origins: Vec<String>,
}

impl Settings {
    /// Loads the default config file and the process environment.
    /// Call [`load_dotenv`] first so `.env` entries are visible.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(Some(DEFAULT_CONFIG_FILE), environment())
    }

    /// Builds settings from an optional file stem and an environment source.
    pub fn from_sources(file: Option<&str>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("sentiment.bind", "0.0.0.0:8001")?
            .set_default("sentiment.table_name", "brandguard-reviews")?
            .set_default("sentiment.store", "dynamodb")?
            .set_default("sentiment.persist_timeout_ms", 5_000)?
            .set_default("ingestion.bind", "0.0.0.0:8000")?
            .set_default("ingestion.analysis_url", "http://sentiment_service:8001/analyze")?
            .set_default("ingestion.forward_timeout_ms", 10_000)?
            .set_default("log.filter", "info")?
            .set_default("log.format", "pretty")?
            .set_default("http.cors_allowed_origins", vec!["*"])?;

        if let Some(file) = file {
            builder = builder.add_source(File::with_name(file).required(false));
        }

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, bind) in [
            ("sentiment.bind", &self.sentiment.bind),
            ("ingestion.bind", &self.ingestion.bind),
        ] {
            bind.parse::<SocketAddr>()
                .map_err(|e| ConfigError::Invalid(format!("{name} `{bind}`: {e}")))?;
        }
        if self.sentiment.table_name.trim().is_empty() {
            return Err(ConfigError::Invalid("sentiment.table_name is empty".into()));
        }
        if self.sentiment.persist_timeout_ms == 0 {
            return Err(ConfigError::Invalid("sentiment.persist_timeout_ms must be > 0".into()));
        }
        if self.ingestion.forward_timeout_ms == 0 {
            return Err(ConfigError::Invalid("ingestion.forward_timeout_ms must be > 0".into()));
        }
        if !self.ingestion.analysis_url.starts_with("http://")
            && !self.ingestion.analysis_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid(format!(
                "ingestion.analysis_url `{}` is not an http(s) URL",
                self.ingestion.analysis_url
            )));
        }
        let aws = &self.sentiment.aws;
        if aws.access_key_id.is_some() != aws.secret_access_key.is_some() {
            return Err(ConfigError::Invalid(
                "sentiment.aws.access_key_id and secret_access_key must be set together".into(),
            ));
        }
        Ok(())
    }
}

/// Merges a `.env` file into the process environment, if one is found.
/// Returns its path so the caller can log it once tracing is up.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// `BRANDGUARD__SECTION__KEY` variables from the process environment.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("http.cors_allowed_origins")
}
