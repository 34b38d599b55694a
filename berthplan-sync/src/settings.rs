use std::time::Duration;

use berthplan_core::TerminalGeometry;
use chrono::NaiveDate;
use config::{Config, ConfigError, File};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::oauth::OauthConfig;

static DEFAULT_TERMINAL: &str = "MAPTMTM";
static DEFAULT_ARCHIVE_DIRECTORY: &str = "SOAP_Archive";
static QUIET_DEPENDENCIES: &str = "hyper=warn,hyper_util=warn,reqwest=warn,tiberius=warn";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub log_level: LogLevel,
    pub environment: Environment,
    #[serde(default)]
    pub terminal: TerminalSettings,
    pub berth_plan: BerthPlanApiSettings,
    pub berth_plan_delivery: SoapEndpointSettings,
    pub etc_delivery: SoapEndpointSettings,
    pub etc_database: Option<EtcDatabaseSettings>,
    #[serde(default)]
    pub archive: ArchiveSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Environment {
    Local,
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    pub code: String,
    pub geometry: TerminalGeometry,
    pub days_back: u32,
    pub days_ahead: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BerthPlanApiSettings {
    pub url: String,
    pub consumer_key: String,
    pub oauth: OauthConfig,
    pub token_expiry_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SoapEndpointSettings {
    pub url: String,
    pub username: String,
    pub password: String,
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EtcDatabaseSettings {
    pub host: String,
    #[serde(default = "default_sql_server_port")]
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
    #[serde(default = "default_true")]
    pub trust_cert: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveSettings {
    pub directory: String,
    #[serde(with = "humantime_serde")]
    pub retention: Duration,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .map_err(|e| ConfigError::Message(format!("failed to read APP_ENVIRONMENT: {e}")))?
            .try_into()?;

        Config::builder()
            .add_source(
                File::with_name(&format!("config/{}", environment.as_str().to_lowercase()))
                    .required(true),
            )
            .add_source(config::Environment::with_prefix("BERTHPLAN_SYNC").separator("__"))
            .set_override("environment", environment.as_str())?
            .build()?
            .try_deserialize()
    }

    /// Installs the global `fmt` subscriber.
    ///
    /// `RUST_LOG` takes precedence over the configured level when set.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{},{QUIET_DEPENDENCIES}",
                self.log_level.as_directive()
            ))
        });

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "Local",
            Environment::Development => "Development",
            Environment::Production => "Production",
            Environment::Test => "Test",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "development" => Ok(Environment::Development),
            "production" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(ConfigError::Message(format!(
                "{other} is not a supported environment"
            ))),
        }
    }
}

impl LogLevel {
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            code: DEFAULT_TERMINAL.into(),
            geometry: TerminalGeometry::default(),
            days_back: 8,
            days_ahead: 40,
        }
    }
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            directory: DEFAULT_ARCHIVE_DIRECTORY.into(),
            retention: Duration::from_secs(30 * 24 * 60 * 60),
        }
    }
}

impl EtcDatabaseSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_sql_server_port() -> u16 {
    1433
}
