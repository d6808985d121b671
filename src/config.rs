use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::path::Path;

/// Secret shipped in the defaults; startup warns when it is still in use.
pub const DEFAULT_JWT_SECRET: &str = "change-me";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub auth: AuthSettings,
    pub signup: SignupSettings,
    pub matching: MatchingSettings,
    pub realtime: RealtimeSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    #[serde(default = "default_json_limit")]
    pub json_limit_bytes: usize,
}

fn default_json_limit() -> usize { 2 * 1024 * 1024 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub key_id: Option<String>,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Issue tokens for caller-supplied identities without checking credentials.
    #[serde(default = "default_true")]
    pub demo_login: bool,
}

fn default_issuer() -> String { "innerconnect-api".to_string() }
fn default_token_ttl() -> u64 { 15 * 60 }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct SignupSettings {
    pub company_domain: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    #[serde(default)]
    pub weights: WeightsConfig,
}

fn default_threshold() -> u8 { 55 }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_interests_weight")]
    pub interests: f64,
    #[serde(default = "default_same_department_weight")]
    pub same_department: f64,
    #[serde(default = "default_cross_department_weight")]
    pub cross_department: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            interests: default_interests_weight(),
            same_department: default_same_department_weight(),
            cross_department: default_cross_department_weight(),
        }
    }
}

fn default_interests_weight() -> f64 { 85.0 }
fn default_same_department_weight() -> f64 { 15.0 }
fn default_cross_department_weight() -> f64 { 5.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct RealtimeSettings {
    #[serde(default = "default_heartbeat_interval")]
    pub heartbeat_interval_secs: u64,
    #[serde(default = "default_client_timeout")]
    pub client_timeout_secs: u64,
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,
    #[serde(default = "default_outbound_queue_capacity")]
    pub outbound_queue_capacity: usize,
}

impl Default for RealtimeSettings {
    fn default() -> Self {
        Self {
            heartbeat_interval_secs: default_heartbeat_interval(),
            client_timeout_secs: default_client_timeout(),
            send_timeout_secs: default_send_timeout(),
            outbound_queue_capacity: default_outbound_queue_capacity(),
        }
    }
}

fn default_heartbeat_interval() -> u64 { 30 }
fn default_client_timeout() -> u64 { 90 }
fn default_send_timeout() -> u64 { 10 }
fn default_outbound_queue_capacity() -> usize { 256 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from defaults, config files and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Built-in defaults
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INNERCONNECT)
    /// 5. Legacy variables (PORT, JWT_ACCESS_SECRET, COMPANY_EMAIL_DOMAIN)
    pub fn load() -> Result<Self, ConfigError> {
        let builder = with_defaults(Config::builder())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INNERCONNECT__AUTH__JWT_SECRET -> auth.jwt_secret
            .add_source(
                Environment::with_prefix("INNERCONNECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        with_legacy_env(builder)?.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        with_defaults(Config::builder())?
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("INNERCONNECT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 4000)?
        .set_default("auth.jwt_secret", DEFAULT_JWT_SECRET)?
        .set_default("signup.company_domain", "company.com")?
        .set_default("matching.threshold", 55)?
        .set_default("realtime.heartbeat_interval_secs", 30)?
        .set_default("realtime.client_timeout_secs", 90)?
        .set_default("realtime.send_timeout_secs", 10)?
        .set_default("realtime.outbound_queue_capacity", 256)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "json")
}

/// Apply the un-prefixed variables the service has always honoured
fn with_legacy_env(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    use std::env;

    if let Ok(port) = env::var("PORT") {
        builder = builder.set_override("server.port", port)?;
    }
    if let Ok(secret) = env::var("JWT_ACCESS_SECRET") {
        builder = builder.set_override("auth.jwt_secret", secret)?;
    }
    if let Ok(domain) = env::var("COMPANY_EMAIL_DOMAIN") {
        builder = builder.set_override("signup.company_domain", domain)?;
    }

    Ok(builder)
}
