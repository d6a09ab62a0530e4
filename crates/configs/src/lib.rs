//! # configs
//!
//! Layered settings for the blog board.
//!
//! # Loading Order
//! 1. Built-in defaults (`config/defaults.toml`, compiled in)
//! 2. Optional file named by `BLOG_CONFIG` (any format `config` understands)
//! 3. Environment variables, after `.env` is loaded: `BLOG__SECTION__KEY`,
//!    e.g. `BLOG__SERVER__PORT=8080` or `BLOG__MAIL__SMTP__HOST=smtp.example.com`

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;

const DEFAULTS: &str = include_str!("../config/defaults.toml");

/// Environment variable prefix; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "BLOG";

#[derive(Error, Debug)]
pub enum ConfigsError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub site: SiteSettings,
    pub mail: MailSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSettings {
    /// Origin used when building verification links.
    pub public_base_url: String,
    pub static_dir: PathBuf,
    pub views_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub upload_url_prefix: String,
    /// Request body cap for `/api/submit`, image included.
    pub max_upload_bytes: usize,
    /// Generated posts to load at startup; 0 disables seeding.
    pub sample_posts: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MailTransport {
    /// Log messages instead of sending them.
    Log,
    /// Deliver over SMTP. Requires the `mail-smtp` feature.
    Smtp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    pub transport: MailTransport,
    pub from: String,
    pub timeout_secs: u64,
    #[serde(default)]
    pub smtp: Option<SmtpSettings>,
}

impl MailSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<SecretString>,
}

fn default_smtp_port() -> u16 {
    587
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    pub format: LogFormat,
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` wins when set.
    pub filter: String,
}

impl Settings {
    /// Loads `.env`, the optional `BLOG_CONFIG` file and `BLOG__*` variables.
    pub fn load() -> Result<Self, ConfigsError> {
        dotenvy::dotenv().ok();
        let file = std::env::var_os("BLOG_CONFIG").map(PathBuf::from);
        Self::from_sources(file.as_deref(), Self::environment())
    }

    /// The environment source used by [`Settings::load`].
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    /// Builds settings from the compiled defaults, an optional file and the
    /// given environment source.
    pub fn from_sources(file: Option<&Path>, env: Environment) -> Result<Self, ConfigsError> {
        let mut builder = Config::builder().add_source(File::from_str(DEFAULTS, FileFormat::Toml));
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        tracing::debug!(?settings, "configuration loaded");
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigsError> {
        if self.mail.timeout_secs == 0 {
            return Err(ConfigsError::Invalid("mail.timeout_secs must be positive".into()));
        }
        let prefix = &self.site.upload_url_prefix;
        if !prefix.starts_with('/') || prefix.len() < 2 {
            return Err(ConfigsError::Invalid(
                "site.upload_url_prefix must start with '/' and name a path".into(),
            ));
        }
        if self.mail.transport == MailTransport::Smtp {
            if !cfg!(feature = "mail-smtp") {
                return Err(ConfigsError::Invalid(
                    "mail.transport = \"smtp\" needs the mail-smtp feature".into(),
                ));
            }
            if self.mail.smtp.is_none() {
                return Err(ConfigsError::Invalid(
                    "mail.transport = \"smtp\" needs a [mail.smtp] section".into(),
                ));
            }
        }
        Ok(())
    }
}
