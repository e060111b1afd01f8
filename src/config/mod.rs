pub mod database;

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// PostgreSQL connection string. Without one the service keeps its data in memory.
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
    #[serde(default = "default_mail_server")]
    pub mail_server: String,
    #[serde(default = "default_mail_port")]
    pub mail_port: u16,
    #[serde(default = "default_true")]
    pub mail_use_tls: bool,
    #[serde(default)]
    pub mail_username: Option<String>,
    #[serde(default)]
    pub mail_password: Option<String>,
    /// Sender address; falls back to the SMTP username.
    #[serde(default)]
    pub mail_from: Option<String>,
    #[serde(default)]
    pub weather_api_key: Option<String>,
    /// `pretty` or `json`.
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_db_max_connections() -> u32 {
    10
}

fn default_port() -> u16 {
    8080
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_max_upload_size() -> usize {
    25 * 1024 * 1024
}

fn default_mail_server() -> String {
    "smtp.gmail.com".to_string()
}

fn default_mail_port() -> u16 {
    587
}

fn default_true() -> bool {
    true
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            db_max_connections: default_db_max_connections(),
            port: default_port(),
            upload_dir: default_upload_dir(),
            static_dir: default_static_dir(),
            max_upload_size: default_max_upload_size(),
            mail_server: default_mail_server(),
            mail_port: default_mail_port(),
            mail_use_tls: true,
            mail_username: None,
            mail_password: None,
            mail_from: None,
            weather_api_key: None,
            log_format: default_log_format(),
        }
    }
}

impl Config {
    /// Reads configuration from the process environment, e.g. `PORT`,
    /// `DATABASE_URL`, `MAIL_SERVER`. Malformed values are reported as errors.
    pub fn from_env() -> anyhow::Result<Self> {
        let config: Config = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if !matches!(self.log_format.as_str(), "pretty" | "json") {
            anyhow::bail!("LOG_FORMAT must be 'pretty' or 'json', got '{}'", self.log_format);
        }
        if self.max_upload_size == 0 {
            anyhow::bail!("MAX_UPLOAD_SIZE must be positive");
        }
        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be positive");
        }
        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }

    /// SMTP credentials, when both halves are configured.
    pub fn mail_credentials(&self) -> Option<(&str, &str)> {
        match (self.mail_username.as_deref(), self.mail_password.as_deref()) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => Some((user, pass)),
            _ => None,
        }
    }
}
