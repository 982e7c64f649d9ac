use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tally::{Brand, LineItem, Theme, default_catalog};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub concurrency: ConcurrencyConfig,
    pub mail: MailConfig,
    pub brand: Brand,
    pub theme: Theme,
    /// Line items printed on every quotation.
    pub catalog: Vec<LineItem>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            concurrency: ConcurrencyConfig::default(),
            mail: MailConfig::default(),
            brand: Brand::default(),
            theme: Theme::default(),
            catalog: default_catalog(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3001,
            cors_origins: [
                "http://localhost:8080",
                "http://localhost:5173",
                "http://127.0.0.1:8080",
                "http://127.0.0.1:5173",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub output_dir: PathBuf,
    pub max_age_secs: u64,
    pub sweep_interval_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(tally::storage::DEFAULT_DIR),
            max_age_secs: tally::storage::DEFAULT_MAX_AGE.as_secs(),
            sweep_interval_secs: 60 * 60,
        }
    }
}

impl StorageConfig {
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_secs)
    }

    /// Never zero; `tokio::time::interval` panics on a zero period.
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConcurrencyConfig {
    /// Renders allowed to run at once; further requests wait for a slot.
    pub max_concurrent_renders: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_renders: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MailConfig {
    pub from_email: String,
    /// Without a key, outgoing mail is only logged.
    pub sendgrid_api_key: Option<String>,
    pub sendgrid_endpoint: String,
    /// Booking page advertised in the partner promotion.
    pub partner_url: String,
    pub request_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from_email: "no-reply@mollymaid.com".into(),
            sendgrid_api_key: None,
            sendgrid_endpoint: "https://api.sendgrid.com/v3/mail/send".into(),
            partner_url: "http://localhost:8081".into(),
            request_timeout_secs: 30,
        }
    }
}

impl ServiceConfig {
    /// Layers, lowest precedence first: built-in defaults, the first
    /// `default.toml` found, the file named by `TALLY_SERVICE_CONFIG`,
    /// `TALLY_SERVICE__*` variables, then the conventional SendGrid
    /// variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let candidates = ["config/default", "service/config/default"];

        let mut builder = config::Config::builder();
        if let Some(path) = candidates
            .iter()
            .find(|path| Path::new(&format!("{path}.toml")).exists())
        {
            builder = builder.add_source(config::File::with_name(path));
        }
        if let Ok(path) = std::env::var("TALLY_SERVICE_CONFIG")
            && !path.is_empty()
        {
            builder = builder.add_source(config::File::with_name(&path));
        }
        builder =
            builder.add_source(config::Environment::with_prefix("TALLY_SERVICE").separator("__"));

        let mut config: ServiceConfig = builder.build()?.try_deserialize()?;
        config.apply_mail_overrides(
            std::env::var("SENDGRID_API_KEY").ok(),
            std::env::var("SENDGRID_FROM_EMAIL").ok(),
        );
        Ok(config)
    }

    fn apply_mail_overrides(&mut self, api_key: Option<String>, from_email: Option<String>) {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.mail.sendgrid_api_key = Some(key);
        }
        if let Some(from) = from_email.filter(|f| !f.trim().is_empty()) {
            self.mail.from_email = from;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(source: &str) -> ServiceConfig {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_source_yields_defaults() {
        let config = from_toml("");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.cors_origins.len(), 4);
        assert_eq!(config.concurrency.max_concurrent_renders, 8);
        assert_eq!(config.storage.max_age(), Duration::from_secs(3600));
        assert_eq!(config.catalog.len(), 3);
        assert!(config.mail.sendgrid_api_key.is_none());
    }

    #[test]
    fn nested_sections_override_defaults() {
        let config = from_toml(
            r#"
            [server]
            port = 8088

            [storage]
            sweep_interval_secs = 0

            [brand]
            online_base_url = "https://quotes.example.com"

            [[catalog]]
            name = "Windows"
            details = "Inside and out"
            price = 45.5
            "#,
        );
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.storage.sweep_interval(), Duration::from_secs(1));
        assert_eq!(config.brand.online_base_url, "https://quotes.example.com");
        assert_eq!(config.brand.name, "Molly Maid");
        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.catalog[0].price.to_string(), "$45.50");
    }

    #[test]
    fn blank_sendgrid_variables_are_ignored() {
        let mut config = ServiceConfig::default();
        config.apply_mail_overrides(Some("  ".into()), Some("sales@example.com".into()));
        assert!(config.mail.sendgrid_api_key.is_none());
        assert_eq!(config.mail.from_email, "sales@example.com");

        config.apply_mail_overrides(Some("SG.key".into()), None);
        assert_eq!(config.mail.sendgrid_api_key.as_deref(), Some("SG.key"));
        assert_eq!(config.mail.from_email, "sales@example.com");
    }
}
