use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{
    net::{IpAddr, Ipv4Addr},
    sync::LazyLock,
};

/// Application configuration managed by Figment.
///
/// Field names map to env vars in UPPER_SNAKE_CASE (`Env::raw()`); a
/// `.env` file is honored when `main` loads it via dotenvy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// HTTP server listen address (e.g., "0.0.0.0", "127.0.0.1").
    /// Env: `LISTEN_ADDR`. Default: `0.0.0.0`.
    #[serde(default = "default_listen_ip")]
    pub listen_addr: IpAddr,

    /// HTTP server listen port.
    /// Env: `PORT`. Default: `8080`.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database URL for SQLite.
    /// Env: `DATABASE_URL`. Default: `sqlite://portfolio.db`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Log level for tracing subscriber initialization (e.g., "error",
    /// "warn", "info", "debug", "trace").
    /// Env: `LOGLEVEL`. Default: `info`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Shared secret gating mutation endpoints. May be left empty, in
    /// which case every protected request fails closed with a
    /// server-configuration error.
    /// Env: `API_KEY`. Default: empty.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub api_key: String,

    /// MailerSend API token. Empty disables outbound email entirely.
    /// Env: `MAILERSEND_API_KEY`. Default: empty.
    #[serde(default)]
    #[serde(deserialize_with = "deserialize_string_lax")]
    pub mailersend_api_key: String,

    /// Sender display name for outbound email.
    /// Env: `MAILERSEND_FROM_NAME`. Default: `Portfolio Contact`.
    #[serde(default = "default_from_name")]
    pub mailersend_from_name: String,

    /// Verified sender address for outbound email.
    /// Env: `MAILERSEND_FROM_EMAIL`. Default: empty.
    #[serde(default)]
    pub mailersend_from_email: String,

    /// Recipient of admin notifications and test emails.
    /// Env: `MAILERSEND_TO_EMAIL`. Default: empty.
    #[serde(default)]
    pub mailersend_to_email: String,

    /// Whether contact submitters receive an automatic thank-you email.
    /// Env: `MAILERSEND_SEND_THANKYOU`. Default: `true`.
    #[serde(default = "default_true")]
    pub mailersend_send_thankyou: bool,

    /// CORS allow-list: `*` or a comma-separated list of origins.
    /// Env: `ALLOWED_ORIGINS`. Default: `*`.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_ip(),
            port: default_port(),
            database_url: default_database_url(),
            loglevel: default_loglevel(),
            api_key: String::new(),
            mailersend_api_key: String::new(),
            mailersend_from_name: default_from_name(),
            mailersend_from_email: String::new(),
            mailersend_to_email: String::new(),
            mailersend_send_thankyou: true,
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Config {
    /// Builds a Figment that merges defaults and environment variables.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Env::raw())
    }

    /// Loads configuration from the environment with defaults. An empty
    /// `API_KEY` is allowed here; the auth guard fails closed per
    /// request instead of refusing to boot.
    pub fn from_env() -> Self {
        Self::figment()
            .extract()
            .unwrap_or_else(|err| panic!("failed to extract configuration via Figment: {err}"))
    }

    /// `None` means "allow any origin"; otherwise the parsed allow-list.
    pub fn origin_list(&self) -> Option<Vec<String>> {
        let raw = self.allowed_origins.trim();
        if raw.is_empty() || raw == "*" {
            return None;
        }
        Some(
            raw.split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

fn deserialize_string_lax<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;

    match v {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(serde::de::Error::custom(
            "expected a string or a number for this key",
        )),
    }
}

/// Global, lazily-initialized configuration instance.
pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::from_env);

/// Default IP address for the HTTP server listen address.
fn default_listen_ip() -> IpAddr {
    Ipv4Addr::new(0, 0, 0, 0).into()
}

/// Default port for the HTTP server.
fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "sqlite://portfolio.db".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_from_name() -> String {
    "Portfolio Contact".to_string()
}

fn default_allowed_origins() -> String {
    "*".to_string()
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn origin_list_parses_wildcard_and_csv() {
        let mut cfg = Config::default();
        assert_eq!(cfg.origin_list(), None);

        cfg.allowed_origins = "https://a.example, https://b.example,".to_string();
        assert_eq!(
            cfg.origin_list(),
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }
}
