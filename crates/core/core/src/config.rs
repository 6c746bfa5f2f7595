//! SDK configuration.
//!
//! Settings can be built in code, loaded from a TOML file with
//! [`load_config`] or read from `ECOM_*` environment variables with
//! [`EcomSettings::from_env`].

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    FISCAL_API_URI, HOST_PROD, HOST_TEST, PAYMENTS_API_URI, PAYMENT_API_URI, PAYMENT_FORM_URI,
    SETTINGS_API_URI,
};

/// API environment selecting one of the two fixed hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[serde(alias = "prod")]
    Production,
    Test,
}

impl Environment {
    /// Returns the API host of this environment.
    pub fn host(&self) -> &'static str {
        match self {
            Environment::Production => HOST_PROD,
            Environment::Test => HOST_TEST,
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(ConfigError::Invalid {
                key: "environment".to_string(),
                reason: format!("unknown environment '{}'", other),
            }),
        }
    }
}

/// Base paths of the API sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiPaths {
    /// Order lookup and deletion.
    pub payment: String,
    /// Transactions and refunds.
    pub payments: String,
    /// Fiscal receipts.
    pub fiscal: String,
    /// Merchant settings.
    pub settings: String,
    /// Hosted payment form.
    pub pay_form: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            payment: PAYMENT_API_URI.to_string(),
            payments: PAYMENTS_API_URI.to_string(),
            fiscal: FISCAL_API_URI.to_string(),
            settings: SETTINGS_API_URI.to_string(),
            pay_form: PAYMENT_FORM_URI.to_string(),
        }
    }
}

/// Options handed to the HTTP transport when it is built.
///
/// The SDK itself enforces no timeouts; they only take effect through the
/// transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportOptions {
    /// Whole-request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
    /// Overrides the default client fingerprint.
    pub user_agent: Option<String>,
}

impl TransportOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(duration_millis(timeout));
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(duration_millis(timeout));
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Returns the request timeout.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Returns the connect timeout.
    pub fn connect_timeout_duration(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    /// Returns the user agent to send, falling back to the client fingerprint.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(crate::constants::user_agent)
    }
}

/// Credentials and endpoint of a merchant account.
#[derive(Deserialize)]
pub struct ClientSettings {
    /// Merchant secret key.
    #[serde(deserialize_with = "deserialize_secret")]
    pub secret_key: SecretString,
    /// Merchant public identifier.
    pub public_id: String,
    /// Explicit API host; takes precedence over `environment`.
    #[serde(default)]
    pub host: Option<String>,
    /// Environment used when no host is given.
    #[serde(default)]
    pub environment: Environment,
}

impl ClientSettings {
    /// Returns the API host these settings point to.
    pub fn resolved_host(&self) -> String {
        self.host
            .clone()
            .unwrap_or_else(|| self.environment.host().to_string())
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("secret_key", &"[REDACTED]")
            .field("public_id", &self.public_id)
            .field("host", &self.host)
            .field("environment", &self.environment)
            .finish()
    }
}

/// Complete SDK settings.
#[derive(Debug, Deserialize)]
pub struct EcomSettings {
    /// Merchant account.
    pub client: ClientSettings,
    /// HTTP transport options.
    #[serde(default)]
    pub transport: TransportOptions,
    /// API base paths.
    #[serde(default)]
    pub paths: ApiPaths,
}

/// Environment variable holding the secret key.
pub const ENV_SECRET_KEY: &str = "ECOM_SECRET_KEY";
/// Environment variable holding the public id.
pub const ENV_PUBLIC_ID: &str = "ECOM_PUBLIC_ID";
/// Environment variable holding an explicit host.
pub const ENV_HOST: &str = "ECOM_HOST";
/// Environment variable selecting `production` or `test`.
pub const ENV_ENVIRONMENT: &str = "ECOM_ENVIRONMENT";
/// Environment variable holding the request timeout in milliseconds.
pub const ENV_TIMEOUT_MS: &str = "ECOM_TIMEOUT_MS";
/// Environment variable holding the connect timeout in milliseconds.
pub const ENV_CONNECT_TIMEOUT_MS: &str = "ECOM_CONNECT_TIMEOUT_MS";
/// Environment variable overriding the user agent.
pub const ENV_USER_AGENT: &str = "ECOM_USER_AGENT";

impl EcomSettings {
    /// Creates settings for the production environment.
    pub fn new(secret_key: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            client: ClientSettings {
                secret_key: SecretString::from(secret_key.into()),
                public_id: public_id.into(),
                host: None,
                environment: Environment::Production,
            },
            transport: TransportOptions::default(),
            paths: ApiPaths::default(),
        }
    }

    /// Reads settings from `ECOM_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| ConfigError::Missing {
                    key: key.to_string(),
                })
        };
        let millis = |key: &str| -> Result<Option<u64>, ConfigError> {
            lookup(key)
                .map(|v| {
                    v.parse::<u64>().map_err(|e| ConfigError::Invalid {
                        key: key.to_string(),
                        reason: e.to_string(),
                    })
                })
                .transpose()
        };

        let environment = match lookup(ENV_ENVIRONMENT) {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let settings = Self {
            client: ClientSettings {
                secret_key: SecretString::from(required(ENV_SECRET_KEY)?),
                public_id: required(ENV_PUBLIC_ID)?,
                host: lookup(ENV_HOST).filter(|v| !v.is_empty()),
                environment,
            },
            transport: TransportOptions {
                timeout_ms: millis(ENV_TIMEOUT_MS)?,
                connect_timeout_ms: millis(ENV_CONNECT_TIMEOUT_MS)?,
                user_agent: lookup(ENV_USER_AGENT),
            },
            paths: ApiPaths::default(),
        };

        tracing::debug!(
            public_id = %settings.client.public_id,
            host = %settings.client.resolved_host(),
            "Loaded ecom settings from environment"
        );

        Ok(settings)
    }

    /// Parses settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Loads settings from a TOML file.
///
/// ```toml
/// [client]
/// secret_key = "..."
/// public_id = "..."
/// environment = "test"
///
/// [transport]
/// timeout_ms = 30000
/// ```
pub fn load_config(path: &str) -> Result<EcomSettings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    EcomSettings::from_toml_str(&content)
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Missing configuration: {key}")]
    Missing { key: String },
    #[error("Invalid value for '{key}': {reason}")]
    Invalid { key: String, reason: String },
}
