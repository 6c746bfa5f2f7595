//! Client configuration.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use ecom_sdk_core::{ApiPaths, EcomSettings, Environment, TransportOptions};

/// Configuration of one [`EcomClient`](crate::EcomClient).
///
/// The secret key is write-only: it can be set at construction or through
/// [`set_secret_key`](Self::set_secret_key) but there is no way to read it
/// back outside this crate. `Debug` output redacts it.
pub struct ClientConfig {
    secret_key: SecretString,
    public_id: String,
    host: String,
    paths: ApiPaths,
    transport: TransportOptions,
}

impl ClientConfig {
    /// Creates a configuration for the production host.
    pub fn new(secret_key: impl Into<String>, public_id: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::from(secret_key.into()),
            public_id: public_id.into(),
            host: Environment::Production.host().to_string(),
            paths: ApiPaths::default(),
            transport: TransportOptions::default(),
        }
    }

    /// Creates a configuration from loaded settings.
    pub fn from_settings(settings: EcomSettings) -> Self {
        let host = settings.client.resolved_host();
        Self {
            secret_key: settings.client.secret_key,
            public_id: settings.client.public_id,
            host,
            paths: settings.paths,
            transport: settings.transport,
        }
    }

    /// Sets the API host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Sets the API host from an environment.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.host = environment.host().to_string();
        self
    }

    /// Sets the API base paths.
    pub fn with_paths(mut self, paths: ApiPaths) -> Self {
        self.paths = paths;
        self
    }

    /// Sets the transport options.
    pub fn with_transport_options(mut self, options: TransportOptions) -> Self {
        self.transport = options;
        self
    }

    /// Returns the merchant public id.
    pub fn public_id(&self) -> &str {
        &self.public_id
    }

    /// Returns the API host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the API base paths.
    pub fn paths(&self) -> &ApiPaths {
        &self.paths
    }

    /// Returns the transport options.
    pub fn transport_options(&self) -> &TransportOptions {
        &self.transport
    }

    /// Whether a non-empty secret key is set.
    pub fn has_secret_key(&self) -> bool {
        !self.secret_key.expose_secret().is_empty()
    }

    /// Replaces the secret key.
    pub fn set_secret_key(&mut self, secret_key: impl Into<String>) {
        self.secret_key = SecretString::from(secret_key.into());
    }

    /// Replaces the public id.
    pub fn set_public_id(&mut self, public_id: impl Into<String>) {
        self.public_id = public_id.into();
    }

    /// Replaces the API host.
    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub(crate) fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("secret_key", &"[REDACTED]")
            .field("public_id", &self.public_id)
            .field("host", &self.host)
            .field("paths", &self.paths)
            .field("transport", &self.transport)
            .finish()
    }
}
