//! Endpoint and credential configuration.

use std::time::Duration;

/// Authentication material for a LogLake endpoint.
///
/// The credential is consumed as an opaque bundle; the transport turns it
/// into request headers and nothing else inspects it.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Long-lived access key pair.
    AccessKey {
        access_key_id: String,
        access_key_secret: String,
    },
    /// STS-issued temporary key pair plus security token.
    Sts {
        access_key_id: String,
        access_key_secret: String,
        security_token: String,
    },
    /// Opaque bearer token.
    Bearer(String),
}

/// Connection configuration for a LogLake endpoint.
///
/// The endpoint may be given with or without a scheme; schemeless endpoints
/// default to `https`.
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) endpoint: String,
    pub(crate) credential: Credential,
    pub(crate) timeout: Duration,
}

impl Config {
    pub fn new(endpoint: impl Into<String>, credential: Credential) -> Self {
        Self {
            endpoint: endpoint.into(),
            credential,
            timeout: Duration::from_secs(30),
        }
    }

    /// Configuration using a long-lived access key pair.
    pub fn access_key(
        endpoint: impl Into<String>,
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
    ) -> Self {
        Self::new(
            endpoint,
            Credential::AccessKey {
                access_key_id: access_key_id.into(),
                access_key_secret: access_key_secret.into(),
            },
        )
    }

    /// Configuration using STS temporary credentials.
    pub fn sts(
        endpoint: impl Into<String>,
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
        security_token: impl Into<String>,
    ) -> Self {
        Self::new(
            endpoint,
            Credential::Sts {
                access_key_id: access_key_id.into(),
                access_key_secret: access_key_secret.into(),
                security_token: security_token.into(),
            },
        )
    }

    /// Configuration using a bearer token.
    pub fn bearer(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(endpoint, Credential::Bearer(token.into()))
    }

    /// Override the per-request timeout (default 30 seconds).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
