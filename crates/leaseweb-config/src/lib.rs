//! Provider configuration for the Leaseweb provider.
//!
//! Settings come from two places: `LEASEWEB_*` environment variables and the
//! explicit provider block handed over by the orchestration runtime. The
//! block wins field by field. The result is a `leaseweb_api::ClientConfig`.

use std::collections::BTreeMap;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use leaseweb_api::{ClientConfig, TransportConfig};

pub const DEFAULT_HOST: &str = "api.leaseweb.com";
pub const DEFAULT_SCHEME: &str = "https";
pub const ENV_PREFIX: &str = "LEASEWEB_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no API token configured; set `token` in the provider block or LEASEWEB_TOKEN")]
    MissingToken,

    #[error("`{field}` is not known yet; provider configuration needs concrete values")]
    UnknownValue { field: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

impl ConfigError {
    /// Attribute the error belongs to, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingToken => Some("token"),
            Self::UnknownValue { field } | Self::Validation { field, .. } => Some(field.as_str()),
            Self::Figment(_) => None,
        }
    }
}

// ── Provider block ──────────────────────────────────────────────────

/// One attribute of the provider block as the runtime reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BlockValue<T> {
    Set(T),
    #[default]
    Unset,
    /// Depends on values the runtime has not computed yet.
    Unknown,
}

impl<T> BlockValue<T> {
    fn set(&self, field: &str) -> Result<Option<&T>, ConfigError> {
        match self {
            Self::Set(v) => Ok(Some(v)),
            Self::Unset => Ok(None),
            Self::Unknown => Err(ConfigError::UnknownValue {
                field: field.to_owned(),
            }),
        }
    }
}

/// The explicit provider configuration block.
#[derive(Debug, Clone, Default)]
pub struct ProviderBlock {
    pub host: BlockValue<String>,
    pub scheme: BlockValue<String>,
    pub token: BlockValue<SecretString>,
}

// ── Resolved settings ───────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct RawSettings {
    host: String,
    scheme: String,
    #[serde(default)]
    token: Option<String>,
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            scheme: DEFAULT_SCHEME.into(),
            token: None,
        }
    }
}

/// Fully resolved and validated provider settings.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub host: String,
    pub scheme: String,
    pub token: SecretString,
}

impl ProviderSettings {
    /// `{scheme}://{host}`. The adapter appends the API prefix.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&format!("{}://{}", self.scheme, self.host)).map_err(|e| {
            ConfigError::Validation {
                field: "host".into(),
                reason: e.to_string(),
            }
        })
    }

    pub fn client_config(&self, transport: TransportConfig) -> Result<ClientConfig, ConfigError> {
        Ok(ClientConfig {
            base_url: self.base_url()?,
            token: self.token.clone(),
            transport,
        })
    }
}

// ── Resolution ──────────────────────────────────────────────────────

/// Resolve settings from `LEASEWEB_*` environment variables and `block`.
pub fn resolve(block: &ProviderBlock) -> Result<ProviderSettings, ConfigError> {
    resolve_with(Env::prefixed(ENV_PREFIX), block)
}

/// Resolve straight to an adapter configuration with default transport.
pub fn resolve_client_config(block: &ProviderBlock) -> Result<ClientConfig, ConfigError> {
    resolve(block)?.client_config(TransportConfig::default())
}

fn resolve_with(env: Env, block: &ProviderBlock) -> Result<ProviderSettings, ConfigError> {
    // Unknown values are rejected before anything is merged.
    let mut explicit: BTreeMap<&str, String> = BTreeMap::new();
    if let Some(host) = block.host.set("host")? {
        explicit.insert("host", host.clone());
    }
    if let Some(scheme) = block.scheme.set("scheme")? {
        explicit.insert("scheme", scheme.clone());
    }
    if let Some(token) = block.token.set("token")? {
        explicit.insert("token", token.expose_secret().to_owned());
    }

    let raw: RawSettings = Figment::new()
        .merge(Serialized::defaults(RawSettings::default()))
        .merge(env.only(&["host", "scheme", "token"]))
        .merge(Serialized::defaults(explicit))
        .extract()?;

    validate(raw)
}

fn validate(raw: RawSettings) -> Result<ProviderSettings, ConfigError> {
    let scheme = raw.scheme.trim().to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::Validation {
            field: "scheme".into(),
            reason: format!("expected \"http\" or \"https\", got {:?}", raw.scheme),
        });
    }

    let host = raw.host.trim().trim_end_matches('/').to_owned();
    if host.is_empty() {
        return Err(ConfigError::Validation {
            field: "host".into(),
            reason: "must not be empty".into(),
        });
    }

    let token = match raw.token {
        Some(t) if !t.trim().is_empty() => SecretString::from(t),
        _ => return Err(ConfigError::MissingToken),
    };

    let settings = ProviderSettings {
        host,
        scheme,
        token,
    };
    settings.base_url()?;
    Ok(settings)
}
