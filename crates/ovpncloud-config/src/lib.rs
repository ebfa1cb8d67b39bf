//! Configuration for the ovpncloud client.
//!
//! TOML profiles, token resolution (env + plaintext), and translation to
//! `ovpncloud_api::ClientConfig`. The CLI layers its flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use ovpncloud_api::{ClientConfig, DeletePolicies, DeletePolicy, TlsMode, TransportConfig};

/// Environment variable consulted when a profile names no token source.
pub const TOKEN_ENV: &str = "OVPNCLOUD_API_TOKEN";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{profile}' not found")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named tenant profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

impl Config {
    /// The profile to use when none is requested explicitly.
    pub fn active_profile_name(&self, requested: Option<&str>) -> String {
        requested
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    /// Look up a profile and build its `ClientConfig`.
    pub fn resolve(&self, profile_name: &str) -> Result<ClientConfig, ConfigError> {
        let profile =
            self.profiles
                .get(profile_name)
                .ok_or_else(|| ConfigError::UnknownProfile {
                    profile: profile_name.into(),
                })?;
        profile_to_client_config(profile, profile_name, &self.defaults)
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named tenant profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Tenant API root (e.g., "https://acme.api.openvpn.com").
    pub base_url: String,

    /// API token in plaintext. Prefer `api_token_env`.
    pub api_token: Option<String>,

    /// Environment variable name containing the API token.
    pub api_token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,

    /// Delete confirmation per resource kind.
    #[serde(default)]
    pub deletes: DeleteSettings,
}

/// `[profiles.<name>.deletes]`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteSettings {
    /// Extra delete attempts after the first one while an entity lingers.
    #[serde(default = "default_route_retries")]
    pub route_retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Read connectors back after delete, like routes.
    #[serde(default)]
    pub confirm_connectors: bool,

    #[serde(default)]
    pub confirm_dns_records: bool,
}

impl Default for DeleteSettings {
    fn default() -> Self {
        Self {
            route_retries: default_route_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            confirm_connectors: false,
            confirm_dns_records: false,
        }
    }
}

fn default_route_retries() -> u32 {
    DeletePolicy::DEFAULT_RETRIES
}
fn default_retry_delay_ms() -> u64 {
    500
}

impl DeleteSettings {
    /// Translate into per-kind policies. Retries and delay apply to every
    /// kind that confirms.
    pub fn to_policies(&self) -> DeletePolicies {
        let confirmed = DeletePolicy::confirmed()
            .with_retries(self.route_retries)
            .with_delay(Duration::from_millis(self.retry_delay_ms));
        let pick = |confirm: bool| {
            if confirm {
                confirmed
            } else {
                DeletePolicy::single_shot()
            }
        };

        DeletePolicies {
            connector: pick(self.confirm_connectors),
            route: confirmed,
            dns_record: pick(self.confirm_dns_records),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "ovpncloud", "ovpncloud").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("ovpncloud");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, with `OVPNCLOUD_*` environment overrides.
///
/// A missing file yields the defaults. A file that exists but does not
/// parse is an error, never silently replaced.
///
/// Nested keys use a double underscore:
/// `OVPNCLOUD_PROFILES__DEFAULT__BASE_URL`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("OVPNCLOUD_").ignore(&["API_TOKEN"]).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the API token: named env var, then plaintext, then `OVPNCLOUD_API_TOKEN`.
pub fn resolve_api_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.api_token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Some(ref token) = profile.api_token {
        return Ok(SecretString::from(token.clone()));
    }

    if let Ok(val) = std::env::var(TOKEN_ENV) {
        return Ok(SecretString::from(val));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build a `ClientConfig` from a profile, falling back to global defaults.
pub fn profile_to_client_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let base_url: url::Url = profile
        .base_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: {}", profile.base_url),
        })?;

    let token = resolve_api_token(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(ClientConfig {
        base_url,
        token,
        transport: TransportConfig { tls, timeout },
        deletes: profile.deletes.to_policies(),
    })
}
