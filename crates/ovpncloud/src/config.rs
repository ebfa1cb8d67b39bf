//! Builds the client for a run from the config file, the active profile,
//! and CLI flag overrides.

use tokio_util::sync::CancellationToken;

use ovpncloud_api::{ClientConfig, CloudClient};
use ovpncloud_config::{Config, Profile, profile_to_client_config};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the profile name: `--profile`, then the file's default.
pub fn active_profile_name(global: &GlobalOpts, cfg: &Config) -> String {
    cfg.active_profile_name(global.profile.as_deref())
}

/// Layer flag overrides on top of a profile.
fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref url) = global.base_url {
        profile.base_url.clone_from(url);
    }
    if let Some(ref token) = global.api_token {
        profile.api_token = Some(token.clone());
        profile.api_token_env = None;
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    profile
}

/// Produce the client configuration for this invocation.
///
/// Without a matching profile the tenant URL must come from `--base-url`
/// (or `OVPNCLOUD_BASE_URL`) and the token from the usual sources.
pub fn build_client_config(global: &GlobalOpts, cfg: &Config) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    let profile = if let Some(profile) = cfg.profiles.get(&profile_name) {
        apply_overrides(profile.clone(), global)
    } else if global.profile.is_some() {
        let mut available: Vec<_> = cfg.profiles.keys().cloned().collect();
        available.sort();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    } else if global.base_url.is_some() {
        apply_overrides(Profile::default(), global)
    } else {
        return Err(CliError::NoConfig {
            path: ovpncloud_config::config_path().display().to_string(),
        });
    };

    tracing::debug!(profile = %profile_name, base_url = %profile.base_url, "resolved profile");
    Ok(profile_to_client_config(&profile, &profile_name, &cfg.defaults)?)
}

// ── Tenant session ───────────────────────────────────────────────────

/// A client bound to the active profile, cancelled on Ctrl-C.
pub struct Tenant {
    pub client: CloudClient,
    profile: String,
}

impl Tenant {
    pub fn connect(global: &GlobalOpts) -> Result<Self, CliError> {
        let cfg = ovpncloud_config::load_config()?;
        let profile = active_profile_name(global, &cfg);
        let client_config = build_client_config(global, &cfg)?;

        let cancel = CancellationToken::new();
        let client = CloudClient::new(&client_config)?.with_cancellation(cancel.clone());
        spawn_interrupt_watcher(cancel);

        Ok(Self { client, profile })
    }

    /// Attach the profile name to a command's auth failure.
    pub fn finish(&self, result: Result<(), CliError>) -> Result<(), CliError> {
        result.map_err(|e| e.with_profile(&self.profile))
    }
}

/// Cancel in-flight work on Ctrl-C. A pending delete confirmation stops
/// between attempts instead of running out its retries.
fn spawn_interrupt_watcher(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling");
            cancel.cancel();
        }
    });
}
