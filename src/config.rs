use crate::error::{Error, Result};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

pub const API_URL_VAR: &str = "INVENTORY_API_URL";
pub const API_TIMEOUT_VAR: &str = "INVENTORY_API_TIMEOUT_SECS";
pub const SYNC_POLICY_VAR: &str = "INVENTORY_SYNC_POLICY";

/// How local state follows a write request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncPolicy {
    /// Patch local state once the request settles, whatever the status.
    #[default]
    Optimistic,
    /// Patch only on a success status, adopting the server's record on create.
    Confirmed,
}

impl std::str::FromStr for SyncPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimistic" => Ok(SyncPolicy::Optimistic),
            "confirmed" => Ok(SyncPolicy::Confirmed),
            other => Err(Error::Config(format!(
                "{SYNC_POLICY_VAR} must be `optimistic` or `confirmed`, got `{other}`"
            ))),
        }
    }
}

/// Settings for the products service client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub sync_policy: SyncPolicy,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
            sync_policy: SyncPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_sync_policy(mut self, sync_policy: SyncPolicy) -> Self {
        self.sync_policy = sync_policy;
        self
    }

    /// Reads `.env` if there is one, then the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings from a dotenv-style file only.
    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let vars = dotenvy::from_path_iter(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?
            .collect::<std::result::Result<Vec<(String, String)>, _>>()
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))?;

        Self::from_lookup(|key| {
            vars.iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.clone())
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("{API_URL_VAR} must be set")))?;

        let mut config = ApiConfig::new(base_url.trim());

        if let Some(raw) = lookup(API_TIMEOUT_VAR).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{API_TIMEOUT_VAR} must be whole seconds, got `{raw}`"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        if let Some(raw) = lookup(SYNC_POLICY_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_sync_policy(raw.parse()?);
        }

        Ok(config)
    }
}
