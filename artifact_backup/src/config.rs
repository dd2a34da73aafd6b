//! Function configuration.
//!
//! Read once per process from the Lambda environment. Only
//! `DESTINATION_BUCKET` has no default, and its absence is reported when the
//! first upload is attempted rather than at startup.

use std::time::Duration;

use crate::location::RegistryEndpoint;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which of the listed assets an invocation copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum AssetPolicy {
    /// Copy every asset of the package version.
    #[default]
    All,
    /// Copy the first listed asset and stop.
    First,
}

impl AssetPolicy {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "first" => Ok(Self::First),
            _ => Err(ConfigError::InvalidAssetPolicy(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    destination_bucket: Option<String>,
    pub(crate) request_timeout: Duration,
    pub(crate) endpoint: RegistryEndpoint,
    pub(crate) asset_policy: AssetPolicy,
}

impl Config {
    /// Variables:
    /// - `DESTINATION_BUCKET` (required at upload time)
    /// - `REQUEST_TIMEOUT_SECS` (default: 10)
    /// - `REGISTRY_HOST_LABEL` (default: `codeartifact`)
    /// - `REGISTRY_DNS_SUFFIX` (default: `amazonaws.com`)
    /// - `BACKUP_ASSETS` (`all` or `first`, default: `all`)
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let defaults = RegistryEndpoint::default();
        let endpoint = RegistryEndpoint::new(
            lookup("REGISTRY_HOST_LABEL").unwrap_or(defaults.host_label),
            lookup("REGISTRY_DNS_SUFFIX").unwrap_or(defaults.dns_suffix),
        );

        let asset_policy = lookup("BACKUP_ASSETS")
            .map(|raw| AssetPolicy::parse(&raw))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            destination_bucket: lookup("DESTINATION_BUCKET").filter(|b| !b.is_empty()),
            request_timeout,
            endpoint,
            asset_policy,
        })
    }

    pub(crate) fn destination_bucket(&self) -> Result<&str, ConfigError> {
        self.destination_bucket
            .as_deref()
            .ok_or(ConfigError::MissingDestinationBucket)
    }

    pub(crate) fn has_destination_bucket(&self) -> bool {
        self.destination_bucket.is_some()
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("DESTINATION_BUCKET environment variable is required")]
    MissingDestinationBucket,
    #[error("REQUEST_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
    #[error("BACKUP_ASSETS must be \"all\" or \"first\", got {0:?}")]
    InvalidAssetPolicy(String),
}
