use anyhow::{Context, Result};
use config::{Config as RConfig, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use crate::constants::{
    HEC_ENV_PREFIX, MAX_BATCH_COUNT, MAX_ATTEMPTS, RETRY_DELAY_MS, SENTRY_DSN_ENV_VAR,
};

#[derive(Clone, Deserialize)]
pub struct Config {
    /// Collector endpoint. Empty when `SPLUNK_HEC_URL` is unset.
    pub url: String,
    pub token: String,
    /// Records per request. Always 1: `HecForward` sends each record as its
    /// own request and keeps no buffer, so nothing downstream reads this.
    pub max_batch_count: usize,
    /// Total attempts per record, the first one included.
    pub max_attempts: usize,
    pub retry_delay_ms: u64,
    pub sentry_dsn: Option<String>,
}

impl Config {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("token", &if self.token.is_empty() { "" } else { "<redacted>" })
            .field("max_batch_count", &self.max_batch_count)
            .field("max_attempts", &self.max_attempts)
            .field("retry_delay_ms", &self.retry_delay_ms)
            .field("sentry_dsn", &self.sentry_dsn.is_some())
            .finish()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Reads the collector settings from the process environment.
    pub fn load() -> Result<Config> {
        Self::load_from(std::env::vars().collect())
    }

    /// Same as [`ConfigLoader::load`] but over an explicit variable map.
    ///
    /// Missing url or token is not an error here: the collector call fails
    /// later with a transport error instead.
    pub fn load_from(vars: HashMap<String, String>) -> Result<Config> {
        let sentry_dsn = vars
            .get(SENTRY_DSN_ENV_VAR)
            .filter(|dsn| !dsn.trim().is_empty())
            .cloned();

        let mut builder = RConfig::builder();

        // set defaults
        builder = builder
            .set_default("url", "")?
            .set_default("token", "")?
            .set_default("retry_delay_ms", RETRY_DELAY_MS)?
            .set_default("sentry_dsn", None::<String>)?;

        builder = builder.add_source(Environment::with_prefix(HEC_ENV_PREFIX).source(Some(vars)));

        // delivery policy is fixed, the environment cannot change it
        builder = builder
            .set_override("max_batch_count", MAX_BATCH_COUNT as u64)?
            .set_override("max_attempts", MAX_ATTEMPTS as u64)?
            .set_override_option("sentry_dsn", sentry_dsn)?;

        let config: Config = builder
            .build()?
            .try_deserialize()
            .context("failed to parse collector configuration")?;

        Ok(config)
    }
}
