use anyhow::{Context, Result, ensure};
use reqwest::Url;
use std::{env, time::Duration};

/// Spreadsheet endpoint the records are posted to.
///
/// Fixed at build time via `MILEAGE_ENDPOINT_URL`; can be overridden at runtime
/// through the environment variable of the same name.
pub const DEFAULT_ENDPOINT_URL: &str = match option_env!("MILEAGE_ENDPOINT_URL") {
    Some(url) => url,
    None => "https://script.google.com/macros/s/DEPLOYMENT_ID/exec",
};

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Application configuration loaded and validated at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub submission: SubmissionConfig,
}

/// Where and how records are delivered
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionConfig {
    pub endpoint: Url,
    /// Bounded wait per request
    pub timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let submission = SubmissionConfig::load(&lookup)?;

        Ok(Self { submission })
    }
}

impl SubmissionConfig {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn load(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self> {
        let endpoint =
            lookup("MILEAGE_ENDPOINT_URL").unwrap_or_else(|| DEFAULT_ENDPOINT_URL.to_string());
        let endpoint = Url::parse(&endpoint)
            .with_context(|| format!("failed to parse MILEAGE_ENDPOINT_URL: {endpoint}"))?;

        let timeout_secs = match lookup("MILEAGE_REQUEST_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse::<u64>()
                .context("failed to parse MILEAGE_REQUEST_TIMEOUT_SECS: invalid format")?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        ensure!(
            timeout_secs > 0,
            "failed to load MILEAGE_REQUEST_TIMEOUT_SECS: must be greater than 0"
        );

        Ok(Self::new(endpoint).with_timeout(Duration::from_secs(timeout_secs)))
    }
}
