use crate::{
    config::SubmissionConfig,
    record::MileageRecord,
    submission::{RemoteReply, SubmitError, Transport},
};
use anyhow::{Context, Result};
use log::debug;
use reqwest::{Client, StatusCode, Url, redirect::Policy};
use std::time::Duration;

const MAX_REDIRECTS: usize = 10;

/// Map a reqwest failure onto the submission taxonomy
fn transport_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        SubmitError::Timeout
    } else {
        SubmitError::Network(err.to_string())
    }
}

// the remote already answered, so a broken body must not trigger the fallback
fn body_error(err: reqwest::Error) -> SubmitError {
    SubmitError::MalformedResponse(format!("failed to read response body: {err}"))
}

/// Async JSON POST with a bounded wait.
///
/// HTTP 200 and 302 are accepted. The body is parsed as JSON; a body that is not
/// JSON is kept as text so the success marker can still be found in it.
pub struct PrimaryTransport {
    client: Client,
    endpoint: Url,
}

impl PrimaryTransport {
    pub fn new(config: &SubmissionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .context("failed to create primary HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl Transport for PrimaryTransport {
    async fn send(&self, record: &MileageRecord) -> Result<RemoteReply, SubmitError> {
        debug!("primary transport: POST {}", self.endpoint);

        let res = self
            .client
            .post(self.endpoint.clone())
            .json(record)
            .send()
            .await
            .map_err(transport_error)?;

        let status = res.status();
        if status != StatusCode::OK && status != StatusCode::FOUND {
            return Err(SubmitError::UnexpectedStatus(status.as_u16()));
        }

        let body = res.text().await.map_err(body_error)?;

        Ok(RemoteReply::parse_lenient(body))
    }
}

/// Blocking JSON POST run on the blocking thread pool.
///
/// Follows redirects, requires a 2xx status and strictly parses the body as JSON.
pub struct SecondaryTransport {
    endpoint: Url,
    timeout: Duration,
}

impl SecondaryTransport {
    pub fn new(config: &SubmissionConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
        }
    }

    // the blocking client owns a runtime of its own and must be built and
    // dropped outside of the async context
    fn post(
        endpoint: Url,
        timeout: Duration,
        record: &MileageRecord,
    ) -> Result<RemoteReply, SubmitError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| SubmitError::Network(format!("failed to create fallback client: {e}")))?;

        let res = client
            .post(endpoint)
            .json(record)
            .send()
            .map_err(transport_error)?;

        let status = res.status();
        if !status.is_success() {
            return Err(SubmitError::UnexpectedStatus(status.as_u16()));
        }

        let body = res.text().map_err(body_error)?;

        RemoteReply::parse_strict(&body)
    }
}

impl Transport for SecondaryTransport {
    async fn send(&self, record: &MileageRecord) -> Result<RemoteReply, SubmitError> {
        debug!("secondary transport: POST {}", self.endpoint);

        let endpoint = self.endpoint.clone();
        let timeout = self.timeout;
        let record = record.clone();

        tokio::task::spawn_blocking(move || Self::post(endpoint, timeout, &record))
            .await
            .map_err(|e| SubmitError::Network(format!("fallback request did not complete: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> SubmissionConfig {
        SubmissionConfig::new(Url::parse(endpoint).unwrap())
    }

    fn record() -> MileageRecord {
        MileageRecord {
            date: "2024-01-01".to_string(),
            car_plate: "BB1234".to_string(),
            mileage: 1000,
            agent: "Jane".to_string(),
        }
    }

    // nothing listens on port 1 of the loopback interface
    const UNREACHABLE: &str = "http://127.0.0.1:1/exec";

    #[tokio::test]
    async fn test_primary_reports_network_failure() {
        let transport = PrimaryTransport::new(&config(UNREACHABLE)).unwrap();

        let result = transport.send(&record()).await;

        assert!(matches!(result, Err(SubmitError::Network(_))));
    }

    #[tokio::test]
    async fn test_secondary_reports_network_failure() {
        let transport = SecondaryTransport::new(&config(UNREACHABLE));

        let result = transport.send(&record()).await;

        assert!(matches!(result, Err(SubmitError::Network(_))));
    }
}
