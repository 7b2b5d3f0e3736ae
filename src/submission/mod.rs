//! Delivery of a [`MileageRecord`] to the remote spreadsheet endpoint.
//!
//! A [`Submitter`] hands the record to a [`Transport`] (by default the primary
//! HTTP transport with the blocking one as fallback) and normalizes whatever the
//! remote replied into an [`Acknowledgement`] or a [`SubmitError`].

mod transport;

pub use transport::{Fallback, Transport};
#[cfg(any(test, feature = "mock"))]
pub use transport::MockTransport;

use crate::{
    config::SubmissionConfig,
    http_client::{PrimaryTransport, SecondaryTransport},
    record::MileageRecord,
};
use anyhow::Result;
use log::{info, warn};
use serde::Deserialize;
use serde_valid::Validate;
use thiserror::Error;

/// Value of the `result` field with which the remote accepts a record.
///
/// The primary transport also accepts a non-JSON body containing this marker,
/// which is a weak contract with the remote service.
pub const SUCCESS_SENTINEL: &str = "success";

/// Message shown when the remote rejects a record without saying why
pub const GENERIC_FAILURE_MESSAGE: &str = "Submission failed";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// Connection could not be established or broke down
    #[error("Network error: {0}")]
    Network(String),
    #[error("The server did not respond in time")]
    Timeout,
    #[error("Unexpected response status: HTTP {0}")]
    UnexpectedStatus(u16),
    #[error("Unrecognized response from the server: {0}")]
    MalformedResponse(String),
    /// Well-formed reply in which the remote reports a failure
    #[error("{0}")]
    Remote(String),
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl SubmitError {
    /// Failures on which the next transport in a [`Fallback`] chain is tried
    pub fn is_transport_failure(&self) -> bool {
        matches!(self, SubmitError::Network(_) | SubmitError::Timeout)
    }
}

/// Remote confirmation that a record was accepted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    pub message: Option<String>,
}

/// Decoded JSON reply of the remote endpoint
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ReplyBody {
    pub result: Option<String>,
    pub message: Option<String>,
}

/// What a transport received, before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteReply {
    Json(ReplyBody),
    /// Body that is not valid JSON, kept for the success marker scan
    Text(String),
}

impl RemoteReply {
    /// Parse a body as JSON, keeping the raw text if that fails.
    pub fn parse_lenient(body: String) -> Self {
        match serde_json::from_str(&body) {
            Ok(reply) => RemoteReply::Json(reply),
            Err(_) => RemoteReply::Text(body),
        }
    }

    /// Parse a body as JSON, rejecting anything else.
    pub fn parse_strict(body: &str) -> Result<Self, SubmitError> {
        serde_json::from_str(body)
            .map(RemoteReply::Json)
            .map_err(|e| SubmitError::MalformedResponse(format!("invalid JSON: {e}")))
    }

    pub fn into_outcome(self) -> Result<Acknowledgement, SubmitError> {
        match self {
            RemoteReply::Json(ReplyBody { result, message }) => {
                if result.as_deref() == Some(SUCCESS_SENTINEL) {
                    Ok(Acknowledgement { message })
                } else {
                    Err(SubmitError::Remote(
                        message.unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
                    ))
                }
            }
            RemoteReply::Text(text) if text.contains(SUCCESS_SENTINEL) => {
                warn!("accepted non-JSON reply because it contains the success marker");
                Ok(Acknowledgement::default())
            }
            RemoteReply::Text(text) => Err(SubmitError::MalformedResponse(excerpt(&text))),
        }
    }
}

fn excerpt(text: &str) -> String {
    const MAX_CHARS: usize = 80;

    let text = text.trim();
    if text.is_empty() {
        return "empty body".to_string();
    }

    let mut excerpt: String = text.chars().take(MAX_CHARS).collect();
    if text.chars().count() > MAX_CHARS {
        excerpt.push_str("...");
    }
    excerpt
}

/// Primary transport with the blocking transport as its single fallback
pub type DefaultTransport = Fallback<PrimaryTransport, SecondaryTransport>;

pub struct Submitter<T> {
    transport: T,
}

impl<T> Submitter<T>
where
    T: Transport,
{
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Deliver one record and interpret the reply.
    ///
    /// The record invariants are checked before any network activity.
    pub async fn submit(&self, record: &MileageRecord) -> Result<Acknowledgement, SubmitError> {
        record
            .validate()
            .map_err(|e| SubmitError::InvalidRecord(e.to_string()))?;

        info!(
            "submitting mileage {} for {} ({})",
            record.mileage, record.car_plate, record.date
        );

        let outcome = self.transport.send(record).await?.into_outcome();

        match &outcome {
            Ok(_) => info!("mileage record for {} accepted", record.car_plate),
            Err(e) => warn!("mileage record for {} rejected: {e}", record.car_plate),
        }

        outcome
    }
}

impl Submitter<DefaultTransport> {
    pub fn from_config(config: &SubmissionConfig) -> Result<Self> {
        Ok(Self::new(Fallback::new(
            PrimaryTransport::new(config)?,
            SecondaryTransport::new(config),
        )))
    }
}
