use super::{RemoteReply, SubmitError};
use crate::record::MileageRecord;
use log::warn;
#[cfg(any(test, feature = "mock"))]
use mockall::automock;
use trait_variant::make;

/// A concrete mechanism delivering a record to the remote endpoint
#[make(Send)]
#[cfg_attr(any(test, feature = "mock"), automock)]
pub trait Transport {
    async fn send(&self, record: &MileageRecord) -> Result<RemoteReply, SubmitError>;
}

/// Ordered pair of transports.
///
/// `secondary` is tried exactly once, and only when `primary` fails with a
/// network or timeout error. Nest to build longer chains, e.g.
/// `Fallback<A, Fallback<B, C>>`.
pub struct Fallback<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> Fallback<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P, S> Transport for Fallback<P, S>
where
    P: Transport + Sync,
    S: Transport + Sync,
{
    async fn send(&self, record: &MileageRecord) -> Result<RemoteReply, SubmitError> {
        match self.primary.send(record).await {
            Err(e) if e.is_transport_failure() => {
                warn!("primary transport failed ({e}), trying fallback transport");
                self.secondary.send(record).await
            }
            other => other,
        }
    }
}
