pub mod config;
pub mod form;
pub mod http_client;
pub mod record;
pub mod submission;
pub mod validation;

// Re-export core types
pub use crate::{
    config::{AppConfig, SubmissionConfig},
    form::{Alert, AlertKind, Effect, Event, Model},
    record::{FormFields, MileageRecord},
    submission::{Acknowledgement, Fallback, SubmitError, Submitter, Transport},
    validation::{ValidationError, validate},
};
