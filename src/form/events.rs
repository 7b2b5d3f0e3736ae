use crate::submission::{Acknowledgement, SubmitError};

/// Events that can happen on the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Field input
    DateChanged(String),
    CarPlateChanged(String),
    MileageChanged(String),
    AgentChanged(String),

    Submit,

    // Outcome of the submit effect
    SubmitResponse(Result<Acknowledgement, SubmitError>),

    // UI actions
    DismissAlert,
}
