use serde::{Deserialize, Serialize};

use crate::record::FormFields;

pub const SUCCESS_MESSAGE: &str = "Mileage record submitted successfully";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

/// Message shown to the user after a submit attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

/// Form state, also the view model of the shell
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Model {
    pub fields: FormFields,
    /// Set while a submission is outstanding
    pub is_submitting: bool,
    pub alert: Option<Alert>,
}

impl Model {
    /// Empty form with the date set to today
    pub fn new() -> Self {
        Self {
            fields: FormFields {
                date: chrono::Local::now().date_naive().to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Start a submission (sets is_submitting=true, clears the alert)
    pub fn start_submitting(&mut self) {
        self.is_submitting = true;
        self.alert = None;
    }

    /// Show an error and stop submitting
    pub fn set_error(&mut self, message: String) {
        self.is_submitting = false;
        self.alert = Some(Alert {
            kind: AlertKind::Error,
            message,
        });
    }

    /// Show a success message, stop submitting and clear the per-vehicle fields.
    ///
    /// Date and agent are kept for the next record.
    pub fn set_success(&mut self, message: String) {
        self.is_submitting = false;
        self.fields.car_plate.clear();
        self.fields.mileage.clear();
        self.alert = Some(Alert {
            kind: AlertKind::Success,
            message,
        });
    }

    pub fn clear_alert(&mut self) {
        self.alert = None;
    }
}
