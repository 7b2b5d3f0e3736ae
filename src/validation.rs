use crate::record::{FormFields, MileageRecord};
use thiserror::Error;

/// First violated form rule, in the order the rules are checked
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter the car plate")]
    MissingCarPlate,
    #[error("Please enter the mileage")]
    MissingMileage,
    #[error("Please enter the agent name")]
    MissingAgent,
    #[error("Mileage must be a positive whole number")]
    InvalidMileage,
}

/// Validate raw form input and build the record to submit.
///
/// Rules are checked in order (car plate, mileage, agent, mileage format) and the
/// first violation is returned. On success the plate is trimmed and upper-cased,
/// the agent and date are trimmed and the mileage is parsed as an integer.
pub fn validate(fields: &FormFields) -> Result<MileageRecord, ValidationError> {
    let car_plate = fields.car_plate.trim();
    let mileage = fields.mileage.trim();
    let agent = fields.agent.trim();

    if car_plate.is_empty() {
        return Err(ValidationError::MissingCarPlate);
    }

    if mileage.is_empty() {
        return Err(ValidationError::MissingMileage);
    }

    if agent.is_empty() {
        return Err(ValidationError::MissingAgent);
    }

    Ok(MileageRecord {
        date: fields.date.trim().to_string(),
        car_plate: car_plate.to_uppercase(),
        mileage: parse_mileage(mileage)?,
        agent: agent.to_string(),
    })
}

// integer-only: "12.5", "-3" and "0" are all rejected
fn parse_mileage(mileage: &str) -> Result<u64, ValidationError> {
    match mileage.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ValidationError::InvalidMileage),
    }
}
