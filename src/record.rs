use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// One mileage submission as sent over the wire.
///
/// Serialized with capitalized keys, e.g.
/// `{"Date":"2024-01-01","CarPlate":"BB1234","Mileage":1000,"Agent":"Jane"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct MileageRecord {
    pub date: String,
    #[validate(pattern = r"\S")]
    pub car_plate: String,
    #[validate(minimum = 1)]
    pub mileage: u64,
    #[validate(pattern = r"\S")]
    pub agent: String,
}

/// Raw form input as typed by the user
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormFields {
    pub date: String,
    pub car_plate: String,
    pub mileage: String,
    pub agent: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_capitalized_keys() {
        let record = MileageRecord {
            date: "2024-01-01".to_string(),
            car_plate: "BB1234".to_string(),
            mileage: 1000,
            agent: "Jane".to_string(),
        };

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"Date":"2024-01-01","CarPlate":"BB1234","Mileage":1000,"Agent":"Jane"}"#
        );
    }

    #[test]
    fn test_validate_rejects_empty_plate_and_zero_mileage() {
        let record = MileageRecord {
            date: "2024-01-01".to_string(),
            car_plate: String::new(),
            mileage: 0,
            agent: "Jane".to_string(),
        };

        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_whitespace_only_plate_and_agent() {
        let record = MileageRecord {
            date: "2024-01-01".to_string(),
            car_plate: "   ".to_string(),
            mileage: 1000,
            agent: "Jane".to_string(),
        };
        assert!(record.validate().is_err());

        let record = MileageRecord {
            car_plate: "BB1234".to_string(),
            agent: "\t ".to_string(),
            ..record
        };
        assert!(record.validate().is_err());

        let record = MileageRecord {
            agent: "Jane".to_string(),
            ..record
        };
        assert!(record.validate().is_ok());
    }
}
