//! Form state and the event loop driving it.
//!
//! [`update`] is pure: it mutates the [`Model`] and returns an [`Effect`]. The
//! shell carries out the effect, which for a submit means calling the
//! [`Submitter`] and feeding the outcome back as [`Event::SubmitResponse`].
//! [`process`] does exactly that until the model settles.

pub mod events;
pub mod model;
pub mod update;

pub use events::Event;
pub use model::{Alert, AlertKind, Model};
pub use update::update;

use crate::{
    record::MileageRecord,
    submission::{Submitter, Transport},
};

/// Work the shell has to do after an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Render,
    Submit(MileageRecord),
}

/// Apply `event` and run every resulting effect to completion.
pub async fn process<T>(event: Event, model: &mut Model, submitter: &Submitter<T>)
where
    T: Transport,
{
    let mut next = Some(event);

    while let Some(event) = next.take() {
        if let Effect::Submit(record) = update(event, model) {
            next = Some(Event::SubmitResponse(submitter.submit(&record).await));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{MockTransport, RemoteReply, ReplyBody, SubmitError};

    fn model(car_plate: &str, mileage: &str, agent: &str) -> Model {
        let mut model = Model::new();
        model.fields.date = "2024-01-01".to_string();
        model.fields.car_plate = car_plate.to_string();
        model.fields.mileage = mileage.to_string();
        model.fields.agent = agent.to_string();
        model
    }

    #[test]
    fn test_new_model_is_dated_today() {
        let model = Model::new();

        assert_eq!(
            model.fields.date,
            chrono::Local::now().date_naive().to_string()
        );
        assert!(!model.is_submitting);
    }

    #[tokio::test]
    async fn test_invalid_fields_never_reach_the_network() {
        for (car_plate, mileage, agent) in [
            ("", "1000", "Jane"),
            ("BB1234", " ", "Jane"),
            ("BB1234", "1000", "  "),
            ("BB1234", "0", "Jane"),
            ("BB1234", "ten", "Jane"),
        ] {
            let mut transport = MockTransport::new();
            transport.expect_send().never();
            let submitter = Submitter::new(transport);
            let mut model = model(car_plate, mileage, agent);

            process(Event::Submit, &mut model, &submitter).await;

            assert!(!model.is_submitting);
            assert_eq!(model.alert.map(|a| a.kind), Some(AlertKind::Error));
        }
    }

    #[tokio::test]
    async fn test_success_round_trip() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|record| record.car_plate == "BB1234" && record.mileage == 1000)
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(RemoteReply::Json(ReplyBody {
                        result: Some("success".to_string()),
                        message: None,
                    }))
                })
            });
        let submitter = Submitter::new(transport);
        let mut model = model("bb1234", "1000", "Jane");

        process(Event::Submit, &mut model, &submitter).await;

        assert!(!model.is_submitting);
        assert_eq!(model.alert.map(|a| a.kind), Some(AlertKind::Success));
        assert_eq!(model.fields.car_plate, "");
        assert_eq!(model.fields.mileage, "");
        assert_eq!(model.fields.agent, "Jane");
        assert_eq!(model.fields.date, "2024-01-01");
    }

    #[tokio::test]
    async fn test_transport_failure_clears_in_flight_flag() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Box::pin(async { Err(SubmitError::Timeout) }));
        let submitter = Submitter::new(transport);
        let mut model = model("bb1234", "1000", "Jane");

        process(Event::Submit, &mut model, &submitter).await;

        assert!(!model.is_submitting);
        assert_eq!(
            model.alert,
            Some(Alert {
                kind: AlertKind::Error,
                message: SubmitError::Timeout.to_string(),
            })
        );
        assert_eq!(model.fields.car_plate, "bb1234");
    }
}
